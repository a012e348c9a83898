use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use cgmath::{perspective, Deg, InnerSpace, Matrix4, Rad, Vector3};
use glw::{
    CloseOnEscape, Context, CurrentWindow, InputStack, Platform, Program, Texture, UniformLocation,
    VertexArray, VertexBuffer,
};

use super::DemoConfig;
use crate::geometry::{self, TexturedVertex};

/// Ten textured cubes and the program that draws them.
pub(super) struct CubeScene<'gl> {
    vao: VertexArray<'gl>,
    vbo: VertexBuffer<'gl>,
    textures: [Texture<'gl>; 2],
    program: Program<'gl>,
    model: UniformLocation,
    view: UniformLocation,
    projection: UniformLocation,
}

impl<'gl> CubeScene<'gl> {
    pub fn new(gl: &'gl Context, config: &DemoConfig) -> Result<Self> {
        let vao = VertexArray::new(gl)?;
        vao.bind()?;
        let vbo = VertexBuffer::new(gl, &geometry::CUBE)?;
        for attribute in TexturedVertex::attributes().iter() {
            vao.attribute(attribute)?;
        }
        vao.unbind();

        let textures = [
            super::load_texture(gl, &config.texture("wall.png"))?,
            super::load_texture(gl, &config.texture("face.png"))?,
        ];

        let program = Program::from_files(gl, config.shader("mvp.vert"), config.shader("textured.frag"))
            .context("cannot build the model-view-projection program")?;
        {
            let active = program.apply()?;
            active.set_uniform(program.uniform_location("uniform_texture0")?, 0i32)?;
            active.set_uniform(program.uniform_location("uniform_texture1")?, 1i32)?;
        }

        Ok(Self {
            model: program.uniform_location("model")?,
            view: program.uniform_location("view")?,
            projection: program.uniform_location("projection")?,
            vao,
            vbo,
            textures,
            program,
        })
    }

    /// Draws a cube at each of `positions`, each tumbling at its own phase.
    pub fn draw(
        &self,
        gl: &Context,
        positions: &[[f32; 3]],
        time: f32,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    ) -> Result<()> {
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32)?;
        }

        let active = self.program.apply()?;
        active.set_matrix(self.view, super::columns(view))?;
        active.set_matrix(self.projection, super::columns(projection))?;

        self.vao.bind()?;
        for (i, position) in geometry::positions(positions).enumerate() {
            active.set_matrix(self.model, super::columns(model(position, i, time)))?;
            gl.draw_arrays(0, self.vbo.len())?;
        }

        Ok(())
    }
}

/// Places the `index`th cube at `position`, rotated about a slightly tilted x axis.
fn model(position: Vector3<f32>, index: usize, time: f32) -> Matrix4<f32> {
    let angle = time * (-55f32).to_radians() + 20.0 * index as f32;
    let axis = Vector3::new(1.0, 0.2, 0.0).normalize();

    Matrix4::from_translation(position) * Matrix4::from_axis_angle(axis, Rad(angle))
}

/// Cubes seen from a fixed point three units back.
pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();
    let scene = CubeScene::new(gl, config)?;
    gl.enable_depth_test()?;

    let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0));

    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    super::render_loop(platform, window, &input, |time| {
        super::clear(gl, true)?;

        let projection = perspective(Deg(45.0), window.aspect_ratio(), 0.1, 100.0);
        scene.draw(gl, &geometry::CUBE_POSITIONS, time, view, projection)
    })
}
