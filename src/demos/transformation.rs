use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use cgmath::{Matrix4, Rad, Vector3};
use glw::{
    CloseOnEscape, CurrentWindow, ElementBuffer, InputStack, Platform, Program, VertexArray, VertexBuffer,
};

use super::DemoConfig;
use crate::geometry::{self, TexturedVertex};

/// Spins about z while parked in the bottom-right corner.
fn spinning(time: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.5, -0.5, 0.0)) * Matrix4::from_angle_z(Rad(time))
}

/// Grows and shrinks between nothing and full size.
fn pulsing(time: f32) -> Matrix4<f32> {
    Matrix4::from_scale((1.0 + time.sin()) / 2.0)
}

/// The textured quad drawn twice with different transforms.
pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();

    let vao = VertexArray::new(gl)?;
    vao.bind()?;
    let _vbo = VertexBuffer::new(gl, &geometry::QUAD)?;
    let ebo = ElementBuffer::new(gl, &geometry::QUAD_INDICES)?;
    for attribute in TexturedVertex::attributes().iter() {
        vao.attribute(attribute)?;
    }
    vao.unbind();

    let textures = [
        super::load_texture(gl, &config.texture("wall.png"))?,
        super::load_texture(gl, &config.texture("face.png"))?,
    ];

    let program = Program::from_files(gl, config.shader("transform.vert"), config.shader("textured.frag"))
        .context("cannot build the transform program")?;
    let transform = program.uniform_location("transform")?;
    {
        let active = program.apply()?;
        active.set_uniform(program.uniform_location("uniform_texture0")?, 0i32)?;
        active.set_uniform(program.uniform_location("uniform_texture1")?, 1i32)?;
    }

    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    super::render_loop(platform, window, &input, |time| {
        super::clear(gl, false)?;

        for (unit, texture) in textures.iter().enumerate() {
            texture.bind(unit as u32)?;
        }

        let active = program.apply()?;
        vao.bind()?;

        for matrix in [spinning(time), pulsing(time)].iter() {
            active.set_matrix(transform, super::columns(*matrix))?;
            gl.draw_elements(ebo.len())?;
        }

        Ok(())
    })
}
