use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use glw::{
    CloseOnEscape, Context, CurrentWindow, ElementBuffer, InputStack, Platform, Program, Shader,
    ShaderKind, VertexArray, VertexAttribute, VertexBuffer,
};

use super::DemoConfig;
use crate::geometry;

/// A vertex array with the buffers it reads from.
struct Mesh<'gl> {
    vao: VertexArray<'gl>,
    _vbo: VertexBuffer<'gl>,
    ebo: ElementBuffer<'gl>,
}

impl<'gl> Mesh<'gl> {
    fn triangle(gl: &'gl Context, corners: &[[f32; 3]; 3]) -> Result<Self> {
        let vao = VertexArray::new(gl)?;
        vao.bind()?;

        let vbo = VertexBuffer::new(gl, corners)?;
        let ebo = ElementBuffer::new(gl, &geometry::TRIANGLE_INDICES)?;
        vao.attribute(&VertexAttribute::of::<[f32; 3]>(0, 3, 0))?;
        vao.unbind();

        Ok(Self { vao, _vbo: vbo, ebo })
    }

    fn draw(&self, gl: &Context) -> Result<()> {
        self.vao.bind()?;
        gl.draw_elements(self.ebo.len())?;
        Ok(())
    }
}

/// A yellow triangle above a red one, sharing a vertex shader.
pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();

    let meshes = [
        Mesh::triangle(gl, &geometry::UPPER_TRIANGLE)?,
        Mesh::triangle(gl, &geometry::LOWER_TRIANGLE)?,
    ];

    let vertex = Shader::from_file(gl, ShaderKind::Vertex, config.shader("triangle.vert"))?;
    let yellow = Shader::from_file(gl, ShaderKind::Fragment, config.shader("yellow.frag"))?;
    let red = Shader::from_file(gl, ShaderKind::Fragment, config.shader("red.frag"))?;
    let programs = [
        Program::link(gl, &[&vertex, &yellow]).context("cannot link the yellow program")?,
        Program::link(gl, &[&vertex, &red]).context("cannot link the red program")?,
    ];

    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    super::render_loop(platform, window, &input, |_| {
        super::clear(gl, false)?;

        for (mesh, program) in meshes.iter().zip(programs.iter()) {
            program.apply()?;
            mesh.draw(gl)?;
        }

        Ok(())
    })
}
