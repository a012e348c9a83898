use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use glw::{CloseOnEscape, CurrentWindow, InputStack, Platform, Program, VertexArray, VertexAttribute, VertexBuffer};

use super::DemoConfig;
use crate::geometry;

pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();

    let vao = VertexArray::new(gl)?;
    vao.bind()?;
    let vbo = VertexBuffer::new(gl, &geometry::TRIANGLE)?;
    vao.attribute(&VertexAttribute::of::<[f32; 3]>(0, 3, 0))?;
    vao.unbind();

    let program = Program::from_files(gl, config.shader("triangle.vert"), config.shader("yellow.frag"))
        .context("cannot build the triangle program")?;

    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    super::render_loop(platform, window, &input, |_| {
        super::clear(gl, false)?;

        program.apply()?;
        vao.bind()?;
        gl.draw_arrays(0, vbo.len())?;
        vao.unbind();

        Ok(())
    })
}
