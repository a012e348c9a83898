use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use glw::{CloseOnEscape, CurrentWindow, InputStack, Platform, Program, VertexArray, VertexBuffer};

use super::DemoConfig;
use crate::geometry::{self, ColorVertex};

/// Colors interpolated across a triangle, with a uniform tint on top.
pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();

    let vao = VertexArray::new(gl)?;
    vao.bind()?;
    let vbo = VertexBuffer::new(gl, &geometry::RGB_TRIANGLE)?;
    for attribute in ColorVertex::attributes().iter() {
        vao.attribute(attribute)?;
    }
    vao.unbind();

    let program = Program::from_files(gl, config.shader("vertex_color.vert"), config.shader("vertex_color.frag"))
        .context("cannot build the vertex color program")?;
    let tint = program.uniform_location("color")?;

    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    super::render_loop(platform, window, &input, |_| {
        super::clear(gl, false)?;

        let active = program.apply()?;
        active.set_uniform(tint, [0.9f32, 0.1, 0.1, 0.1])?;

        vao.bind()?;
        gl.draw_arrays(0, vbo.len())?;
        Ok(())
    })
}
