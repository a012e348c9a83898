use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use glw::{CloseOnEscape, CurrentWindow, InputStack, Platform};

/// Nothing but the clear color. Escape closes it.
pub fn run(platform: &mut Platform, window: &CurrentWindow) -> Result<()> {
    let mut input = InputStack::new();
    let input = input.push(Rc::new(RefCell::new(CloseOnEscape)));

    let gl = window.gl();
    super::render_loop(platform, window, &input, |_| super::clear(gl, false))
}
