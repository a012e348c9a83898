use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr::null;

use gl::types::*;

use crate::error::Result;
use crate::utils;

/// Proof that a GL context is current on this thread.
///
/// The only way to get one is [`Window::make_current`](crate::Window::make_current), and every GL
/// object constructor takes a `&Context`. Objects hold on to that borrow, so the borrow checker
/// won't let them outlive the window whose context created them. A platform binds one window at
/// a time, so while that window is alive no other context can become current under them.
///
/// The calls here are the handful of state changes and draws the tutorials need. Each one checks
/// the GL error flag afterwards.
pub struct Context {
    _not_send: PhantomData<*const ()>,
}

impl Context {
    /// Loads GL function pointers through `loader`. The context they come from must be current.
    pub(crate) fn load<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let context = Self { _not_send: PhantomData };
        log::info!("OpenGL {} ({})", context.string(gl::VERSION), context.string(gl::RENDERER));

        context
    }

    fn string(&self, name: GLenum) -> String {
        let ptr = unsafe { gl::GetString(name) };
        if ptr.is_null() {
            return String::from("unknown");
        }

        unsafe { CStr::from_ptr(ptr as *const _) }.to_string_lossy().into_owned()
    }

    pub fn version(&self) -> String {
        self.string(gl::VERSION)
    }

    /// Reports the first GL error raised since the last check, attributed to `call`.
    pub fn check_error(&self, call: &'static str) -> Result<()> {
        utils::check_error(call)
    }

    pub fn viewport(&self, x: i32, y: i32, width: u32, height: u32) -> Result<()> {
        unsafe { gl::Viewport(x, y, width as GLsizei, height as GLsizei) };
        self.check_error("glViewport")
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) -> Result<()> {
        unsafe { gl::ClearColor(r, g, b, a) };
        self.check_error("glClearColor")
    }

    /// Clears the color buffer, and the depth buffer too if `depth` is set.
    pub fn clear(&self, depth: bool) -> Result<()> {
        let mut mask = gl::COLOR_BUFFER_BIT;
        if depth {
            mask |= gl::DEPTH_BUFFER_BIT;
        }

        unsafe { gl::Clear(mask) };
        self.check_error("glClear")
    }

    pub fn enable_depth_test(&self) -> Result<()> {
        unsafe { gl::Enable(gl::DEPTH_TEST) };
        self.check_error("glEnable")
    }

    /// Draws `count` vertices of the bound vertex array as triangles, starting at `first`.
    pub fn draw_arrays(&self, first: usize, count: usize) -> Result<()> {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei) };
        self.check_error("glDrawArrays")
    }

    /// Draws `count` indices from the bound element buffer as triangles.
    pub fn draw_elements(&self, count: usize) -> Result<()> {
        unsafe { gl::DrawElements(gl::TRIANGLES, count as GLsizei, gl::UNSIGNED_INT, null()) };
        self.check_error("glDrawElements")
    }
}
