//! The window, its GL context, and the event loop that feeds it input.
//!
//! A window goes through three stages, each its own type:
//!
//! 1. [`Platform`] owns the event loop. Nothing can be drawn yet.
//! 2. [`Window`] has been created, but its context isn't current.
//! 3. [`CurrentWindow`] is bound to this thread and hands out the [`Context`] GL objects need.
//!
//! The window is closed by setting its close flag (usually from an input handler) and then
//! dropping it.

use std::any::Any;
use std::cell::Cell;
use std::panic;
use std::rc::Rc;
use std::time::Instant;

use glutin::dpi::{LogicalSize, PhysicalSize};
use glutin::event::{DeviceEvent, ElementState, Event, KeyboardInput, MouseScrollDelta, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;
use glutin::window::{CursorGrabMode, WindowBuilder};
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, NotCurrent, PossiblyCurrent, WindowedContext};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::input::{InputEvent, InputStack, KeyTracker, ScrollDelta, WindowFlags};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl Default for GlVersion {
    fn default() -> Self {
        Self { major: 3, minor: 3 }
    }
}

/// How to create a window. Sizes are in logical pixels.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Always a core profile.
    pub gl_version: GlVersion,
    pub vsync: bool,
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("gltut"),
            width: 800,
            height: 600,
            resizable: false,
            gl_version: GlVersion::default(),
            vsync: true,
            visible: true,
        }
    }
}

impl WindowConfig {
    pub fn new(title: &str, width: u32, height: u32) -> Self {
        Self { title: title.to_string(), width, height, ..Self::default() }
    }
}

/// Tracks whether some window of a platform has its context current.
///
/// GL names are per context, so deleting an object while another context is current would free
/// whatever that context has under the same name. Only one window is bound at a time.
#[derive(Debug, Clone, Default)]
struct BindLock {
    bound: Rc<Cell<bool>>,
}

impl BindLock {
    fn acquire(&self, title: &str) -> Result<Bound> {
        if self.bound.replace(true) {
            return Err(Error::Context(format!(
                "cannot make \"{}\" current: another window's context still is",
                title
            )));
        }

        Ok(Bound { bound: self.bound.clone() })
    }

    #[cfg(test)]
    fn is_bound(&self) -> bool {
        self.bound.get()
    }
}

/// Held by the current window. Dropping it frees the platform to bind another.
#[derive(Debug)]
struct Bound {
    bound: Rc<Cell<bool>>,
}

impl Drop for Bound {
    fn drop(&mut self) {
        self.bound.set(false);
    }
}

/// Owns the event loop and the clock.
pub struct Platform {
    event_loop: EventLoop<()>,
    started: Instant,
    keys: KeyTracker,
    lock: BindLock,
}

impl Platform {
    /// Connects to the windowing system.
    ///
    /// Fails if there's no display to connect to, or (on some platforms) when not called from the
    /// main thread.
    pub fn new() -> Result<Self> {
        Self::with_event_loop(EventLoop::new)
    }

    /// Like [`Platform::new`], but allowed off the main thread. Tests need this.
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    pub fn new_any_thread() -> Result<Self> {
        use glutin::event_loop::EventLoopBuilder;
        use glutin::platform::unix::EventLoopBuilderExtUnix;

        Self::with_event_loop(|| EventLoopBuilder::new().with_any_thread(true).build())
    }

    /// winit panics instead of returning an error when it can't reach the windowing system.
    fn with_event_loop<F>(build: F) -> Result<Self>
    where
        F: FnOnce() -> EventLoop<()> + panic::UnwindSafe,
    {
        let event_loop = panic::catch_unwind(build)
            .map_err(|payload| Error::Creation(format!("event loop: {}", panic_message(&*payload))))?;

        log::debug!("event loop created");
        Ok(Self {
            event_loop,
            started: Instant::now(),
            keys: KeyTracker::default(),
            lock: BindLock::default(),
        })
    }

    /// Seconds since the platform was created.
    pub fn time(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn create_window(&self, config: &WindowConfig) -> Result<Window> {
        let builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(f64::from(config.width), f64::from(config.height)))
            .with_resizable(config.resizable)
            .with_visible(config.visible);

        let GlVersion { major, minor } = config.gl_version;
        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, (major, minor)))
            .with_gl_profile(GlProfile::Core)
            .with_vsync(config.vsync)
            .build_windowed(builder, &self.event_loop)
            .map_err(|e| Error::Creation(format!("window \"{}\": {}", config.title, e)))?;

        log::info!("created window \"{}\" ({}x{})", config.title, config.width, config.height);
        Ok(Window { context, title: config.title.clone(), lock: self.lock.clone() })
    }

    /// Handles every pending event without waiting for new ones, feeding input to `handlers`.
    pub fn poll_events(&mut self, window: &CurrentWindow, handlers: &InputStack) {
        let target = window.context.window().id();
        let flags = window.flags();
        let keys = &mut self.keys;

        self.event_loop.run_return(|event, _, control_flow| match event {
            Event::WindowEvent { window_id, event } if window_id == target => match event {
                WindowEvent::CloseRequested => handlers.dispatch(flags, &InputEvent::CloseRequested),
                WindowEvent::Resized(size) => window.resize(size),
                WindowEvent::Focused(false) => keys.clear(),
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { virtual_keycode: Some(key), scancode, state, .. },
                    ..
                } => {
                    let action = keys.action(key, state == ElementState::Pressed);
                    handlers.dispatch(flags, &InputEvent::Key { key, scancode, action });
                }
                WindowEvent::CursorMoved { position, .. } => {
                    handlers.dispatch(flags, &InputEvent::CursorMoved { x: position.x, y: position.y });
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let delta = match delta {
                        MouseScrollDelta::LineDelta(x, y) => ScrollDelta::Lines { x, y },
                        MouseScrollDelta::PixelDelta(p) => ScrollDelta::Pixels { x: p.x, y: p.y },
                    };
                    handlers.dispatch(flags, &InputEvent::Scroll(delta));
                }
                _ => {}
            },
            Event::DeviceEvent { event: DeviceEvent::MouseMotion { delta: (dx, dy) }, .. } => {
                handlers.dispatch(flags, &InputEvent::MouseMotion { dx, dy });
            }
            Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
            _ => {}
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("the windowing system is unavailable")
    }
}

/// A window whose context isn't current.
pub struct Window {
    context: WindowedContext<NotCurrent>,
    title: String,
    lock: BindLock,
}

impl Window {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Binds the context to this thread and loads the GL functions through it.
    ///
    /// Only one window of a platform can be current at a time. While another [`CurrentWindow`]
    /// is alive this fails with [`Error::Context`], and the window is dropped.
    pub fn make_current(self) -> Result<CurrentWindow> {
        let bound = self.lock.acquire(&self.title)?;
        let Window { context, title, lock } = self;

        let context = unsafe { context.make_current() }.map_err(|(_, e)| Error::Context(e.to_string()))?;

        let gl = Context::load(|symbol| context.get_proc_address(symbol));
        log::debug!("context of \"{}\" is current", title);

        Ok(CurrentWindow { context, gl, flags: WindowFlags::default(), title, lock, bound })
    }
}

/// A window whose context is current on this thread.
pub struct CurrentWindow {
    context: WindowedContext<PossiblyCurrent>,
    gl: Context,
    flags: WindowFlags,
    title: String,
    lock: BindLock,
    bound: Bound,
}

impl CurrentWindow {
    /// The context GL objects are created against.
    pub fn gl(&self) -> &Context {
        &self.gl
    }

    pub fn flags(&self) -> &WindowFlags {
        &self.flags
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn should_close(&self) -> bool {
        self.flags.should_close()
    }

    pub fn set_should_close(&self, value: bool) {
        self.flags.set_should_close(value);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.context.swap_buffers().map_err(|e| Error::Context(e.to_string()))
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.context.window().inner_size();
        (size.width, size.height)
    }

    pub fn width(&self) -> u32 {
        self.size().0
    }

    pub fn height(&self) -> u32 {
        self.size().1
    }

    /// Width over height. A minimized window counts as square.
    pub fn aspect_ratio(&self) -> f32 {
        match self.size() {
            (w, h) if w > 0 && h > 0 => w as f32 / h as f32,
            _ => 1.0,
        }
    }

    /// Hides the cursor and keeps it inside the window, for mouse-look.
    pub fn disable_cursor(&self) -> Result<()> {
        let window = self.context.window();
        window.set_cursor_visible(false);

        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| Error::Context(format!("cannot grab the cursor: {}", e)))
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        self.context.resize(size);

        if let Err(e) = self.gl.viewport(0, 0, size.width, size.height) {
            log::error!("{}", e);
        }
    }

    /// Un-binds the context, handing back a window that can be made current again.
    pub fn release(self) -> Result<Window> {
        let CurrentWindow { context, title, lock, bound, .. } = self;
        let context = unsafe { context.make_not_current() }.map_err(|(_, e)| Error::Context(e.to_string()))?;
        drop(bound);

        log::debug!("context of \"{}\" released", title);
        Ok(Window { context, title, lock })
    }
}
