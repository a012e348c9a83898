//! Input events and the handlers that react to them.
//!
//! Handlers live on an [`InputStack`]. Pushing one returns a [`HandlerGuard`] that pops it again
//! when it goes out of scope, and since a nested push has to go through the outer guard, scopes
//! always unwind in order. Events are offered to the top handler first and walk down the stack
//! until one of them returns [`Propagation::Stop`].

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

pub use glutin::event::VirtualKeyCode as Key;

/// Scroll distance the GL tutorials treat as one wheel notch, for touchpads that report pixels.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Press,
    /// The key was already held and the platform sent another press.
    Repeat,
    Release,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrollDelta {
    Lines { x: f32, y: f32 },
    Pixels { x: f64, y: f64 },
}

impl ScrollDelta {
    /// The scroll amount in wheel notches.
    pub fn lines(self) -> (f64, f64) {
        match self {
            ScrollDelta::Lines { x, y } => (f64::from(x), f64::from(y)),
            ScrollDelta::Pixels { x, y } => (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, scancode: u32, action: KeyAction },
    /// Cursor position in physical pixels from the top-left of the window.
    CursorMoved { x: f64, y: f64 },
    /// Raw mouse movement. Keeps coming while the cursor is grabbed.
    MouseMotion { dx: f64, dy: f64 },
    Scroll(ScrollDelta),
    CloseRequested,
}

/// The window state input handlers are allowed to touch.
#[derive(Debug, Default)]
pub struct WindowFlags {
    should_close: Cell<bool>,
}

impl WindowFlags {
    pub fn should_close(&self) -> bool {
        self.should_close.get()
    }

    pub fn set_should_close(&self, value: bool) {
        self.should_close.set(value);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Propagation {
    Stop,
    Continue,
}

/// Reacts to input. Every method defaults to ignoring the event and passing it down the stack.
pub trait InputHandler {
    fn key(&mut self, _window: &WindowFlags, _key: Key, _scancode: u32, _action: KeyAction) -> Propagation {
        Propagation::Continue
    }

    fn cursor_moved(&mut self, _window: &WindowFlags, _x: f64, _y: f64) -> Propagation {
        Propagation::Continue
    }

    fn mouse_motion(&mut self, _window: &WindowFlags, _dx: f64, _dy: f64) -> Propagation {
        Propagation::Continue
    }

    fn scroll(&mut self, _window: &WindowFlags, _delta: ScrollDelta) -> Propagation {
        Propagation::Continue
    }
}

/// A handler shared between the stack and whoever else needs its state (a camera, say).
pub type SharedHandler = Rc<RefCell<dyn InputHandler>>;

#[derive(Default)]
pub struct InputStack {
    handlers: Vec<SharedHandler>,
}

impl InputStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `handler` on top of the stack until the returned guard is dropped.
    pub fn push(&mut self, handler: SharedHandler) -> HandlerGuard<'_> {
        let depth = self.handlers.len();
        self.handlers.push(handler);
        log::trace!("input handler pushed at depth {}", depth);

        HandlerGuard { stack: self, depth }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offers `event` to the handlers, top first, until one stops it.
    ///
    /// A close request always sets the close flag, whatever the handlers do.
    pub fn dispatch(&self, window: &WindowFlags, event: &InputEvent) {
        if let InputEvent::CloseRequested = event {
            window.set_should_close(true);
            return;
        }

        for handler in self.handlers.iter().rev() {
            let mut handler = match handler.try_borrow_mut() {
                Ok(handler) => handler,
                Err(_) => {
                    log::warn!("input handler is borrowed elsewhere, skipping {:?}", event);
                    continue;
                }
            };

            let flow = match *event {
                InputEvent::Key { key, scancode, action } => handler.key(window, key, scancode, action),
                InputEvent::CursorMoved { x, y } => handler.cursor_moved(window, x, y),
                InputEvent::MouseMotion { dx, dy } => handler.mouse_motion(window, dx, dy),
                InputEvent::Scroll(delta) => handler.scroll(window, delta),
                InputEvent::CloseRequested => Propagation::Stop,
            };

            if flow == Propagation::Stop {
                break;
            }
        }
    }
}

impl fmt::Debug for InputStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStack").field("depth", &self.handlers.len()).finish()
    }
}

/// Keeps a handler on the stack. Dropping it removes the handler.
///
/// The guard derefs to the stack, so nested scopes push through it:
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use glw::{CloseOnEscape, InputStack};
///
/// let mut stack = InputStack::new();
/// {
///     let mut outer = stack.push(Rc::new(RefCell::new(CloseOnEscape)));
///     {
///         let inner = outer.push(Rc::new(RefCell::new(CloseOnEscape)));
///         assert_eq!(inner.len(), 2);
///     }
///     assert_eq!(outer.len(), 1);
/// }
/// assert!(stack.is_empty());
/// ```
pub struct HandlerGuard<'s> {
    stack: &'s mut InputStack,
    depth: usize,
}

impl Deref for HandlerGuard<'_> {
    type Target = InputStack;

    fn deref(&self) -> &InputStack {
        self.stack
    }
}

impl DerefMut for HandlerGuard<'_> {
    fn deref_mut(&mut self) -> &mut InputStack {
        self.stack
    }
}

impl Drop for HandlerGuard<'_> {
    fn drop(&mut self) {
        let depth = self.stack.handlers.len();
        if depth != self.depth + 1 {
            log::warn!("input stack is {} deep when popping depth {}, a guard was leaked", depth, self.depth);
        }
        self.stack.handlers.truncate(self.depth);
        log::trace!("input handler popped from depth {}", self.depth);
    }
}

/// Closes the window when Escape is pressed.
#[derive(Debug, Default, Copy, Clone)]
pub struct CloseOnEscape;

impl InputHandler for CloseOnEscape {
    fn key(&mut self, window: &WindowFlags, key: Key, _scancode: u32, action: KeyAction) -> Propagation {
        if key == Key::Escape && action == KeyAction::Press {
            log::info!("Escape pressed, closing window");
            window.set_should_close(true);
            return Propagation::Stop;
        }

        Propagation::Continue
    }
}

/// Tells a fresh press from an auto-repeat, which the platform reports the same way.
#[derive(Debug, Default)]
pub(crate) struct KeyTracker {
    held: HashSet<Key>,
}

impl KeyTracker {
    pub fn action(&mut self, key: Key, pressed: bool) -> KeyAction {
        if !pressed {
            self.held.remove(&key);
            return KeyAction::Release;
        }

        if self.held.insert(key) {
            KeyAction::Press
        } else {
            KeyAction::Repeat
        }
    }

    /// Forgets held keys, e.g. when focus is lost and releases won't arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Records what it saw into a shared log and answers with a fixed propagation.
    struct Recorder {
        name: &'static str,
        flow: Propagation,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl InputHandler for Recorder {
        fn key(&mut self, _window: &WindowFlags, key: Key, _scancode: u32, action: KeyAction) -> Propagation {
            self.log.borrow_mut().push(format!("{} {:?} {:?}", self.name, key, action));
            self.flow
        }

        fn scroll(&mut self, _window: &WindowFlags, delta: ScrollDelta) -> Propagation {
            self.log.borrow_mut().push(format!("{} scroll {:?}", self.name, delta.lines()));
            self.flow
        }
    }

    fn recorder(name: &'static str, flow: Propagation, log: &Rc<RefCell<Vec<String>>>) -> SharedHandler {
        Rc::new(RefCell::new(Recorder { name, flow, log: log.clone() }))
    }

    fn key(key: Key, action: KeyAction) -> InputEvent {
        InputEvent::Key { key, scancode: 0, action }
    }

    #[test]
    fn top_handler_sees_events_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let flags = WindowFlags::default();
        let mut stack = InputStack::new();

        let mut base = stack.push(recorder("base", Propagation::Continue, &log));
        let top = base.push(recorder("top", Propagation::Continue, &log));

        top.dispatch(&flags, &key(Key::W, KeyAction::Press));

        assert_eq!(*log.borrow(), vec!["top W Press", "base W Press"]);
    }

    #[test]
    fn stop_hides_the_event_from_lower_handlers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let flags = WindowFlags::default();
        let mut stack = InputStack::new();

        let mut base = stack.push(recorder("base", Propagation::Continue, &log));
        let top = base.push(recorder("top", Propagation::Stop, &log));

        top.dispatch(&flags, &key(Key::A, KeyAction::Release));

        assert_eq!(*log.borrow(), vec!["top A Release"]);
    }

    #[test]
    fn dropping_a_guard_restores_the_previous_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let flags = WindowFlags::default();
        let mut stack = InputStack::new();

        let mut base = stack.push(recorder("base", Propagation::Stop, &log));
        {
            let nested = base.push(recorder("nested", Propagation::Stop, &log));
            nested.dispatch(&flags, &key(Key::Q, KeyAction::Press));
        }
        base.dispatch(&flags, &key(Key::E, KeyAction::Press));
        drop(base);

        assert!(stack.is_empty());
        assert_eq!(*log.borrow(), vec!["nested Q Press", "base E Press"]);
    }

    #[test]
    fn leaked_inner_guard_is_cleaned_up_by_the_outer_one() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = InputStack::new();

        {
            let mut outer = stack.push(recorder("outer", Propagation::Continue, &log));
            std::mem::forget(outer.push(recorder("leaked", Propagation::Continue, &log)));
            assert_eq!(outer.len(), 2);
        }

        assert!(stack.is_empty());
    }

    #[test]
    fn close_requests_always_close() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let flags = WindowFlags::default();
        let mut stack = InputStack::new();
        let guard = stack.push(recorder("swallow", Propagation::Stop, &log));

        guard.dispatch(&flags, &InputEvent::CloseRequested);

        assert!(flags.should_close());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn escape_press_closes_the_window() {
        let flags = WindowFlags::default();
        let mut handler = CloseOnEscape;

        assert_eq!(handler.key(&flags, Key::Escape, 1, KeyAction::Release), Propagation::Continue);
        assert!(!flags.should_close());

        assert_eq!(handler.key(&flags, Key::Escape, 1, KeyAction::Press), Propagation::Stop);
        assert!(flags.should_close());
    }

    #[test]
    fn busy_handlers_are_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let flags = WindowFlags::default();
        let mut stack = InputStack::new();

        let mut base = stack.push(recorder("base", Propagation::Continue, &log));
        let busy = recorder("busy", Propagation::Stop, &log);
        let top = base.push(busy.clone());

        let _held = busy.borrow_mut();
        top.dispatch(&flags, &InputEvent::Scroll(ScrollDelta::Lines { x: 0.0, y: 1.0 }));

        assert_eq!(*log.borrow(), vec!["base scroll (0.0, 1.0)"]);
    }

    #[test]
    fn pixel_scrolls_convert_to_lines() {
        assert_eq!(ScrollDelta::Pixels { x: 0.0, y: -40.0 }.lines(), (0.0, -2.0));
        assert_eq!(ScrollDelta::Lines { x: 1.0, y: 0.5 }.lines(), (1.0, 0.5));
    }

    #[test]
    fn held_keys_repeat() {
        let mut tracker = KeyTracker::default();

        assert_eq!(tracker.action(Key::W, true), KeyAction::Press);
        assert_eq!(tracker.action(Key::W, true), KeyAction::Repeat);
        assert_eq!(tracker.action(Key::S, true), KeyAction::Press);
        assert_eq!(tracker.action(Key::W, false), KeyAction::Release);
        assert_eq!(tracker.action(Key::W, true), KeyAction::Press);

        tracker.clear();
        assert_eq!(tracker.action(Key::S, true), KeyAction::Press);
    }
}
