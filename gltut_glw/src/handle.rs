//! Ownership of a single GL object name.
//!
//! A [`Handle`] is the only thing in this crate that ever deletes a GL object. It is created from
//! a name the GL just handed out, it can't be cloned, and it deletes the name when dropped. The
//! GL's "no object" name (zero) can't be stored at all, so a handle is always something that
//! needs deleting.

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;

use gl::types::GLuint;

/// A kind of GL object that is deleted by name.
pub trait Resource {
    /// Human-readable name used in logs and error messages.
    const NAME: &'static str;

    /// Deletes the object named `id`.
    ///
    /// # Safety
    ///
    /// A GL context owning the object must be current on this thread, and `id` must not be used
    /// again afterwards.
    unsafe fn destroy(id: GLuint);
}

/// Owns one GL object name of kind `R`.
///
/// Handles are neither `Send` nor `Sync`: GL objects belong to the thread their context is current
/// on.
pub struct Handle<R: Resource> {
    id: NonZeroU32,
    _marker: PhantomData<(R, *const ())>,
}

impl<R: Resource> Handle<R> {
    /// Takes ownership of a freshly created GL name. Returns `None` for zero.
    pub fn new(id: GLuint) -> Option<Self> {
        let id = NonZeroU32::new(id)?;
        log::trace!("acquired {} {}", R::NAME, id);

        Some(Self { id, _marker: PhantomData })
    }

    pub fn id(&self) -> GLuint {
        self.id.get()
    }
}

impl<R: Resource> Drop for Handle<R> {
    fn drop(&mut self) {
        log::trace!("deleting {} {}", R::NAME, self.id);
        unsafe { R::destroy(self.id.get()) }
    }
}

impl<R: Resource> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", R::NAME, self.id)
    }
}
