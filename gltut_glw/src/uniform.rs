//! Values that can be written to a shader uniform.
//!
//! The GL has a separate `glUniform*` function for every component count and scalar type. Rather
//! than checking at runtime that a caller passed between one and four values of a single type,
//! [`Uniform`] is only implemented for the combinations the GL actually supports, so anything else
//! is rejected by the compiler:
//!
//! ```
//! fn takes_uniform<U: glw::Uniform>(_: U) {}
//!
//! takes_uniform(0.5f32);
//! takes_uniform((0.9f32, 0.1, 0.1, 0.1));
//! takes_uniform([1i32, 2, 3]);
//! takes_uniform(true);
//! ```
//!
//! Five components is one too many:
//!
//! ```compile_fail
//! fn takes_uniform<U: glw::Uniform>(_: U) {}
//!
//! takes_uniform((1.0f32, 2.0, 3.0, 4.0, 5.0));
//! ```
//!
//! ```compile_fail
//! fn takes_uniform<U: glw::Uniform>(_: U) {}
//!
//! takes_uniform([0.0f32; 5]);
//! ```
//!
//! And components have to share a type:
//!
//! ```compile_fail
//! fn takes_uniform<U: glw::Uniform>(_: U) {}
//!
//! takes_uniform((1.0f32, 2i32));
//! ```

use gl::types::*;

/// An opaque uniform location, looked up by name with
/// [`Program::uniform_location`](crate::Program::uniform_location).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub(crate) GLint);

impl UniformLocation {
    pub fn raw(self) -> GLint {
        self.0
    }
}

mod sealed {
    pub trait Sealed {}
}

/// One to four components of `f32`, `i32`, `u32` or `bool`.
pub trait Uniform: sealed::Sealed {
    /// How many components the GL receives.
    const COMPONENTS: usize;

    /// Writes the value to `location` of the program currently in use.
    ///
    /// # Safety
    ///
    /// A GL context must be current.
    #[doc(hidden)]
    unsafe fn upload(&self, location: GLint);
}

macro_rules! uniform_impls {
    ($t:ty as $gl:ty: $f1:ident, $f2:ident, $f3:ident, $f4:ident) => {
        impl sealed::Sealed for $t {}
        impl Uniform for $t {
            const COMPONENTS: usize = 1;
            unsafe fn upload(&self, location: GLint) {
                gl::$f1(location, *self as $gl)
            }
        }

        impl sealed::Sealed for ($t, $t) {}
        impl Uniform for ($t, $t) {
            const COMPONENTS: usize = 2;
            unsafe fn upload(&self, location: GLint) {
                gl::$f2(location, self.0 as $gl, self.1 as $gl)
            }
        }

        impl sealed::Sealed for ($t, $t, $t) {}
        impl Uniform for ($t, $t, $t) {
            const COMPONENTS: usize = 3;
            unsafe fn upload(&self, location: GLint) {
                gl::$f3(location, self.0 as $gl, self.1 as $gl, self.2 as $gl)
            }
        }

        impl sealed::Sealed for ($t, $t, $t, $t) {}
        impl Uniform for ($t, $t, $t, $t) {
            const COMPONENTS: usize = 4;
            unsafe fn upload(&self, location: GLint) {
                gl::$f4(location, self.0 as $gl, self.1 as $gl, self.2 as $gl, self.3 as $gl)
            }
        }

        impl sealed::Sealed for [$t; 1] {}
        impl Uniform for [$t; 1] {
            const COMPONENTS: usize = 1;
            unsafe fn upload(&self, location: GLint) {
                self[0].upload(location)
            }
        }

        impl sealed::Sealed for [$t; 2] {}
        impl Uniform for [$t; 2] {
            const COMPONENTS: usize = 2;
            unsafe fn upload(&self, location: GLint) {
                (self[0], self[1]).upload(location)
            }
        }

        impl sealed::Sealed for [$t; 3] {}
        impl Uniform for [$t; 3] {
            const COMPONENTS: usize = 3;
            unsafe fn upload(&self, location: GLint) {
                (self[0], self[1], self[2]).upload(location)
            }
        }

        impl sealed::Sealed for [$t; 4] {}
        impl Uniform for [$t; 4] {
            const COMPONENTS: usize = 4;
            unsafe fn upload(&self, location: GLint) {
                (self[0], self[1], self[2], self[3]).upload(location)
            }
        }
    };
}

uniform_impls!(f32 as GLfloat: Uniform1f, Uniform2f, Uniform3f, Uniform4f);
uniform_impls!(i32 as GLint: Uniform1i, Uniform2i, Uniform3i, Uniform4i);
uniform_impls!(u32 as GLuint: Uniform1ui, Uniform2ui, Uniform3ui, Uniform4ui);
// GLSL bools are set through the integer entry points.
uniform_impls!(bool as GLint: Uniform1i, Uniform2i, Uniform3i, Uniform4i);

/// Square `f32` matrices in column-major order.
///
/// `cgmath::Matrix4<f32>` and friends convert with `AsRef`/`Into`.
pub trait UniformMatrix: sealed::Sealed + Sized {
    const COLUMNS: usize;

    /// # Safety
    ///
    /// A GL context must be current.
    #[doc(hidden)]
    unsafe fn upload_all(values: &[Self], location: GLint, transpose: bool);
}

macro_rules! matrix_impls {
    ($n:literal, $f:ident) => {
        impl sealed::Sealed for [[f32; $n]; $n] {}
        impl UniformMatrix for [[f32; $n]; $n] {
            const COLUMNS: usize = $n;
            unsafe fn upload_all(values: &[Self], location: GLint, transpose: bool) {
                let transpose = if transpose { gl::TRUE } else { gl::FALSE };
                gl::$f(location, values.len() as GLsizei, transpose, values.as_ptr() as *const GLfloat)
            }
        }
    };
}

matrix_impls!(2, UniformMatrix2fv);
matrix_impls!(3, UniformMatrix3fv);
matrix_impls!(4, UniformMatrix4fv);
