use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use std::ptr::null;

use gl::types::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::{Handle, Resource};
use crate::utils;

/// Which pipeline stage a shader is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        })
    }
}

pub(crate) enum ShaderObject {}

impl Resource for ShaderObject {
    const NAME: &'static str = "shader";

    unsafe fn destroy(id: GLuint) {
        gl::DeleteShader(id);
    }
}

/// A compiled shader.
///
/// There's no such thing as an uncompiled `Shader`: if compilation fails, the half-built object is
/// deleted before the error is returned.
pub struct Shader<'gl> {
    handle: Handle<ShaderObject>,
    kind: ShaderKind,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> Shader<'gl> {
    /// Compiles `source` as a shader of the given kind.
    pub fn compile(_gl: &'gl Context, kind: ShaderKind, source: &str) -> Result<Self> {
        let source = utils::to_cstring(source)?;

        let handle = Handle::new(unsafe { gl::CreateShader(kind.gl_enum()) })
            .ok_or_else(|| Error::Creation(format!("{} shader object", kind)))?;

        // Owned from here on, so every early return below deletes it.
        let shader = Self { handle, kind, _context: PhantomData };

        let id = shader.id();
        unsafe {
            gl::ShaderSource(id, 1, &source.as_ptr(), null());
            gl::CompileShader(id);
        }

        let mut success = GLint::from(gl::FALSE);
        unsafe { gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success) };

        if success == GLint::from(gl::FALSE) {
            let log = utils::shader_info_log(id);
            log::debug!("{} shader {} failed to compile", kind, id);
            return Err(Error::Compile { kind, log });
        }

        log::debug!("compiled {} shader {}", kind, id);
        Ok(shader)
    }

    pub fn vertex(gl: &'gl Context, source: &str) -> Result<Self> {
        Self::compile(gl, ShaderKind::Vertex, source)
    }

    pub fn fragment(gl: &'gl Context, source: &str) -> Result<Self> {
        Self::compile(gl, ShaderKind::Fragment, source)
    }

    /// Reads `path` verbatim and compiles it.
    pub fn from_file<P: AsRef<Path>>(gl: &'gl Context, kind: ShaderKind, path: P) -> Result<Self> {
        let source = read_source(path)?;
        Self::compile(gl, kind, &source)
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl fmt::Debug for Shader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("kind", &self.kind)
            .field("id", &self.id())
            .finish()
    }
}

/// Reads a shader source file.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    log::debug!("reading shader source {}", path.display());

    fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}
