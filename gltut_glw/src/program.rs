use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use gl::types::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::{Handle, Resource};
use crate::shader::{Shader, ShaderKind};
use crate::uniform::{Uniform, UniformLocation, UniformMatrix};
use crate::utils;

pub(crate) enum ProgramObject {}

impl Resource for ProgramObject {
    const NAME: &'static str = "program";

    unsafe fn destroy(id: GLuint) {
        gl::DeleteProgram(id);
    }
}

/// A linked shader program.
///
/// The shaders it was linked from are only borrowed while linking. They're detached again
/// afterwards, so they can be dropped as soon as the program exists.
pub struct Program<'gl> {
    handle: Handle<ProgramObject>,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> Program<'gl> {
    /// Attaches every shader in `shaders` and links them into a program.
    pub fn link(_gl: &'gl Context, shaders: &[&Shader<'gl>]) -> Result<Self> {
        let handle = Handle::new(unsafe { gl::CreateProgram() })
            .ok_or_else(|| Error::Creation(String::from("shader program object")))?;

        // Owned from here on, so a failed attach or link deletes it on the way out.
        let program = Self { handle, _context: PhantomData };
        let id = program.id();

        for shader in shaders {
            unsafe { gl::AttachShader(id, shader.id()) };
            utils::check_error("glAttachShader")?;
        }

        unsafe { gl::LinkProgram(id) };

        let mut success = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(id, gl::LINK_STATUS, &mut success) };

        for shader in shaders {
            unsafe { gl::DetachShader(id, shader.id()) };
        }

        if success == GLint::from(gl::FALSE) {
            let log = utils::program_info_log(id);
            log::debug!("program {} failed to link", id);
            return Err(Error::Link { log });
        }

        log::debug!("linked program {} from {} shaders", id, shaders.len());
        Ok(program)
    }

    /// Compiles a vertex and a fragment shader from files and links them.
    pub fn from_files<V, F>(gl: &'gl Context, vertex: V, fragment: F) -> Result<Self>
    where
        V: AsRef<Path>,
        F: AsRef<Path>,
    {
        let vertex = Shader::from_file(gl, ShaderKind::Vertex, vertex)?;
        let fragment = Shader::from_file(gl, ShaderKind::Fragment, fragment)?;

        Self::link(gl, &[&vertex, &fragment])
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    /// Makes this the program used by subsequent draw calls.
    ///
    /// Uniforms are set through the returned [`ActiveProgram`], since the GL only writes uniforms
    /// of the program currently in use.
    pub fn apply(&self) -> Result<ActiveProgram<'_, 'gl>> {
        unsafe { gl::UseProgram(self.id()) };
        utils::check_error("glUseProgram")?;

        Ok(ActiveProgram { program: self })
    }

    /// Looks up a uniform by name.
    ///
    /// A uniform that's declared but never used may have been optimized out by the compiler, in
    /// which case this fails with [`Error::UniformNotFound`] just as it would for a typo.
    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation> {
        let c_name = utils::to_cstring(name)?;
        let location = unsafe { gl::GetUniformLocation(self.id(), c_name.as_ptr()) };

        if location == -1 {
            log::debug!("program {} has no active uniform \"{}\"", self.id(), name);
            return Err(Error::UniformNotFound { name: name.to_string() });
        }

        Ok(UniformLocation(location))
    }

    /// Names of the uniforms the linker kept.
    ///
    /// Array uniforms show up with a `[0]` suffix, as the GL reports them.
    pub fn active_uniforms(&self) -> Vec<String> {
        let id = self.id();

        let mut count = 0;
        let mut max_len = 0;
        unsafe {
            gl::GetProgramiv(id, gl::ACTIVE_UNIFORMS, &mut count);
            gl::GetProgramiv(id, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_len);
        }

        let mut buf = vec![0u8; max_len.max(1) as usize];
        (0..count.max(0) as GLuint)
            .map(|index| {
                let mut written = 0;
                let mut size = 0;
                let mut kind = 0;
                unsafe {
                    gl::GetActiveUniform(
                        id,
                        index,
                        buf.len() as GLsizei,
                        &mut written,
                        &mut size,
                        &mut kind,
                        buf.as_mut_ptr() as *mut GLchar,
                    );
                }

                utils::name_from_buffer(&buf, written)
            })
            .collect()
    }
}

impl fmt::Debug for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Program").field(&self.id()).finish()
    }
}

/// A program that is currently in use, as returned by [`Program::apply`].
pub struct ActiveProgram<'p, 'gl> {
    program: &'p Program<'gl>,
}

impl<'p, 'gl> ActiveProgram<'p, 'gl> {
    pub fn program(&self) -> &'p Program<'gl> {
        self.program
    }

    /// Writes one to four components to a uniform.
    pub fn set_uniform<U: Uniform>(&self, location: UniformLocation, value: U) -> Result<()> {
        unsafe { value.upload(location.0) };
        utils::check_error("glUniform")
    }

    pub fn set_matrix<M: UniformMatrix>(&self, location: UniformLocation, matrix: M) -> Result<()> {
        self.set_matrices(location, &[matrix])
    }

    /// Writes an array of matrices starting at `location`.
    pub fn set_matrices<M: UniformMatrix>(&self, location: UniformLocation, matrices: &[M]) -> Result<()> {
        unsafe { M::upload_all(matrices, location.0, false) };
        utils::check_error("glUniformMatrix")
    }
}
