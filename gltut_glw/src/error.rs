use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::shader::ShaderKind;

/// Everything that can go wrong while talking to the windowing system or the GL.
///
/// Each variant carries enough text to be printed straight to the user: the driver's compile or
/// link log, a GL error code name, or the message the windowing system gave back.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to compile {kind} shader:\n{log}")]
    Compile { kind: ShaderKind, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },

    /// The GL reported no location for this uniform.
    ///
    /// This happens for misspelled names, but also for uniforms that are declared in the source
    /// and never used: the compiler is free to optimize them out. The GL doesn't say which one
    /// it was; [`Program::active_uniforms`](crate::Program::active_uniforms) lists what survived.
    #[error("cannot find \"{name}\" uniform")]
    UniformNotFound { name: String },

    #[error("{call} failed: GL returned {code}")]
    Gl { call: &'static str, code: ErrorCode },

    #[error("failed to create {0}")]
    Creation(String),

    #[error("failed to bind GL context: {0}")]
    Context(String),

    #[error("source text contains an interior NUL byte")]
    InvalidSource,

    #[error("cannot get color model from {channels} channels")]
    UnsupportedFormat { channels: u8 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A raw value returned by `glGetError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub fn name(self) -> &'static str {
        match self.0 {
            gl::INVALID_ENUM => "GL_INVALID_ENUM",
            gl::INVALID_VALUE => "GL_INVALID_VALUE",
            gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
            gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gl_errors_name_their_code() {
        let err = Error::Gl { call: "glUseProgram", code: ErrorCode(gl::INVALID_OPERATION) };

        assert_eq!(
            err.to_string(),
            "glUseProgram failed: GL returned GL_INVALID_OPERATION (0x0502)"
        );
    }

    #[test]
    fn unknown_codes_still_print_their_value() {
        assert_eq!(ErrorCode(0x1234).to_string(), "unknown error (0x1234)");
    }

    #[test]
    fn compile_errors_carry_the_driver_log() {
        let err = Error::Compile {
            kind: ShaderKind::Fragment,
            log: "0:3(1): error: syntax error, unexpected '}'".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("failed to compile fragment shader"));
        assert!(msg.contains("unexpected '}'"));
    }

    #[test]
    fn io_errors_mention_the_path() {
        let err = Error::Io {
            path: PathBuf::from("shaders/missing.vert"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };

        assert!(err.to_string().contains("shaders/missing.vert"));
    }
}
