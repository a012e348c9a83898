use std::ffi::CString;

use gl::types::*;

use crate::error::{Error, ErrorCode, Result};

/// Drains the GL error flags and reports the first one raised since the last check.
///
/// The GL can queue several errors; they're all cleared here so that the next check only sees
/// errors from the next call.
pub fn check_error(call: &'static str) -> Result<()> {
    let mut first = None;

    loop {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }

        log::trace!("{} raised {}", call, ErrorCode(code));
        first.get_or_insert(code);
    }

    match first {
        Some(code) => Err(Error::Gl { call, code: ErrorCode(code) }),
        None => Ok(()),
    }
}

pub fn to_cstring(text: &str) -> Result<CString> {
    CString::new(text).map_err(|_| Error::InvalidSource)
}

/// Makes a buffer the GL can write an info log of `len` bytes (including the terminator) into.
fn log_buffer(len: GLint) -> Vec<u8> {
    vec![0; len.max(1) as usize]
}

/// Turns what the GL wrote into `buf` into a string, dropping the terminator and trailing
/// whitespace.
fn log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_string()
}

pub fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len) };

    let mut buf = log_buffer(len);
    let mut written = 0;
    unsafe {
        gl::GetShaderInfoLog(id, buf.len() as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
    }

    log_to_string(buf, written)
}

pub fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len) };

    let mut buf = log_buffer(len);
    let mut written = 0;
    unsafe {
        gl::GetProgramInfoLog(id, buf.len() as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
    }

    log_to_string(buf, written)
}

/// Reads a NUL-terminated name the GL wrote into `buf`.
pub fn name_from_buffer(buf: &[u8], written: GLsizei) -> String {
    let end = (written.max(0) as usize).min(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn logs_drop_terminator_and_trailing_newlines() {
        let mut buf = log_buffer(16);
        buf[..9].copy_from_slice(b"bad line\n");

        assert_eq!(log_to_string(buf, 9), "bad line");
    }

    #[test]
    fn empty_logs_still_get_a_buffer() {
        assert_eq!(log_buffer(0).len(), 1);
        assert_eq!(log_to_string(log_buffer(0), 0), "");
    }

    #[test]
    fn names_stop_at_what_was_written() {
        assert_eq!(name_from_buffer(b"model\0\0\0", 5), "model");
        assert_eq!(name_from_buffer(b"view", 40), "view");
    }

    #[test]
    fn interior_nul_is_rejected() {
        assert!(matches!(to_cstring("void main() {}\0"), Err(Error::InvalidSource)));
        assert!(to_cstring("void main() {}").is_ok());
    }
}
