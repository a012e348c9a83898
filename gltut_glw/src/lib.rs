//! A small set of safe wrappers around the OpenGL API and a glutin window.
//!
//! Every GL object here (shaders, programs, buffers, textures) is an owned value: it creates its
//! native handle when constructed and deletes it exactly once when dropped. None of them can be
//! copied, and a moved-from binding simply can't be used anymore, so there's no "invalid handle"
//! value floating around to double-free.
//!
//! GL calls only make sense while a context is current. Rather than tracking that in a global,
//! [`Window::make_current`] hands back a [`CurrentWindow`] whose [`Context`] has to be passed to
//! every constructor. Objects borrow that context, which keeps them from outliving the window.
//!
//! A knowledge of OpenGL is *necessary* to understand any of this. [Learn OpenGL](learnopengl) is
//! the classic set of tutorials these wrappers were written alongside.
//!
//! [learnopengl]: https://learnopengl.com/

pub mod buffer;
pub mod context;
pub mod error;
pub mod handle;
pub mod input;
pub mod program;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod window;
pub(crate) mod utils;

pub use buffer::{ElementBuffer, VertexArray, VertexAttribute, VertexBuffer};
pub use context::Context;
pub use error::{Error, ErrorCode, Result};
pub use input::{
    CloseOnEscape, HandlerGuard, InputEvent, InputHandler, InputStack, Key, KeyAction,
    Propagation, ScrollDelta, SharedHandler, WindowFlags,
};
pub use program::{ActiveProgram, Program};
pub use shader::{read_source, Shader, ShaderKind};
pub use texture::{PixelFormat, Texture, TextureImage};
pub use uniform::{Uniform, UniformLocation, UniformMatrix};
pub use window::{CurrentWindow, GlVersion, Platform, Window, WindowConfig};
