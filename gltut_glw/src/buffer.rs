//! Vertex arrays and the buffers that feed them.
//!
//! A [vertex buffer object (VBO)](vbo) is vertex data that's been sent to the graphics card.
//! Vertices don't have to be spatial; they can carry colors, texture coordinates or anything else
//! the vertex shader reads. An element buffer (EBO) is a list of indices into that data, so shapes
//! that share corners (a rectangle is two triangles sharing a side) don't repeat vertices. A vertex
//! array object (VAO) remembers which buffers are bound and how their contents are laid out.
//!
//! [vbo]: https://en.wikipedia.org/wiki/Vertex_buffer_object

use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::{size_of, size_of_val};

use gl::types::*;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::{Handle, Resource};
use crate::utils;

pub(crate) enum BufferObject {}

impl Resource for BufferObject {
    const NAME: &'static str = "buffer";

    unsafe fn destroy(id: GLuint) {
        gl::DeleteBuffers(1, &id);
    }
}

pub(crate) enum VertexArrayObject {}

impl Resource for VertexArrayObject {
    const NAME: &'static str = "vertex array";

    unsafe fn destroy(id: GLuint) {
        gl::DeleteVertexArrays(1, &id);
    }
}

fn gen_buffer() -> Result<Handle<BufferObject>> {
    let mut id = 0;
    unsafe { gl::GenBuffers(1, &mut id) };

    Handle::new(id).ok_or_else(|| Error::Creation(String::from("buffer object")))
}

fn upload<T: Copy>(target: GLenum, data: &[T]) -> Result<()> {
    unsafe {
        gl::BufferData(
            target,
            size_of_val(data) as GLsizeiptr,
            data.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        );
    }

    utils::check_error("glBufferData")
}

/// How one float attribute is laid out inside an interleaved vertex.
///
/// `stride` and `offset` are in bytes, the same as `glVertexAttribPointer` takes them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub index: GLuint,
    pub components: GLint,
    pub stride: usize,
    pub offset: usize,
}

impl VertexAttribute {
    /// An attribute of `components` floats at `offset` bytes into a vertex of type `V`.
    pub fn of<V>(index: GLuint, components: GLint, offset: usize) -> Self {
        Self { index, components, stride: size_of::<V>(), offset }
    }
}

pub struct VertexArray<'gl> {
    handle: Handle<VertexArrayObject>,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> VertexArray<'gl> {
    pub fn new(_gl: &'gl Context) -> Result<Self> {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };

        let handle = Handle::new(id)
            .ok_or_else(|| Error::Creation(String::from("vertex array object")))?;

        Ok(Self { handle, _context: PhantomData })
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    pub fn bind(&self) -> Result<()> {
        unsafe { gl::BindVertexArray(self.id()) };
        utils::check_error("glBindVertexArray")
    }

    pub fn unbind(&self) {
        unsafe { gl::BindVertexArray(0) };
    }

    /// Describes and enables one attribute of the buffer bound to `GL_ARRAY_BUFFER`.
    ///
    /// The vertex array has to be bound.
    pub fn attribute(&self, attr: &VertexAttribute) -> Result<()> {
        unsafe {
            gl::VertexAttribPointer(
                attr.index,
                attr.components,
                gl::FLOAT,
                gl::FALSE,
                attr.stride as GLsizei,
                attr.offset as *const c_void,
            );
            gl::EnableVertexAttribArray(attr.index);
        }

        utils::check_error("glVertexAttribPointer")
    }
}

pub struct VertexBuffer<'gl> {
    handle: Handle<BufferObject>,
    len: usize,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> VertexBuffer<'gl> {
    /// Creates a buffer, binds it to `GL_ARRAY_BUFFER` and uploads `data` into it.
    pub fn new<T: Copy>(_gl: &'gl Context, data: &[T]) -> Result<Self> {
        let buffer = Self { handle: gen_buffer()?, len: data.len(), _context: PhantomData };

        buffer.bind()?;
        upload(gl::ARRAY_BUFFER, data)?;

        Ok(buffer)
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    /// Number of vertices uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bind(&self) -> Result<()> {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id()) };
        utils::check_error("glBindBuffer")
    }
}

pub struct ElementBuffer<'gl> {
    handle: Handle<BufferObject>,
    len: usize,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> ElementBuffer<'gl> {
    /// Creates a buffer, binds it to `GL_ELEMENT_ARRAY_BUFFER` and uploads `indices` into it.
    ///
    /// The element binding is part of the vertex array state, so bind the vertex array first.
    pub fn new(_gl: &'gl Context, indices: &[u32]) -> Result<Self> {
        let buffer = Self { handle: gen_buffer()?, len: indices.len(), _context: PhantomData };

        buffer.bind()?;
        upload(gl::ELEMENT_ARRAY_BUFFER, indices)?;

        Ok(buffer)
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    /// Number of indices uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bind(&self) -> Result<()> {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id()) };
        utils::check_error("glBindBuffer")
    }
}
