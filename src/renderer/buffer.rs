//! RAII wrappers around GL buffer objects.
//!
//! Both types upload their contents once at construction and release the
//! GPU object on drop. They hold the shared context handle, so dropping
//! them anywhere on the context thread is safe; the handles are not `Send`,
//! which keeps them on that thread in the first place.

use std::rc::Rc;

use glow::HasContext;

use crate::error::{RenderError, RenderResult};
use crate::renderer::debug::{gl_check, gl_cleanup};

/// GPU-side vertex data, bound to `GL_ARRAY_BUFFER`.
pub struct VertexBuffer {
    gl: Rc<glow::Context>,
    raw: glow::Buffer,
    len: usize,
}

impl VertexBuffer {
    /// Creates the buffer object and uploads `data` as static draw data.
    pub fn new(gl: &Rc<glow::Context>, data: &[u8]) -> RenderResult<Self> {
        let raw = gl_check!(gl, gl.create_buffer()).map_err(RenderError::ObjectCreation)?;
        let buffer = Self {
            gl: Rc::clone(gl),
            raw,
            len: data.len(),
        };
        buffer.bind();
        gl_check!(gl, gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW));
        Ok(buffer)
    }

    pub fn bind(&self) {
        gl_check!(&self.gl, self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.raw)));
    }

    pub fn unbind(&self) {
        gl_check!(&self.gl, self.gl.bind_buffer(glow::ARRAY_BUFFER, None));
    }

    /// Uploaded size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        gl_cleanup!(&self.gl, self.gl.delete_buffer(self.raw));
    }
}

/// GPU-side triangle indices, bound to `GL_ELEMENT_ARRAY_BUFFER`.
///
/// Indices are 32-bit; draw calls issued through
/// [`Renderer::draw`](crate::renderer::Renderer::draw) cover the full
/// uploaded count.
pub struct IndexBuffer {
    gl: Rc<glow::Context>,
    raw: glow::Buffer,
    count: usize,
}

impl IndexBuffer {
    /// Creates the buffer object and uploads `indices`.
    ///
    /// The element-array binding is recorded in whichever vertex array is
    /// bound at the time, so mesh constructors create their index buffer
    /// while their vertex array is still bound.
    pub fn new(gl: &Rc<glow::Context>, indices: &[u32]) -> RenderResult<Self> {
        let raw = gl_check!(gl, gl.create_buffer()).map_err(RenderError::ObjectCreation)?;
        let buffer = Self {
            gl: Rc::clone(gl),
            raw,
            count: indices.len(),
        };
        buffer.bind();
        gl_check!(
            gl,
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            )
        );
        Ok(buffer)
    }

    pub fn bind(&self) {
        gl_check!(
            &self.gl,
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.raw))
        );
    }

    pub fn unbind(&self) {
        gl_check!(&self.gl, self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None));
    }

    /// Number of indices uploaded.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        gl_cleanup!(&self.gl, self.gl.delete_buffer(self.raw));
    }
}
