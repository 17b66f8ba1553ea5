//! Vertex array objects tying buffers to attribute layouts.

use std::rc::Rc;

use glow::HasContext;

use crate::error::{RenderError, RenderResult};
use crate::renderer::debug::{gl_check, gl_cleanup};
use crate::renderer::{BufferLayout, VertexBuffer};

/// A GL vertex array object plus the crate-side attribute slot counter.
///
/// Attribute slots are assigned in layout declaration order, continuing
/// across [`add_buffer`](Self::add_buffer) calls so several buffers can
/// feed one array without colliding.
pub struct VertexArray {
    gl: Rc<glow::Context>,
    raw: glow::VertexArray,
    next_slot: u32,
}

impl VertexArray {
    pub fn new(gl: &Rc<glow::Context>) -> RenderResult<Self> {
        let raw = gl_check!(gl, gl.create_vertex_array()).map_err(RenderError::ObjectCreation)?;
        Ok(Self {
            gl: Rc::clone(gl),
            raw,
            next_slot: 0,
        })
    }

    /// Attaches `buffer` under `layout`: binds both, then enables and
    /// points one attribute slot per layout element.
    ///
    /// Fails with [`RenderError::LayoutMismatch`] when the buffer's byte
    /// length is not a whole number of `layout.stride()` records (see
    /// [`BufferLayout::fits`]), which catches vertex structs drifting out
    /// of sync with their declared layout before the driver reads past
    /// the end.
    pub fn add_buffer(&mut self, buffer: &VertexBuffer, layout: &BufferLayout) -> RenderResult<()> {
        let stride = layout.stride();
        if !layout.fits(buffer.len()) {
            return Err(RenderError::LayoutMismatch {
                data_len: buffer.len(),
                stride,
            });
        }

        self.bind();
        buffer.bind();
        for element in layout.elements() {
            gl_check!(&self.gl, self.gl.enable_vertex_attrib_array(self.next_slot));
            gl_check!(
                &self.gl,
                self.gl.vertex_attrib_pointer_f32(
                    self.next_slot,
                    element.count as i32,
                    element.kind.gl_type(),
                    element.normalized(),
                    stride as i32,
                    element.offset as i32,
                )
            );
            self.next_slot += 1;
        }
        Ok(())
    }

    pub fn bind(&self) {
        gl_check!(&self.gl, self.gl.bind_vertex_array(Some(self.raw)));
    }

    pub fn unbind(&self) {
        gl_check!(&self.gl, self.gl.bind_vertex_array(None));
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        gl_cleanup!(&self.gl, self.gl.delete_vertex_array(self.raw));
    }
}
