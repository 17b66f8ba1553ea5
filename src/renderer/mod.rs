//! GPU resource types and the draw/clear façade.
//!
//! Every type here holds a shared [`glow::Context`] handle and releases
//! its GL object on drop. The handles are reference-counted but not
//! atomically so; nothing in this module is `Send`, which matches the GL
//! requirement that a context is only current on one thread.

pub(crate) mod debug;

mod buffer;
mod layout;
mod shader;
mod texture;
mod vertex_array;

pub use buffer::{IndexBuffer, VertexBuffer};
pub use layout::{AttributeKind, BufferElement, BufferLayout, LayoutScalar};
pub use shader::{BoundShader, Shader, ShaderSource, ShaderStage};
pub use texture::{Texture, TextureImage};
pub use vertex_array::VertexArray;

use std::rc::Rc;

use glow::HasContext;

use debug::gl_check;

/// Issues clears and indexed draws. Stateless apart from the context
/// handle; per-draw state comes in as arguments.
pub struct Renderer {
    gl: Rc<glow::Context>,
}

impl Renderer {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    /// Enables the pipeline state the draw path assumes: standard alpha
    /// blending and less-than depth testing.
    pub fn setup_default_state(&self) {
        gl_check!(&self.gl, self.gl.enable(glow::BLEND));
        gl_check!(
            &self.gl,
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA)
        );
        gl_check!(&self.gl, self.gl.enable(glow::DEPTH_TEST));
        gl_check!(&self.gl, self.gl.depth_func(glow::LESS));
    }

    pub fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        gl_check!(&self.gl, self.gl.clear_color(r, g, b, a));
    }

    /// Resets the color and depth targets for a new frame.
    pub fn clear(&self) {
        gl_check!(
            &self.gl,
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT)
        );
    }

    pub fn set_viewport(&self, width: i32, height: i32) {
        gl_check!(&self.gl, self.gl.viewport(0, 0, width, height));
    }

    /// Binds all three arguments, then draws the index buffer's full
    /// element count as triangles. Re-binding every call keeps the draw
    /// correct regardless of what ran before it.
    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();
        gl_check!(
            &self.gl,
            self.gl.draw_elements(
                glow::TRIANGLES,
                index_buffer.count() as i32,
                glow::UNSIGNED_INT,
                0,
            )
        );
    }

    /// The shared context handle, for callers that need to issue their own
    /// state calls.
    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}
