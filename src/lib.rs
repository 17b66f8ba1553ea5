//! A small OpenGL rendering core built on [glow].
//!
//! The crate owns the GPU side of a simple scene: vertex and index
//! buffers, vertex arrays described by [`BufferLayout`], shader programs
//! with cached uniform locations, 2D textures, and a [`Renderer`] that
//! clears and issues error-checked indexed draws. The procedural [`Cube`]
//! and [`Quad`] meshes compose those resource types and draw themselves.
//!
//! Windowing and context creation stay with the caller: every constructor
//! takes the shared [`glow::Context`] handle, and all resources release
//! their GL objects when dropped. The handles are reference-counted
//! without atomics, so nothing here is `Send`; that matches GL's rule
//! that a context is current on exactly one thread.
//!
//! # Shader files
//!
//! Programs load from combined source files split by `#shader vertex` and
//! `#shader fragment` markers; see [`ShaderSource::parse`]. The shaders
//! shipped under `res/shaders/` use a small uniform vocabulary: `u_MVP`
//! (and `u_Model` where lighting needs world positions), `u_Color`,
//! `u_LightPos` and `u_ViewPos` for Phong shading, and the
//! `u_UseTexture`/`u_Texture` pair to switch between sampling and flat
//! color.
//!
//! # Safety
//!
//! All GL calls require a valid context that is current on the calling
//! thread. The raw calls stay `unsafe` inside the crate; the public
//! surface is safe given that context requirement.
//!
//! [glow]: https://docs.rs/glow

pub mod error;
pub mod logging;
pub mod mesh;
pub mod renderer;

pub use glow;

pub use error::{RenderError, RenderResult};
pub use mesh::{Cube, Quad, Vertex2, Vertex3};
pub use renderer::{
    AttributeKind, BoundShader, BufferElement, BufferLayout, IndexBuffer, LayoutScalar, Renderer,
    Shader, ShaderSource, ShaderStage, Texture, TextureImage, VertexArray, VertexBuffer,
};
