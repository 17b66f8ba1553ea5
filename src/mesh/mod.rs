//! Procedural meshes composed from the renderer's resource types.
//!
//! Geometry generation is split from GPU upload: the `*_geometry`
//! functions are pure and unit-tested, the mesh structs own the uploaded
//! buffers and know how to draw themselves.

mod cube;
mod quad;
mod vertex;

pub use cube::{cube_geometry, Cube};
pub use quad::{quad_geometry, Quad};
pub use vertex::{Vertex2, Vertex3};
