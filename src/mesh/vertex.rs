//! Vertex records shared by the procedural meshes.
//!
//! The structs are `#[repr(C)]` and `Pod` so a `&[Vertex]` casts straight
//! to the byte slice [`VertexBuffer::new`] uploads, and each carries the
//! [`BufferLayout`] describing its own packing.
//!
//! [`VertexBuffer::new`]: crate::renderer::VertexBuffer::new

use bytemuck::{Pod, Zeroable};

use crate::renderer::BufferLayout;

/// Position, flat normal and texture coordinate. 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex3 {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex3 {
    pub fn layout() -> BufferLayout {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(3).push::<f32>(3).push::<f32>(2);
        layout
    }
}

/// 2D position and texture coordinate. 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex2 {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex2 {
    pub fn layout() -> BufferLayout {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn layouts_match_struct_sizes() {
        assert_eq!(Vertex3::layout().stride() as usize, size_of::<Vertex3>());
        assert_eq!(Vertex2::layout().stride() as usize, size_of::<Vertex2>());
    }

    #[test]
    fn layout_offsets_match_field_order() {
        let layout = Vertex3::layout();
        let offsets: Vec<u32> = layout.elements().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, [0, 12, 24]);
    }

    #[test]
    fn records_cast_to_plain_bytes() {
        let vertices = [Vertex2 {
            position: [1.0, 2.0],
            uv: [0.5, 0.5],
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), size_of::<Vertex2>());
    }
}
