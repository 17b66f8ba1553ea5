//! Textured 2D quad mesh.

use std::rc::Rc;

use glam::Mat4;

use crate::error::RenderResult;
use crate::renderer::{IndexBuffer, Renderer, Shader, VertexArray, VertexBuffer};

use super::vertex::Vertex2;

/// Builds a `width` by `height` quad centered at the origin, with texture
/// coordinates covering the full image.
pub fn quad_geometry(width: f32, height: f32) -> (Vec<Vertex2>, Vec<u32>) {
    let hw = width * 0.5;
    let hh = height * 0.5;

    let vertices = vec![
        Vertex2 {
            position: [-hw, -hh],
            uv: [0.0, 0.0],
        },
        Vertex2 {
            position: [hw, -hh],
            uv: [1.0, 0.0],
        },
        Vertex2 {
            position: [hw, hh],
            uv: [1.0, 1.0],
        },
        Vertex2 {
            position: [-hw, hh],
            uv: [0.0, 1.0],
        },
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

/// A screen-space quad owning its GPU resources. Pairs with an
/// orthographic projection and a [`Texture`](crate::renderer::Texture)
/// bound by the caller.
pub struct Quad {
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
}

impl Quad {
    pub fn new(gl: &Rc<glow::Context>, width: f32, height: f32) -> RenderResult<Self> {
        let (vertices, indices) = quad_geometry(width, height);

        let mut vertex_array = VertexArray::new(gl)?;
        let vertex_buffer = VertexBuffer::new(gl, bytemuck::cast_slice(&vertices))?;
        vertex_array.add_buffer(&vertex_buffer, &Vertex2::layout())?;
        // created while the array is bound so the element binding is captured
        let index_buffer = IndexBuffer::new(gl, &indices)?;
        vertex_array.unbind();

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
        })
    }

    /// Uploads `u_MVP` from the three matrices and draws both triangles.
    pub fn render(
        &self,
        renderer: &Renderer,
        shader: &Shader,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) {
        let mvp = *projection * *view * *model;
        shader.bind().set_mat4("u_MVP", &mvp);
        renderer.draw(&self.vertex_array, &self.index_buffer, shader);
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &IndexBuffer {
        &self.index_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn quad_is_two_triangles_over_four_vertices() {
        let (vertices, indices) = quad_geometry(200.0, 200.0);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices, [0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn records_are_sixteen_bytes() {
        let (vertices, _) = quad_geometry(1.0, 1.0);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(size_of::<Vertex2>(), 16);
        assert_eq!(bytes.len(), 4 * 16);
    }

    #[test]
    fn dimensions_split_evenly_around_the_origin() {
        let (vertices, _) = quad_geometry(200.0, 100.0);
        assert_eq!(vertices[0].position, [-100.0, -50.0]);
        assert_eq!(vertices[2].position, [100.0, 50.0]);
    }

    #[test]
    fn texture_coordinates_cover_the_unit_square() {
        let (vertices, _) = quad_geometry(64.0, 64.0);
        let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| v.uv).collect();
        assert_eq!(uvs, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }
}
