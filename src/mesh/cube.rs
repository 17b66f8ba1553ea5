//! Procedural cube mesh.

use std::rc::Rc;

use glam::Mat4;

use crate::error::RenderResult;
use crate::renderer::{IndexBuffer, Renderer, Shader, VertexArray, VertexBuffer};

use super::vertex::Vertex3;

const FACE_COUNT: usize = 6;
const VERTEX_COUNT: usize = FACE_COUNT * 4;
const INDEX_COUNT: usize = FACE_COUNT * 6;

/// Builds the cube's vertex and index lists on the CPU.
///
/// Four vertices per face rather than eight shared corners, so every face
/// carries its own flat normal and a full texture-coordinate quad. Faces
/// wind counter-clockwise seen from outside.
pub fn cube_geometry(size: f32) -> (Vec<Vertex3>, Vec<u32>) {
    let h = size * 0.5;

    // outward normal and the face's corners, counter-clockwise from outside
    let faces: [([f32; 3], [[f32; 3]; 4]); FACE_COUNT] = [
        (
            [0.0, 0.0, 1.0],
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        ),
    ];
    const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(VERTEX_COUNT);
    let mut indices = Vec::with_capacity(INDEX_COUNT);
    for (face, (normal, corners)) in faces.iter().enumerate() {
        for (corner, position) in corners.iter().enumerate() {
            vertices.push(Vertex3 {
                position: *position,
                normal: *normal,
                uv: CORNER_UVS[corner],
            });
        }
        let base = (face * 4) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// A cube owning its GPU resources, ready for indexed drawing.
pub struct Cube {
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    size: f32,
}

impl Cube {
    /// Generates geometry for a cube of side `size` centered at the origin
    /// and uploads it.
    pub fn new(gl: &Rc<glow::Context>, size: f32) -> RenderResult<Self> {
        let (vertices, indices) = cube_geometry(size);

        let mut vertex_array = VertexArray::new(gl)?;
        let vertex_buffer = VertexBuffer::new(gl, bytemuck::cast_slice(&vertices))?;
        vertex_array.add_buffer(&vertex_buffer, &Vertex3::layout())?;
        // created while the array is bound so the element binding is captured
        let index_buffer = IndexBuffer::new(gl, &indices)?;
        vertex_array.unbind();

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            size,
        })
    }

    /// Uploads `u_MVP` from the three matrices and draws all 12 triangles.
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

    pub fn size(&self) -> f32 {
        self.size
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
    use glam::Vec3;

    #[test]
    fn four_vertices_per_face_six_indices_per_face() {
        let (vertices, indices) = cube_geometry(2.0);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn vertices_lie_on_the_cube_corners() {
        let size = 2.0;
        let h = size * 0.5;
        let (vertices, _) = cube_geometry(size);

        for vertex in &vertices {
            for coord in vertex.position {
                assert_eq!(coord.abs(), h, "corner coordinate off the surface");
            }
        }
    }

    #[test]
    fn geometry_scales_with_size() {
        let (vertices, _) = cube_geometry(3.0);
        assert!(vertices.iter().all(|v| v
            .position
            .iter()
            .all(|coord| coord.abs() == 1.5)));
    }

    #[test]
    fn faces_carry_flat_outward_normals() {
        let size = 2.0;
        let h = size * 0.5;
        let (vertices, _) = cube_geometry(size);

        for face in vertices.chunks_exact(4) {
            let normal = Vec3::from_array(face[0].normal);
            // unit-length axis normal, shared by the whole face
            assert_eq!(normal.length(), 1.0);
            assert!(face.iter().all(|v| v.normal == face[0].normal));
            // the face lies in the plane position . normal == +h
            for vertex in face {
                let position = Vec3::from_array(vertex.position);
                assert_eq!(position.dot(normal), h, "normal points into the cube");
            }
        }
    }

    #[test]
    fn indices_stay_in_range_and_wind_counter_clockwise() {
        let (vertices, indices) = cube_geometry(2.0);

        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        for triangle in indices.chunks_exact(3) {
            let [a, b, c] =
                [triangle[0], triangle[1], triangle[2]].map(|i| &vertices[i as usize]);
            // a triangle never spans two faces
            assert_eq!(a.normal, b.normal);
            assert_eq!(a.normal, c.normal);

            let pa = Vec3::from_array(a.position);
            let pb = Vec3::from_array(b.position);
            let pc = Vec3::from_array(c.position);
            let winding = (pb - pa).cross(pc - pa).dot(Vec3::from_array(a.normal));
            assert!(winding > 0.0, "face winds clockwise seen from outside");
        }
    }

    #[test]
    fn each_face_covers_the_full_texture_quad() {
        let (vertices, _) = cube_geometry(2.0);
        for face in vertices.chunks_exact(4) {
            let uvs: Vec<[f32; 2]> = face.iter().map(|v| v.uv).collect();
            assert_eq!(uvs, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        }
    }
}
