use log::{debug, warn};

use crate::error::{BootstrapError, Result};
use crate::gpu::{BufferId, Gpu, VertexArrayId, VertexLayoutBinding};

pub const FLOATS_PER_VERTEX: usize = 3;

/// Vertex positions living on the graphics card, together with the vertex array object that
/// remembers how to read them. Never updated after upload.
#[derive(Debug, PartialEq)]
pub struct GeometryBuffer {
    vao: VertexArrayId,
    vbo: BufferId,
    binding: VertexLayoutBinding,
    vertex_count: usize,
}

impl GeometryBuffer {
    /// Uploads `positions` (x, y, z per vertex) in one transfer and binds them to slot 0.
    ///
    /// The vertex array and array buffer are unbound again before returning so later calls can't
    /// modify them by accident.
    pub fn upload<G: Gpu>(gpu: &mut G, positions: &[f32]) -> Result<Self> {
        if positions.is_empty() {
            return Err(BootstrapError::MalformedGeometry(String::from("no vertices")));
        }

        if positions.len() % FLOATS_PER_VERTEX != 0 {
            return Err(BootstrapError::MalformedGeometry(format!(
                "{} floats is not a whole number of {}-component vertices",
                positions.len(), FLOATS_PER_VERTEX
            )));
        }

        let vertex_count = positions.len() / FLOATS_PER_VERTEX;
        if vertex_count % 3 != 0 {
            warn!(
                "{} vertices is not a whole number of triangles; the last {} will not be drawn",
                vertex_count, vertex_count % 3
            );
        }

        let binding = VertexLayoutBinding::POSITION;

        let vao = gpu.create_vertex_array();
        gpu.bind_vertex_array(Some(vao));

        let vbo = gpu.create_buffer();
        gpu.bind_array_buffer(Some(vbo));
        gpu.upload_static(positions);
        gpu.vertex_attrib(&binding);
        gpu.bind_array_buffer(None);

        gpu.bind_vertex_array(None);

        debug!("uploaded {} vertices to buffer {:?} in {:?}", vertex_count, vbo, vao);

        Ok(Self { vao, vbo, binding, vertex_count })
    }

    pub fn vertex_array(&self) -> VertexArrayId { self.vao }

    pub fn buffer(&self) -> BufferId { self.vbo }

    pub fn binding(&self) -> &VertexLayoutBinding { &self.binding }

    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Vertices handed to the draw call: complete triangles only.
    pub fn drawn_vertex_count(&self) -> usize {
        self.vertex_count - self.vertex_count % 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_buffer(self.vbo);
        gpu.delete_vertex_array(self.vao);
    }
}
