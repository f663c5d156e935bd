use bytemuck::{Pod, Zeroable};

/// Aspect ratio assumed when the surface image cannot be decoded.
const FALLBACK_ASPECT: f32 = 1350.0 / 900.0;

/// One grid vertex: model-space position plus texture coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl SurfaceVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

/// CPU-side tessellated rectangle. Built once at startup and never rebuilt;
/// resizes are absorbed by the camera fov instead.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Builds a `subdivisions x subdivisions` grid centred on the origin.
    ///
    /// `width` and `height` are world units. uv spans `[0, 1]` on both axes
    /// with v growing upward, matching the vertically flipped texture upload.
    pub fn plane(width: f32, height: f32, subdivisions: u32) -> Self {
        let cells = subdivisions.max(1);
        let side = cells + 1;

        let mut vertices = Vec::with_capacity((side * side) as usize);
        for row in 0..side {
            for col in 0..side {
                let u = col as f32 / cells as f32;
                let v = row as f32 / cells as f32;
                vertices.push(SurfaceVertex {
                    position: [(u - 0.5) * width, (v - 0.5) * height, 0.0],
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
        for row in 0..cells {
            for col in 0..cells {
                let base = row * side + col;
                indices.extend_from_slice(&[
                    base,
                    base + 1,
                    base + side,
                    base + 1,
                    base + side + 1,
                    base + side,
                ]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// World-space extent of the surface: the width equals the initial viewport
/// width in pixels and the height follows the image aspect ratio.
pub fn surface_extent(viewport_width: u32, image_size: Option<(u32, u32)>) -> (f32, f32) {
    let width = viewport_width.max(1) as f32;
    let aspect = match image_size {
        Some((w, h)) if w > 0 && h > 0 => w as f32 / h as f32,
        _ => FALLBACK_ASPECT,
    };
    (width, width / aspect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_the_struct() {
        assert_eq!(std::mem::size_of::<SurfaceVertex>(), 20);
        assert_eq!(SurfaceVertex::LAYOUT.array_stride, 20);
        let attributes = SurfaceVertex::LAYOUT.attributes;
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].offset, 12);
    }

    #[test]
    fn default_density_grid_has_expected_counts() {
        let mesh = SurfaceMesh::plane(1350.0, 900.0, 50);
        assert_eq!(mesh.vertices.len(), 51 * 51);
        assert_eq!(mesh.indices.len(), 50 * 50 * 6);
        assert_eq!(mesh.index_count(), 15_000);
    }

    #[test]
    fn corners_span_the_extent_and_unit_uvs() {
        let mesh = SurfaceMesh::plane(100.0, 60.0, 4);
        let first = mesh.vertices.first().copied().unwrap();
        let last = mesh.vertices.last().copied().unwrap();

        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(first.position, [-50.0, -30.0, 0.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
        assert_eq!(last.position, [50.0, 30.0, 0.0]);

        // Even subdivision counts put a vertex exactly on the centre.
        let centre = mesh.vertices[(mesh.vertices.len() - 1) / 2];
        assert_eq!(centre.uv, [0.5, 0.5]);
        assert_eq!(centre.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn every_vertex_is_flat_before_displacement() {
        let mesh = SurfaceMesh::plane(200.0, 120.0, 7);
        assert!(mesh.vertices.iter().all(|vertex| vertex.position[2] == 0.0));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = SurfaceMesh::plane(10.0, 10.0, 3);
        let limit = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&index| index < limit));
    }

    #[test]
    fn single_cell_plane_is_two_triangles() {
        let mesh = SurfaceMesh::plane(1.0, 1.0, 1);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn zero_subdivisions_clamp_to_one_cell() {
        let mesh = SurfaceMesh::plane(1.0, 1.0, 0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn surface_extent_follows_the_image_ratio() {
        assert_eq!(surface_extent(1350, Some((1350, 900))), (1350.0, 900.0));

        let (width, height) = surface_extent(1920, Some((1600, 800)));
        assert_eq!(width, 1920.0);
        assert_eq!(height, 960.0);

        // Missing or degenerate image dimensions fall back to 1350:900.
        let (width, height) = surface_extent(1350, None);
        assert_eq!((width, height), (1350.0, 900.0));
        let (_, fallback_height) = surface_extent(1350, Some((0, 10)));
        assert_eq!(fallback_height, 900.0);
    }
}
