//! Structure-of-arrays mesh output.

use crate::vertex::TerrainVertex;

/// Vertex attributes and triangle indices of a generated terrain.
///
/// Vertex `(col, row)` lives at index `row * vertices_x + col`. Every
/// attribute array has `vertices_x * vertices_y` entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// World-space positions; `z` is height.
    pub positions: Vec<[f32; 3]>,
    /// Unit-length smooth normals.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates, tiled across the world.
    pub uvs: Vec<[f32; 2]>,
    /// Unit tangents with handedness (`±1`) in `w`.
    pub tangents: Vec<[f32; 4]>,
    /// RGBA8 vertex colors.
    pub colors: Vec<[u8; 4]>,
    /// Triangle list, 3 indices per triangle.
    pub indices: Vec<u32>,
    /// Grid vertex count along X.
    pub vertices_x: u32,
    /// Grid vertex count along Y.
    pub vertices_y: u32,
}

impl MeshBuffers {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index of grid vertex `(col, row)`.
    #[inline]
    pub fn vertex_index(&self, col: u32, row: u32) -> usize {
        row as usize * self.vertices_x as usize + col as usize
    }

    /// Height (`z`) of grid vertex `(col, row)`, if it exists.
    pub fn height_at(&self, col: u32, row: u32) -> Option<f32> {
        if col >= self.vertices_x || row >= self.vertices_y {
            return None;
        }
        self.positions.get(self.vertex_index(col, row)).map(|p| p[2])
    }

    /// Smallest and largest vertex height, `None` for an empty mesh.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.positions.iter().map(|p| p[2]).fold(None, |acc, h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Interleave the attribute arrays into GPU-ready vertices.
    ///
    /// Stops at the shortest attribute array.
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.tangents)
            .zip(&self.colors)
            .map(|((((&position, &normal), &uv), &tangent), &color)| TerrainVertex {
                position,
                normal,
                uv,
                tangent,
                color,
            })
            .collect()
    }

    /// Index buffer as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
