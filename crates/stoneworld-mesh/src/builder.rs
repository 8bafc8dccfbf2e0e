//! Parallel heightfield mesh builder.
//!
//! The grid is sampled row by row on a rayon pool, then triangulated and
//! shaded on the calling thread. Every vertex depends only
//! on its own world position, so the output is the same for any worker count.

use glam::Vec3;
use rayon::prelude::*;
use stoneworld_config::{ConfigurationError, GenerationParameters};
use stoneworld_terrain::{TerrainSampler, color_to_rgba8};

use crate::buffers::MeshBuffers;
use crate::tangents::{compute_smooth_normals, compute_tangents};

/// Texture repeats across the full world along each axis.
pub const UV_TILING: f32 = 10.0;

/// Per-vertex output of the sampling pass.
#[derive(Clone, Copy, Debug, Default)]
struct HeightfieldVertex {
    position: Vec3,
    uv: [f32; 2],
    color: [u8; 4],
}

/// Grid placement shared by every row band.
struct GridLayout {
    vertices_x: u32,
    vertices_y: u32,
    resolution: f64,
    half_x: f64,
    half_y: f64,
}

impl GridLayout {
    fn vertex(&self, sampler: &TerrainSampler, col: u32, row: u32) -> HeightfieldVertex {
        let x = col as f64 * self.resolution - self.half_x;
        let y = row as f64 * self.resolution - self.half_y;
        let sample = sampler.sample(x, y);
        HeightfieldVertex {
            position: Vec3::new(x as f32, y as f32, sample.height as f32),
            uv: [
                col as f32 / (self.vertices_x - 1) as f32 * UV_TILING,
                row as f32 / (self.vertices_y - 1) as f32 * UV_TILING,
            ],
            color: color_to_rgba8(sample.color),
        }
    }

    fn fill_row(&self, sampler: &TerrainSampler, row: u32, slots: &mut [HeightfieldVertex]) {
        for (col, slot) in slots.iter_mut().enumerate() {
            *slot = self.vertex(sampler, col as u32, row);
        }
    }
}

/// Builds terrain meshes from [`GenerationParameters`].
#[derive(Clone, Debug)]
pub struct TerrainMeshBuilder {
    threads: usize,
}

impl Default for TerrainMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainMeshBuilder {
    /// A builder using one worker per logical CPU.
    pub fn new() -> Self {
        Self::with_threads(num_cpus::get())
    }

    /// A builder using `threads` workers (at least one).
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Number of sampling workers.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Generate the mesh for `params`.
    ///
    /// Parameters are used as given; run them through
    /// [`GenerationParameters::configure`] first to clamp them. Fails on
    /// non-finite values, a grid with fewer than two vertices per axis, or a
    /// grid too large for `u32` indices.
    pub fn build(&self, params: &GenerationParameters) -> Result<MeshBuffers, ConfigurationError> {
        let (vertices_x, vertices_y) = params.validate()?;
        let _span = tracing::info_span!("build_terrain_mesh", vertices_x, vertices_y).entered();

        let sampler = TerrainSampler::new(params.heightmap_params(), &params.biomes, params.extent());
        let layout = GridLayout {
            vertices_x,
            vertices_y,
            resolution: params.resolution,
            half_x: params.size_x * 0.5,
            half_y: params.size_y * 0.5,
        };

        let grid = self.sample_grid(&sampler, &layout);
        let indices = triangulate(vertices_x, vertices_y);

        let positions: Vec<[f32; 3]> = grid.iter().map(|v| v.position.to_array()).collect();
        let uvs: Vec<[f32; 2]> = grid.iter().map(|v| v.uv).collect();
        let colors: Vec<[u8; 4]> = grid.iter().map(|v| v.color).collect();
        let normals = compute_smooth_normals(&positions, &indices);
        let tangents = compute_tangents(&positions, &normals, &uvs, &indices);

        let mesh = MeshBuffers {
            positions,
            normals,
            uvs,
            tangents,
            colors,
            indices,
            vertices_x,
            vertices_y,
        };
        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "World generation complete"
        );
        Ok(mesh)
    }

    fn sample_grid(&self, sampler: &TerrainSampler, layout: &GridLayout) -> Vec<HeightfieldVertex> {
        let width = layout.vertices_x as usize;
        let rows = layout.vertices_y as usize;
        let mut grid = vec![HeightfieldVertex::default(); width * rows];

        let workers = self.threads.min(rows);
        tracing::debug!(workers, rows, "Sampling heightfield");

        let fill = |row: usize, slots: &mut [HeightfieldVertex]| {
            layout.fill_row(sampler, row as u32, slots);
        };
        if workers == 1 {
            grid.chunks_mut(width).enumerate().for_each(|(row, slots)| fill(row, slots));
            return grid;
        }

        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| {
                grid.par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(row, slots)| fill(row, slots));
            }),
            Err(e) => {
                tracing::warn!("Sampling on the calling thread, no worker pool: {e}");
                grid.chunks_mut(width).enumerate().for_each(|(row, slots)| fill(row, slots));
            }
        }
        grid
    }
}

/// Two triangles per grid cell: `(BL, TL, BR)` and `(BR, TL, TR)`, where
/// `BL = row * vertices_x + col`.
fn triangulate(vertices_x: u32, vertices_y: u32) -> Vec<u32> {
    let cells = (vertices_x as usize - 1) * (vertices_y as usize - 1);
    let mut indices = Vec::with_capacity(cells * 6);
    for row in 0..vertices_y - 1 {
        for col in 0..vertices_x - 1 {
            let bl = row * vertices_x + col;
            let br = bl + 1;
            let tl = bl + vertices_x;
            let tr = tl + 1;
            indices.extend_from_slice(&[bl, tl, br, br, tl, tr]);
        }
    }
    indices
}
