//! Per-vertex normal and tangent post-pass over an indexed triangle list.

use glam::{Vec2, Vec3};

/// UV-space triangles with a smaller signed area are skipped for tangents.
const UV_AREA_EPSILON: f32 = 1e-12;

/// Area-weighted smooth normals.
///
/// Each triangle `(v0, v1, v2)` contributes `(v2 - v0) x (v1 - v0)`, whose
/// length is twice its area. With the grid winding this points up (`+Z`).
/// Vertices no triangle touches get `+Z`.
pub fn compute_smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = Vec3::from(positions[i0]);
        let p1 = Vec3::from(positions[i1]);
        let p2 = Vec3::from(positions[i2]);
        let face = (p2 - p0).cross(p1 - p0);
        accum[i0] += face;
        accum[i1] += face;
        accum[i2] += face;
    }

    accum
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            let n = if n == Vec3::ZERO { Vec3::Z } else { n };
            n.to_array()
        })
        .collect()
}

/// Per-vertex tangents from UV gradients, Gram-Schmidt orthogonalized
/// against `normals`, with the bitangent sign in `w`.
///
/// Vertices without a usable UV gradient fall back to `+X` projected onto
/// the tangent plane.
pub fn compute_tangents(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    uvs: &[[f32; 2]],
    indices: &[u32],
) -> Vec<[f32; 4]> {
    let mut tan_u = vec![Vec3::ZERO; positions.len()];
    let mut tan_v = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = Vec3::from(positions[i0]);
        let e1 = Vec3::from(positions[i1]) - p0;
        let e2 = Vec3::from(positions[i2]) - p0;
        let w0 = Vec2::from(uvs[i0]);
        let d1 = Vec2::from(uvs[i1]) - w0;
        let d2 = Vec2::from(uvs[i2]) - w0;

        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < UV_AREA_EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let sdir = (e1 * d2.y - e2 * d1.y) * r;
        let tdir = (e2 * d1.x - e1 * d2.x) * r;
        for i in [i0, i1, i2] {
            tan_u[i] += sdir;
            tan_v[i] += tdir;
        }
    }

    normals
        .iter()
        .zip(tan_u.iter().zip(&tan_v))
        .map(|(n, (&t, &b))| {
            let n = Vec3::from(*n);
            let mut tangent = (t - n * n.dot(t)).normalize_or_zero();
            if tangent == Vec3::ZERO {
                tangent = (Vec3::X - n * n.dot(Vec3::X)).normalize_or_zero();
            }
            if tangent == Vec3::ZERO {
                tangent = Vec3::Y;
            }
            let w = if n.cross(tangent).dot(b) < 0.0 { -1.0 } else { 1.0 };
            [tangent.x, tangent.y, tangent.z, w]
        })
        .collect()
}
