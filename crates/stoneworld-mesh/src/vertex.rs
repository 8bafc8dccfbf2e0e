//! Interleaved vertex format for GPU upload.

/// One interleaved terrain vertex, 52 bytes.
///
/// Layout:
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]`
///   - `[32..48]` tangent `[f32; 4]`, handedness in `w`
///   - `[48..52]` color RGBA8
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
    pub color: [u8; 4],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 52]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets() {
        assert_eq!(std::mem::offset_of!(TerrainVertex, normal), 12);
        assert_eq!(std::mem::offset_of!(TerrainVertex, uv), 24);
        assert_eq!(std::mem::offset_of!(TerrainVertex, tangent), 32);
        assert_eq!(std::mem::offset_of!(TerrainVertex, color), 48);
    }

    #[test]
    fn test_casts_to_bytes() {
        let v = TerrainVertex {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.5, 0.5],
            tangent: [1.0, 0.0, 0.0, 1.0],
            color: [10, 20, 30, 255],
        };
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 52);
        assert_eq!(&bytes[48..], &[10, 20, 30, 255]);
    }
}
