use nalgebra::Vector4;

/// RGBA color with float components in [0.0, 1.0] (x = r, y = g, z = b, w = a).
pub type Color4 = Vector4<f32>;

pub fn white() -> Color4 {
    Color4::new(1.0, 1.0, 1.0, 1.0)
}

pub fn black() -> Color4 {
    Color4::new(0.0, 0.0, 0.0, 1.0)
}

pub fn opaque(rgb: &nalgebra::Vector3<f32>) -> Color4 {
    Color4::new(rgb.x, rgb.y, rgb.z, 1.0)
}

/// Converts one channel to a byte the way a clamped RGBA byte array stores `channel * 255`.
pub fn channel_to_u8(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn to_rgba_u8(color: &Color4) -> [u8; 4] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
        channel_to_u8(color.w),
    ]
}
