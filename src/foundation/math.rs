pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Quantize a unit-interval coverage/alpha value to 0..=255.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Straight-alpha source-over of `src` (with coverage `alpha`) onto an opaque-or-not `dst`.
pub(crate) fn blend_over(dst: [u8; 4], src: [u8; 3], alpha: u8) -> [u8; 4] {
    let a = u16::from(alpha);
    let inv = 255 - a;
    let ch = |s: u8, d: u8| {
        (mul_div255_u16(u16::from(s), a) + mul_div255_u16(u16::from(d), inv)).min(255) as u8
    };
    let out_a = a + mul_div255_u16(u16::from(dst[3]), inv);
    [
        ch(src[0], dst[0]),
        ch(src[1], dst[1]),
        ch(src[2], dst[2]),
        out_a.min(255) as u8,
    ]
}
