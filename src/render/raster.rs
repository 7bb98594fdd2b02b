use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{AtlasError, AtlasResult},
    foundation::math::{blend_over, unit_to_u8},
    present::adapter::PresentationFrame,
};

/// Page background.
pub const BACKGROUND_RGBA: [u8; 4] = [255, 255, 255, 255];
/// Glyph dot color (gray-900).
pub const GLYPH_RGB: [u8; 3] = [17, 24, 39];
/// Glyph dot radius in pixels at zoom 1.
pub const GLYPH_DOT_RADIUS: f64 = 6.0;

/// Rasterize `frame` as it looks `t_secs` after its frame change.
///
/// Layers, bottom to top: background, coherence overlay, glyph dots. The
/// distortion loop displaces the glyph layer. Labels are not drawn.
#[tracing::instrument(skip(frame), fields(frame = frame.frame.0))]
pub fn render_rgba(frame: &PresentationFrame, t_secs: f64) -> AtlasResult<RgbaImage> {
    let (w, h) = (frame.canvas.width, frame.canvas.height);
    if w == 0 || h == 0 {
        return Err(AtlasError::render("canvas width/height must be > 0"));
    }
    let mut img = RgbaImage::from_pixel(w, h, Rgba(BACKGROUND_RGBA));

    if let Some(overlay) = frame.overlay {
        let center_alpha = overlay.alpha_at(t_secs);
        if center_alpha > 0.0 {
            for (x, y, px) in img.enumerate_pixels_mut() {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let a = unit_to_u8(overlay.alpha_at_point(center_alpha, p));
                if a > 0 {
                    px.0 = blend_over(px.0, overlay.rgb, a);
                }
            }
        }
    }

    let offset = frame
        .distortion
        .map(|d| d.offset_at(t_secs))
        .unwrap_or(Vec2::ZERO);
    let radius = GLYPH_DOT_RADIUS * frame.zoom;
    for glyph in &frame.glyphs {
        let opacity = glyph.opacity_at(t_secs);
        if opacity > 0.0 {
            fill_disc(&mut img, glyph.anchor + offset, radius, GLYPH_RGB, opacity);
        }
    }

    Ok(img)
}

/// Render and write a PNG, creating parent directories as needed.
pub fn write_png(frame: &PresentationFrame, t_secs: f64, out: &Path) -> AtlasResult<()> {
    let img = render_rgba(frame, t_secs)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(out, image::ImageFormat::Png)
        .map_err(|e| AtlasError::render(format!("write png '{}': {e}", out.display())))
}

fn fill_disc(img: &mut RgbaImage, center: Point, radius: f64, rgb: [u8; 3], opacity: f64) {
    let (w, h) = img.dimensions();
    let x0 = (center.x - radius - 1.0).floor().max(0.0) as u32;
    let y0 = (center.y - radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((center.x + radius + 1.0).ceil().max(0.0) as u32).min(w);
    let y1 = ((center.y + radius + 1.0).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            // One-pixel linear edge for anti-aliasing.
            let coverage = (radius + 0.5 - (p - center).hypot()).clamp(0.0, 1.0);
            let a = unit_to_u8(coverage * opacity);
            if a > 0 {
                let px = img.get_pixel_mut(x, y);
                px.0 = blend_over(px.0, rgb, a);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
