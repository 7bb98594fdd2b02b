use crate::present::adapter::PresentationFrame;

/// Title shown above the atlas.
pub const TITLE: &str = "Recursive Glyph Atlas";
/// Footer credit.
pub const FOOTER: &str = "Powered by GlyphLogic";

/// Character grid size for terminal output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextGrid {
    pub cols: usize,
    pub rows: usize,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self { cols: 60, rows: 16 }
    }
}

/// Render a frame as plain text: header, a bordered glyph field, and a metrics line.
///
/// Glyph anchors are mapped from canvas pixels to grid cells; glyphs past the
/// right/bottom edge (high zoom) are clipped. Later glyphs overwrite earlier
/// ones in the same cell.
pub fn render_text(frame: &PresentationFrame, grid: TextGrid) -> String {
    let cols = grid.cols.max(1);
    let rows = grid.rows.max(1);
    let shade = frame.overlay.map_or(' ', |o| shade_char(o.alpha));
    let mut cells = vec![vec![shade; cols]; rows];

    let cw = f64::from(frame.canvas.width.max(1));
    let ch = f64::from(frame.canvas.height.max(1));
    for glyph in &frame.glyphs {
        let cx = (glyph.anchor.x / cw * cols as f64).floor();
        let cy = (glyph.anchor.y / ch * rows as f64).floor();
        if cx < 0.0 || cy < 0.0 {
            continue;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx >= cols || cy >= rows {
            continue;
        }
        let text: Vec<char> = std::iter::once(glyph.ascii_marker)
            .chain(glyph.id.chars())
            .collect();
        // Shift left so the label stays inside the field.
        let start = cx.min(cols.saturating_sub(text.len()));
        for (i, c) in text.into_iter().enumerate() {
            if let Some(cell) = cells[cy].get_mut(start + i) {
                *cell = c;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{TITLE}  frame {}  [{}]  zoom {:.1}\n",
        frame.frame,
        frame.control_label(),
        frame.zoom
    ));
    let border = format!("+{}+\n", "-".repeat(cols));
    out.push_str(&border);
    for row in cells {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push_str(&format!(
        "glyphs {}  entropy {:.3}  coherence {:.3}",
        frame.metrics.visible_count, frame.metrics.entropy, frame.metrics.coherence
    ));
    if let Some(d) = frame.distortion {
        out.push_str(&format!("  jitter {:.1}px", d.amplitude_px));
    }
    out.push('\n');
    out.push_str(&format!("{FOOTER:>width$}\n", width = cols + 2));
    out
}

fn shade_char(alpha: f64) -> char {
    match alpha {
        a if a >= 0.75 => ':',
        a if a >= 0.4 => '.',
        _ => ' ',
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
