use crate::foundation::core::{FrameIndex, Point};

/// Categorical tag attached to a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum GlyphRole {
    Seed,
    Ghost,
    Mirror,
    Key,
    Fragment,
}

impl GlyphRole {
    /// Display marker for the role.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Seed => "🌱",
            Self::Ghost => "👻",
            Self::Mirror => "🪞",
            Self::Key => "🗝️",
            Self::Fragment => "🧩",
        }
    }

    /// Single-column stand-in for terminals that cannot draw the marker.
    pub fn ascii_marker(self) -> char {
        match self {
            Self::Seed => 's',
            Self::Ghost => 'g',
            Self::Mirror => 'm',
            Self::Key => 'k',
            Self::Fragment => 'f',
        }
    }
}

/// One symbolic marker in the catalog.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlyphRecord {
    /// Identifier, stable for the process lifetime. Uniqueness is not enforced.
    pub id: String,
    /// Role tag; `None` renders without a marker.
    pub role: Option<GlyphRole>,
    /// Percentage coordinates (0..100 per axis). Not validated, may coincide.
    pub position: Point,
    /// First frame at which the glyph is visible. It stays visible afterwards.
    pub appear_frame: FrameIndex,
    /// Carried for future use; no computed output depends on it.
    pub persistence: i64,
}

impl GlyphRecord {
    pub fn new(
        id: impl Into<String>,
        role: Option<GlyphRole>,
        position: (f64, f64),
        appear_frame: u64,
        persistence: i64,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            position: Point::new(position.0, position.1),
            appear_frame: FrameIndex(appear_frame),
            persistence,
        }
    }

    pub fn is_visible_at(&self, frame: FrameIndex) -> bool {
        self.appear_frame <= frame
    }

    /// Marker for the role, or the empty string when the role is absent.
    pub fn marker(&self) -> &'static str {
        self.role.map_or("", GlyphRole::marker)
    }

    /// `"<marker> <id>"`, as shown next to the glyph.
    pub fn label(&self) -> String {
        format!("{} {}", self.marker(), self.id)
    }
}

/// Immutable, ordered glyph catalog together with the last frame of its sequence.
///
/// Iteration order is display order. Entries are treated independently, so
/// duplicate ids are tolerated.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Catalog {
    glyphs: Vec<GlyphRecord>,
    max_frame: FrameIndex,
}

impl Catalog {
    pub fn new(glyphs: Vec<GlyphRecord>, max_frame: FrameIndex) -> Self {
        Self { glyphs, max_frame }
    }

    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlyphRecord> {
        self.glyphs.iter()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Inclusive upper bound of the frame sequence.
    pub fn max_frame(&self) -> FrameIndex {
        self.max_frame
    }

    /// Every valid frame, `0..=max_frame`.
    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> + use<> {
        (0..=self.max_frame.0).map(FrameIndex)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a GlyphRecord;
    type IntoIter = std::slice::Iter<'a, GlyphRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
