use crate::catalog::model::{Catalog, GlyphRecord, GlyphRole};
use crate::foundation::core::FrameIndex;

/// Last frame of the reference sequence. Frame 5 reveals nothing new.
pub const REFERENCE_MAX_FRAME: FrameIndex = FrameIndex(5);

impl Catalog {
    /// The built-in five-glyph atlas.
    pub fn reference() -> Self {
        use GlyphRole::Seed;
        Self::new(
            vec![
                GlyphRecord::new("G1", Some(Seed), (71.0, 88.0), 0, 23),
                GlyphRecord::new("G2", Some(Seed), (71.0, 88.0), 1, 30),
                GlyphRecord::new("G3", Some(Seed), (99.0, 27.0), 2, 23),
                GlyphRecord::new("G4a", Some(Seed), (0.0, 0.0), 3, 29),
                GlyphRecord::new("G4b", Some(Seed), (99.0, 28.0), 4, 23),
            ],
            REFERENCE_MAX_FRAME,
        )
    }
}
