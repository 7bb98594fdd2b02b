use crate::{
    catalog::model::{Catalog, GlyphRecord},
    eval::metrics::FrameMetrics,
    foundation::core::FrameIndex,
    foundation::error::AtlasResult,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Visible glyphs and derived metrics for one frame.
pub struct EvaluatedFrame<'a> {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Glyphs revealed at or before `frame`, in catalog order.
    pub visible: Vec<&'a GlyphRecord>,
    /// Scalars derived from `visible.len()`.
    pub metrics: FrameMetrics,
}

impl EvaluatedFrame<'_> {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn entropy(&self) -> f64 {
        self.metrics.entropy
    }

    pub fn coherence(&self) -> f64 {
        self.metrics.coherence
    }
}

/// Stateless evaluator from catalog + frame to visible set and metrics.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(catalog), fields(glyphs = catalog.len()))]
    /// Evaluate one frame. Frames past the catalog's `max_frame` are rejected.
    pub fn evaluate(catalog: &Catalog, frame: FrameIndex) -> AtlasResult<EvaluatedFrame<'_>> {
        let frame = frame.checked_within(catalog.max_frame())?;
        Ok(Self::evaluate_unchecked(catalog, frame))
    }

    pub(crate) fn evaluate_unchecked(catalog: &Catalog, frame: FrameIndex) -> EvaluatedFrame<'_> {
        let visible: Vec<&GlyphRecord> = catalog.iter().filter(|g| g.is_visible_at(frame)).collect();
        let metrics = FrameMetrics::from_count(frame, visible.len());
        EvaluatedFrame {
            frame,
            visible,
            metrics,
        }
    }

    #[tracing::instrument(skip(catalog))]
    /// Metrics for every frame in `0..=max_frame`, independent of any clock.
    pub fn stats_table(catalog: &Catalog) -> Vec<FrameMetrics> {
        catalog
            .frames()
            .map(|f| Self::evaluate_unchecked(catalog, f).metrics)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
