//! Candidate detections and pruning utilities.
//!
//! Includes the decoded candidate type and IoU-based non-maximum suppression.

pub(crate) mod nms;

use crate::geom::Rect;

/// Decoded detection prior to suppression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Index of the arg-max class in the label set.
    pub label_index: usize,
    /// Winning class confidence.
    pub confidence: f32,
    /// Bounding box in top-left-origin coordinates.
    pub rect: Rect,
}

/// Sorts candidates by descending confidence.
///
/// The sort is stable, so candidates with equal confidence keep their
/// original box-index order.
pub(crate) fn sort_candidates_desc(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
