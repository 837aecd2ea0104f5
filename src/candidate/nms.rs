//! Non-maximum suppression over candidate boxes.

use crate::candidate::{sort_candidates_desc, Candidate};
use crate::trace::trace_event;

/// Which candidate pairs are eligible for mutual suppression.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SuppressionScope {
    /// Any overlapping pair suppresses, regardless of predicted class.
    #[default]
    Global,
    /// Only candidates with the same label suppress each other.
    PerClass,
}

/// Applies greedy non-maximum suppression.
///
/// Candidates are sorted by descending confidence and accepted greedily;
/// every remaining candidate whose IoU with an accepted one exceeds
/// `iou_threshold` is discarded. Under [`SuppressionScope::PerClass`] only
/// same-label pairs suppress each other. The returned candidates stay in
/// confidence-descending order, and re-running on the output returns it
/// unchanged.
pub fn suppress(
    candidates: &[Candidate],
    iou_threshold: f32,
    scope: SuppressionScope,
) -> Vec<Candidate> {
    let mut ordered = candidates.to_vec();
    sort_candidates_desc(&mut ordered);

    let mut keep = vec![true; ordered.len()];
    let mut kept = Vec::new();
    for i in 0..ordered.len() {
        if !keep[i] {
            continue;
        }
        kept.push(ordered[i]);
        for j in (i + 1)..ordered.len() {
            if !keep[j] {
                continue;
            }
            if scope == SuppressionScope::PerClass
                && ordered[j].label_index != ordered[i].label_index
            {
                continue;
            }
            if ordered[i].rect.iou(&ordered[j].rect) > iou_threshold {
                keep[j] = false;
            }
        }
    }

    trace_event!("suppress", before = candidates.len(), after = kept.len());
    kept
}
