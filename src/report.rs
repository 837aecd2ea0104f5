//! Label resolution and final detection reporting.

use crate::candidate::Candidate;
use crate::geom::Rect;
use crate::util::{DetPostError, DetPostResult};

/// Ordered set of class names, indexed by a candidate's label index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    /// Creates a label set from an ordered list of class names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parses a comma-separated class list, as stored in detector metadata.
    ///
    /// Names are trimmed but never dropped, so positions keep their class
    /// indices. A blank input yields an empty set.
    pub fn from_comma_separated(classes: &str) -> Self {
        if classes.trim().is_empty() {
            return Self::default();
        }
        let names = classes
            .split(',')
            .map(|name| name.trim().to_string())
            .collect();
        Self { names }
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when the set holds no labels.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name at `index` if it is within bounds.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

/// Labeled detection in the final report.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Resolved class name.
    pub label: String,
    /// Classification confidence.
    pub confidence: f32,
    /// Bounding box in top-left-origin coordinates.
    pub rect: Rect,
}

/// Final outcome of one post-processing cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    /// Surviving detections, highest confidence first.
    pub detections: Vec<Detection>,
    /// The single highest-confidence detection, if any survived.
    pub top: Option<Detection>,
}

/// Resolves labels and selects the top pick for a candidate list.
///
/// Fails with [`DetPostError::LabelIndexOutOfRange`] when a candidate's
/// label index does not resolve; indices are never clamped. An empty
/// candidate list yields an empty result with no top pick.
pub fn report(candidates: &[Candidate], labels: &LabelSet) -> DetPostResult<DetectionResult> {
    let mut detections = Vec::with_capacity(candidates.len());
    for cand in candidates {
        let label = labels
            .get(cand.label_index)
            .ok_or(DetPostError::LabelIndexOutOfRange {
                index: cand.label_index,
                len: labels.len(),
            })?;
        detections.push(Detection {
            label: label.to_string(),
            confidence: cand.confidence,
            rect: cand.rect,
        });
    }

    // Strict comparison keeps the first of equal maxima.
    let mut top: Option<usize> = None;
    for (idx, det) in detections.iter().enumerate() {
        let better = match top {
            Some(best) => det.confidence > detections[best].confidence,
            None => true,
        };
        if better {
            top = Some(idx);
        }
    }
    let top = top.map(|idx| detections[idx].clone());

    Ok(DetectionResult { detections, top })
}
