//! Decoding raw detector tensors into candidates.
//!
//! A single-stage detector emits two tensors per inference: class
//! confidences with shape `[num_boxes, num_classes]` and box coordinates
//! with shape `[num_boxes, 4]`, the latter read as
//! `(center_x, center_y, width, height)` per box.

use crate::candidate::Candidate;
use crate::geom::Rect;
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Values per row of the coordinate tensor.
pub(crate) const COORDS_PER_BOX: usize = 4;

fn check_shapes(coordinates: &TensorView<'_>, confidence: &TensorView<'_>) -> DetPostResult<()> {
    if coordinates.cols() != COORDS_PER_BOX {
        return Err(DetPostError::ShapeMismatch {
            expected: COORDS_PER_BOX,
            got: coordinates.cols(),
            context: "coordinate columns",
        });
    }
    if coordinates.rows() != confidence.rows() {
        return Err(DetPostError::ShapeMismatch {
            expected: confidence.rows(),
            got: coordinates.rows(),
            context: "box count",
        });
    }
    Ok(())
}

fn decode_box(
    coordinates: &TensorView<'_>,
    confidence: &TensorView<'_>,
    confidence_threshold: f32,
    box_idx: usize,
) -> Option<Candidate> {
    let scores = confidence.row(box_idx)?;

    // Strict comparison, so ties resolve to the lowest class index.
    let mut max_confidence = 0.0f64;
    let mut max_index = 0usize;
    for (class_idx, &score) in scores.iter().enumerate() {
        if score > max_confidence {
            max_confidence = score;
            max_index = class_idx;
        }
    }
    if max_confidence <= f64::from(confidence_threshold) {
        return None;
    }

    let coords = coordinates.row(box_idx)?;
    Some(Candidate {
        label_index: max_index,
        confidence: max_confidence as f32,
        rect: Rect::from_center(
            coords[0] as f32,
            coords[1] as f32,
            coords[2] as f32,
            coords[3] as f32,
        ),
    })
}

/// Decodes candidates from a coordinate/confidence tensor pair.
///
/// Each box is classified by arg-max over its confidence row and emitted
/// only when the winning confidence strictly exceeds
/// `confidence_threshold`. Output order is box-index order; zero-box
/// tensors decode to an empty list.
pub fn decode(
    coordinates: TensorView<'_>,
    confidence: TensorView<'_>,
    confidence_threshold: f32,
) -> DetPostResult<Vec<Candidate>> {
    check_shapes(&coordinates, &confidence)?;
    let _span = trace_span!(
        "decode",
        boxes = confidence.rows(),
        classes = confidence.cols()
    )
    .entered();

    let candidates: Vec<Candidate> = (0..confidence.rows())
        .filter_map(|b| decode_box(&coordinates, &confidence, confidence_threshold, b))
        .collect();

    trace_event!("decode_candidates", count = candidates.len());
    Ok(candidates)
}

/// Decodes candidates in parallel over boxes (rayon).
///
/// Produces exactly the same output as [`decode`].
#[cfg(feature = "rayon")]
pub fn decode_par(
    coordinates: TensorView<'_>,
    confidence: TensorView<'_>,
    confidence_threshold: f32,
) -> DetPostResult<Vec<Candidate>> {
    check_shapes(&coordinates, &confidence)?;
    let _span = trace_span!(
        "decode",
        boxes = confidence.rows(),
        classes = confidence.cols(),
        parallel = true
    )
    .entered();

    let candidates: Vec<Candidate> = (0..confidence.rows())
        .into_par_iter()
        .filter_map(|b| decode_box(&coordinates, &confidence, confidence_threshold, b))
        .collect();

    trace_event!("decode_candidates", count = candidates.len());
    Ok(candidates)
}
