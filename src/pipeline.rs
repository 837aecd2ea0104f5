//! High-level post-processing pipeline.
//!
//! `PostProcessor` binds a label set and thresholds once at construction,
//! then runs decode, suppression, and reporting over each inference's tensor
//! pair. It holds no state between calls, so one processor can serve any
//! number of inference cycles, including from independent threads. Callers
//! streaming frames are responsible for backpressure: start a new cycle only
//! after the previous call returns.

use crate::candidate::nms::{suppress, SuppressionScope};
use crate::candidate::Candidate;
use crate::decode::decode;
#[cfg(feature = "rayon")]
use crate::decode::decode_par;
use crate::report::{report, DetectionResult, LabelSet};
use crate::tensor::TensorView;
use crate::util::DetPostResult;

/// Tunable parameters for one post-processing pipeline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PostConfig {
    /// Minimum winning class confidence for a box to become a candidate.
    pub confidence_threshold: f32,
    /// IoU above which a lower-confidence candidate is suppressed.
    pub iou_threshold: f32,
    /// Whether suppression crosses class boundaries.
    pub scope: SuppressionScope,
    /// Decode boxes in parallel (requires the `rayon` feature; ignored
    /// otherwise).
    pub parallel: bool,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.1,
            iou_threshold: 0.01,
            scope: SuppressionScope::Global,
            parallel: false,
        }
    }
}

/// Stateless detector post-processor with immutable configuration.
#[derive(Clone, Debug)]
pub struct PostProcessor {
    labels: LabelSet,
    config: PostConfig,
}

impl PostProcessor {
    /// Creates a processor with default configuration.
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            config: PostConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PostConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostConfig {
        &self.config
    }

    /// Returns the bound label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Runs one full post-processing cycle over a tensor pair.
    ///
    /// Either returns a complete result or fails without partial output.
    pub fn process(
        &self,
        coordinates: TensorView<'_>,
        confidence: TensorView<'_>,
    ) -> DetPostResult<DetectionResult> {
        let candidates = self.decode_candidates(coordinates, confidence)?;
        let kept = suppress(&candidates, self.config.iou_threshold, self.config.scope);
        report(&kept, &self.labels)
    }

    #[cfg(feature = "rayon")]
    fn decode_candidates(
        &self,
        coordinates: TensorView<'_>,
        confidence: TensorView<'_>,
    ) -> DetPostResult<Vec<Candidate>> {
        if self.config.parallel {
            decode_par(coordinates, confidence, self.config.confidence_threshold)
        } else {
            decode(coordinates, confidence, self.config.confidence_threshold)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn decode_candidates(
        &self,
        coordinates: TensorView<'_>,
        confidence: TensorView<'_>,
    ) -> DetPostResult<Vec<Candidate>> {
        decode(coordinates, confidence, self.config.confidence_threshold)
    }
}
