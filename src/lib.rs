//! Detpost turns raw single-stage detector output into labeled bounding boxes.
//!
//! The crate decodes a (coordinates, confidence) tensor pair into candidate
//! detections via per-box arg-max classification and confidence thresholding,
//! prunes overlapping candidates with greedy IoU-based non-maximum
//! suppression, and resolves class labels into a final report. Optional
//! parallel decoding via the `rayon` feature; optional instrumentation via
//! the `tracing` feature.

mod candidate;
pub mod decode;
pub mod geom;
pub mod lowlevel;
pub mod pipeline;
pub mod report;
pub mod tensor;
mod trace;
pub mod util;

pub use candidate::nms::{suppress, SuppressionScope};
pub use candidate::Candidate;
pub use decode::decode;
#[cfg(feature = "rayon")]
pub use decode::decode_par;
pub use geom::Rect;
pub use pipeline::{PostConfig, PostProcessor};
pub use report::{report, Detection, DetectionResult, LabelSet};
pub use tensor::TensorView;
pub use util::{DetPostError, DetPostResult};
