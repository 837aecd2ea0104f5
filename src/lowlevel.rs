//! Low-level building blocks for custom post-processing pipelines.
//!
//! These re-exports expose the individual decode and suppression stages for
//! callers composing their own pipelines. Most users should prefer the
//! high-level [`PostProcessor`](crate::PostProcessor) API.

pub use crate::candidate::nms::{suppress, SuppressionScope};
pub use crate::candidate::Candidate;
pub use crate::decode::decode;
#[cfg(feature = "rayon")]
pub use crate::decode::decode_par;
pub use crate::report::report;
