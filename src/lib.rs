//! Build metadata and sample payload records for CI smoke checks.
//!
//! This crate produces a small, predictable artifact a pipeline can build,
//! serialize and inspect to confirm it runs end to end:
//! - **Metadata**: a process-wide [`BUILD_SMOKE_TEST`] record with name,
//!   version and a creation timestamp captured once
//! - **Payload**: [`make_sample_payload`] derives a [`SamplePayload`] from a
//!   seed, defaulting to the current time in milliseconds
//! - **Summary**: [`get_build_smoke_summary`] combines the two
//!
//! Nothing here performs I/O. The [`codec`] module renders records as JSON
//! and parses them back strictly.
//!
//! # Examples
//!
//! ```
//! use build_smoke::{get_build_smoke_summary, make_sample_payload};
//!
//! let payload = make_sample_payload(Some(42));
//! assert_eq!(payload.id(), "smoke-42");
//! assert_eq!(payload.tags(), ["build", "test", "generic"]);
//! assert!(payload.active());
//!
//! let summary = get_build_smoke_summary();
//! assert_eq!(summary.name(), "build-smoke-test");
//! assert_eq!(summary.version(), "1.0.0");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
pub mod codec;
mod error;
mod metadata;
mod payload;
mod summary;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Defect, DefectKind, Error};
pub use metadata::{BUILD_NAME, BUILD_SMOKE_TEST, BUILD_VERSION, BuildMetadata};
pub use payload::{
    PayloadGenerator, SAMPLE_ID_PREFIX, SAMPLE_TAGS, SamplePayload, make_sample_payload,
};
pub use summary::{BuildSmokeSummary, SummaryBuilder, get_build_smoke_summary};
