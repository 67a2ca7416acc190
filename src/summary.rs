//! Build smoke summary: static metadata plus one sample payload.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::Defect;
use crate::metadata::{BUILD_SMOKE_TEST, BuildMetadata};
use crate::payload::{PayloadGenerator, SamplePayload};

/// Aggregate record of build metadata and a sample payload.
///
/// Serializes with the metadata fields flattened at the top level:
///
/// ```json
/// {
///   "name": "build-smoke-test",
///   "version": "1.0.0",
///   "createdAt": "2026-10-19T08:15:30.123Z",
///   "payload": { "id": "smoke-1760861730123", "tags": ["build", "test", "generic"], "active": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SummaryRecord", into = "SummaryRecord")]
pub struct BuildSmokeSummary {
    metadata: BuildMetadata,
    payload: SamplePayload,
}

// Flat wire shape. `#[serde(flatten)]` cannot be combined with
// `deny_unknown_fields`, so the fields are spelled out here.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SummaryRecord {
    name: String,
    version: String,
    created_at: String,
    payload: SamplePayload,
}

impl From<SummaryRecord> for BuildSmokeSummary {
    fn from(r: SummaryRecord) -> Self {
        Self::new(
            BuildMetadata::from_parts(r.name, r.version, r.created_at),
            r.payload,
        )
    }
}

impl From<BuildSmokeSummary> for SummaryRecord {
    fn from(s: BuildSmokeSummary) -> Self {
        let (name, version, created_at) = s.metadata.into_parts();
        Self {
            name,
            version,
            created_at,
            payload: s.payload,
        }
    }
}

impl BuildSmokeSummary {
    /// Combines metadata with a payload.
    pub fn new(metadata: BuildMetadata, payload: SamplePayload) -> Self {
        Self { metadata, payload }
    }

    /// Returns the metadata half of the summary.
    pub fn metadata(&self) -> &BuildMetadata {
        &self.metadata
    }

    /// Returns the build name.
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// Returns the build version.
    pub fn version(&self) -> &str {
        self.metadata.version()
    }

    /// Returns the creation timestamp string.
    pub fn created_at(&self) -> &str {
        self.metadata.created_at()
    }

    /// Returns the sample payload.
    pub fn payload(&self) -> &SamplePayload {
        &self.payload
    }

    /// Checks both the metadata and the payload.
    pub fn validate(&self) -> Result<(), Defect> {
        self.metadata.validate()?;
        self.payload.validate()
    }
}

/// Builds summaries from a metadata record and a payload generator.
///
/// The default builder uses [`BUILD_SMOKE_TEST`] and the wall clock, which
/// is exactly what [`get_build_smoke_summary`] does.
///
/// # Examples
///
/// ```
/// use build_smoke::{BuildMetadata, FixedClock, PayloadGenerator, SummaryBuilder};
/// use chrono::{TimeZone, Utc};
///
/// let clock = FixedClock::new(Utc.timestamp_millis_opt(1_000).unwrap());
/// let summary = SummaryBuilder::new()
///     .metadata(BuildMetadata::capture(&clock))
///     .generator(PayloadGenerator::with_clock(clock))
///     .build();
///
/// assert_eq!(summary.created_at(), "1970-01-01T00:00:01.000Z");
/// assert_eq!(summary.payload().id(), "smoke-1000");
/// ```
#[derive(Debug, Clone)]
pub struct SummaryBuilder<C = SystemClock> {
    metadata: BuildMetadata,
    generator: PayloadGenerator<C>,
}

impl SummaryBuilder<SystemClock> {
    /// Creates a builder over the process-wide metadata and the wall clock.
    pub fn new() -> Self {
        Self {
            metadata: BUILD_SMOKE_TEST.clone(),
            generator: PayloadGenerator::new(),
        }
    }
}

impl Default for SummaryBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SummaryBuilder<C> {
    /// Replaces the metadata record.
    pub fn metadata(mut self, metadata: BuildMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replaces the payload generator.
    pub fn generator<D: Clock>(self, generator: PayloadGenerator<D>) -> SummaryBuilder<D> {
        SummaryBuilder {
            metadata: self.metadata,
            generator,
        }
    }

    /// Builds a summary with one freshly generated payload (seed defaulted).
    pub fn build(&self) -> BuildSmokeSummary {
        let payload = self.generator.generate(None);
        BuildSmokeSummary::new(self.metadata.clone(), payload)
    }
}

/// Returns the process-wide build metadata with a freshly generated payload.
///
/// # Examples
///
/// ```
/// use build_smoke::get_build_smoke_summary;
///
/// let summary = get_build_smoke_summary();
/// assert_eq!(summary.name(), "build-smoke-test");
/// assert_eq!(summary.version(), "1.0.0");
/// assert!(summary.payload().validate().is_ok());
/// ```
pub fn get_build_smoke_summary() -> BuildSmokeSummary {
    SummaryBuilder::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::DefectKind;
    use crate::metadata::{BUILD_NAME, BUILD_VERSION};
    use chrono::{TimeZone, Utc};

    #[test]
    fn summary_carries_constants() {
        let summary = get_build_smoke_summary();
        assert_eq!(summary.name(), BUILD_NAME);
        assert_eq!(summary.version(), BUILD_VERSION);
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn summaries_share_created_at() {
        let a = get_build_smoke_summary();
        let b = get_build_smoke_summary();
        assert_eq!(a.created_at(), b.created_at());
        assert_eq!(a.created_at(), BUILD_SMOKE_TEST.created_at());
    }

    #[test]
    fn builder_uses_its_clock_for_payload() {
        let clock = FixedClock::new(Utc.timestamp_millis_opt(123_456).unwrap());
        let summary = SummaryBuilder::new()
            .generator(PayloadGenerator::with_clock(clock))
            .build();

        assert_eq!(summary.payload().id(), "smoke-123456");
        assert_eq!(summary.metadata(), &*BUILD_SMOKE_TEST);
    }

    #[test]
    fn validate_reports_payload_defect() {
        let payload: SamplePayload = serde_json::from_str(
            r#"{"id":"smoke-1","tags":["build","test","generic"],"active":false}"#,
        )
        .unwrap();
        let summary = BuildSmokeSummary::new(BUILD_SMOKE_TEST.clone(), payload);
        assert_eq!(summary.validate().unwrap_err().kind, DefectKind::Inactive);
    }
}
