//! Static build metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{Defect, DefectKind};

/// Name recorded in every build smoke record.
pub const BUILD_NAME: &str = "build-smoke-test";

/// Version recorded in every build smoke record.
pub const BUILD_VERSION: &str = "1.0.0";

lazy_static! {
    /// Process-wide build metadata.
    ///
    /// The creation timestamp is captured once, on first access, and stays
    /// the same for the life of the process.
    ///
    /// ```
    /// use build_smoke::BUILD_SMOKE_TEST;
    ///
    /// assert_eq!(BUILD_SMOKE_TEST.name(), "build-smoke-test");
    /// assert_eq!(BUILD_SMOKE_TEST.version(), "1.0.0");
    /// assert!(BUILD_SMOKE_TEST.created_at().ends_with('Z'));
    /// ```
    pub static ref BUILD_SMOKE_TEST: BuildMetadata = BuildMetadata::capture(&SystemClock);
}

/// Name, version and creation time of a build.
///
/// `created_at` is kept as an ISO-8601 UTC string with millisecond
/// precision, e.g. `2026-10-19T08:15:30.123Z`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildMetadata {
    name: String,
    version: String,
    created_at: String,
}

impl BuildMetadata {
    /// Stamps the build name and version with the clock's current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_smoke::{BuildMetadata, FixedClock};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    /// let meta = BuildMetadata::capture(&FixedClock::new(at));
    /// assert_eq!(meta.created_at(), "2023-11-14T22:13:20.123Z");
    /// ```
    pub fn capture<C: Clock>(clock: &C) -> Self {
        let created_at = clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
        tracing::debug!(%created_at, "captured build metadata");

        Self {
            name: BUILD_NAME.to_string(),
            version: BUILD_VERSION.to_string(),
            created_at,
        }
    }

    pub(crate) fn from_parts(name: String, version: String, created_at: String) -> Self {
        Self {
            name,
            version,
            created_at,
        }
    }

    pub(crate) fn into_parts(self) -> (String, String, String) {
        (self.name, self.version, self.created_at)
    }

    /// Returns the build name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the build version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the creation timestamp string.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Parses the creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`DefectKind::BadTimestamp`] defect if the stored string
    /// is not UTC RFC 3339 with millisecond precision and a `Z` suffix,
    /// exactly as [`capture`](Self::capture) writes it.
    pub fn created_at_datetime(&self) -> Result<DateTime<Utc>, Defect> {
        let at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| {
                Defect::new(
                    DefectKind::BadTimestamp,
                    format!("'{}': {}", self.created_at, e),
                )
            })?;

        let canonical = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        if canonical != self.created_at {
            return Err(Defect::new(
                DefectKind::BadTimestamp,
                format!("expected '{}', got '{}'", canonical, self.created_at),
            ));
        }
        Ok(at)
    }

    /// Checks the name and version constants and the timestamp format.
    pub fn validate(&self) -> Result<(), Defect> {
        if self.name != BUILD_NAME {
            return Err(Defect::new(
                DefectKind::BadName,
                format!("expected '{}', got '{}'", BUILD_NAME, self.name),
            ));
        }
        if self.version != BUILD_VERSION {
            return Err(Defect::new(
                DefectKind::BadVersion,
                format!("expected '{}', got '{}'", BUILD_VERSION, self.version),
            ));
        }
        self.created_at_datetime().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn fixed(ms: i64) -> FixedClock {
        FixedClock::new(Utc.timestamp_millis_opt(ms).unwrap())
    }

    #[test]
    fn capture_formats_iso_millis() {
        let meta = BuildMetadata::capture(&fixed(0));
        assert_eq!(meta.created_at(), "1970-01-01T00:00:00.000Z");
        assert_eq!(meta.name(), BUILD_NAME);
        assert_eq!(meta.version(), BUILD_VERSION);
    }

    #[test]
    fn created_at_parses_back() {
        let meta = BuildMetadata::capture(&fixed(1_700_000_000_123));
        let at = meta.created_at_datetime().unwrap();
        assert_eq!(at.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn constant_is_captured_once() {
        let first = BUILD_SMOKE_TEST.created_at().to_string();
        let second = BUILD_SMOKE_TEST.created_at().to_string();
        assert_eq!(first, second);
        assert!(BUILD_SMOKE_TEST.validate().is_ok());
    }

    #[test]
    fn validate_flags_each_field() {
        let good = BuildMetadata::capture(&fixed(5));

        let mut bad = good.clone();
        bad.name = "other".to_string();
        assert_eq!(bad.validate().unwrap_err().kind, DefectKind::BadName);

        let mut bad = good.clone();
        bad.version = "2.0.0".to_string();
        assert_eq!(bad.validate().unwrap_err().kind, DefectKind::BadVersion);

        for created_at in [
            "yesterday",
            "2024-01-01T05:00:00.000+05:00",
            "2024-01-01T05:00:00+05:00",
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:00.000000Z",
            "2024-01-01T00:00:00.000+00:00",
        ] {
            let mut bad = good.clone();
            bad.created_at = created_at.to_string();
            assert_eq!(
                bad.validate().unwrap_err().kind,
                DefectKind::BadTimestamp,
                "{}",
                created_at
            );
        }

        let mut ok = good;
        ok.created_at = "2024-01-01T00:00:00.000Z".to_string();
        assert!(ok.validate().is_ok());
    }
}
