//! Sample payload generation.
//!
//! A [`SamplePayload`] is derived entirely from a numeric seed: the id is
//! `smoke-<seed>`, the tags are fixed and the payload is always active.
//! When no seed is given, the current Unix time in milliseconds is used.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{Defect, DefectKind};

/// Prefix of every sample payload id.
pub const SAMPLE_ID_PREFIX: &str = "smoke-";

/// Tags carried by every sample payload, in order.
pub const SAMPLE_TAGS: [&str; 3] = ["build", "test", "generic"];

/// A sample payload for smoke checks.
///
/// # Examples
///
/// ```
/// use build_smoke::SamplePayload;
///
/// let payload = SamplePayload::from_seed(42);
/// assert_eq!(payload.id(), "smoke-42");
/// assert_eq!(payload.tags(), ["build", "test", "generic"]);
/// assert!(payload.active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplePayload {
    id: String,
    tags: Vec<String>,
    active: bool,
}

impl SamplePayload {
    /// Builds the payload for an explicit seed.
    ///
    /// Seeds are whole numbers of milliseconds; fractional seeds are out of
    /// domain.
    pub fn from_seed(seed: i64) -> Self {
        Self {
            id: format!("{}{}", SAMPLE_ID_PREFIX, seed),
            tags: SAMPLE_TAGS.iter().map(|t| t.to_string()).collect(),
            active: true,
        }
    }

    /// Returns the payload id (`smoke-<seed>`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the payload tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether the payload is active. Always `true` for generated payloads.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Returns the seed encoded in the id, if the id is in the exact form
    /// [`from_seed`](Self::from_seed) writes. `smoke-+5`, `smoke-007` and
    /// `smoke--0` have no seed.
    pub fn seed(&self) -> Option<i64> {
        let digits = self.id.strip_prefix(SAMPLE_ID_PREFIX)?;
        let seed: i64 = digits.parse().ok()?;
        (seed.to_string() == digits).then_some(seed)
    }

    /// Checks that the payload has the shape the generator produces.
    ///
    /// # Errors
    ///
    /// Returns a [`Defect`] naming the first field that breaks a rule:
    /// the id must be `smoke-<integer>` written exactly as `from_seed`
    /// writes it, the tags must equal [`SAMPLE_TAGS`], and the payload
    /// must be active.
    pub fn validate(&self) -> Result<(), Defect> {
        if self.seed().is_none() {
            return Err(Defect::new(
                DefectKind::BadId,
                format!("expected {}<seed>, got '{}'", SAMPLE_ID_PREFIX, self.id),
            ));
        }

        if !self.tags.iter().map(String::as_str).eq(SAMPLE_TAGS) {
            return Err(Defect::new(
                DefectKind::BadTags,
                format!("expected {:?}, got {:?}", SAMPLE_TAGS, self.tags),
            ));
        }

        if !self.active {
            return Err(Defect::new(DefectKind::Inactive, "active is false"));
        }

        Ok(())
    }
}

/// Generates sample payloads, reading the default seed from a [`Clock`].
///
/// # Examples
///
/// ```
/// use build_smoke::{FixedClock, PayloadGenerator};
/// use chrono::{TimeZone, Utc};
///
/// let clock = FixedClock::new(Utc.timestamp_millis_opt(1_000).unwrap());
/// let generator = PayloadGenerator::with_clock(clock);
///
/// assert_eq!(generator.generate(None).id(), "smoke-1000");
/// assert_eq!(generator.generate(Some(7)).id(), "smoke-7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayloadGenerator<C = SystemClock> {
    clock: C,
}

impl PayloadGenerator<SystemClock> {
    /// Creates a generator backed by the wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> PayloadGenerator<C> {
    /// Creates a generator backed by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Returns the clock this generator reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Generates a payload. A missing seed defaults to the clock's current
    /// Unix time in milliseconds.
    pub fn generate(&self, seed: Option<i64>) -> SamplePayload {
        let defaulted = seed.is_none();
        let seed = seed.unwrap_or_else(|| self.clock.now_millis());

        tracing::debug!(seed, defaulted, "generated sample payload");

        SamplePayload::from_seed(seed)
    }
}

/// Builds a sample payload for `seed`, or for the current time in
/// milliseconds when `seed` is `None`.
///
/// The seed is an integer; fractional seeds are out of domain.
///
/// # Examples
///
/// ```
/// use build_smoke::make_sample_payload;
///
/// let payload = make_sample_payload(Some(42));
/// assert_eq!(payload.id(), "smoke-42");
///
/// let now = make_sample_payload(None);
/// assert!(now.seed().is_some());
/// ```
pub fn make_sample_payload(seed: Option<i64>) -> SamplePayload {
    PayloadGenerator::new().generate(seed)
}
