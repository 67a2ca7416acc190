//! JSON rendering and strict parsing of smoke records.
//!
//! Rendering accepts any serializable record. Parsing is strict: unknown
//! fields are rejected by serde, and every decoded record must pass its
//! `validate()` check before it is handed back.
//!
//! # Examples
//!
//! ```
//! use build_smoke::{codec, make_sample_payload};
//!
//! let json = codec::to_json(&make_sample_payload(Some(42))).unwrap();
//! assert_eq!(json, r#"{"id":"smoke-42","tags":["build","test","generic"],"active":true}"#);
//!
//! let payload = codec::payload_from_json(&json).unwrap();
//! assert_eq!(payload.id(), "smoke-42");
//! ```

use serde::Serialize;

use crate::error::Error;
use crate::payload::SamplePayload;
use crate::summary::BuildSmokeSummary;

/// Renders a record as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(record: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(record)?)
}

/// Renders a record as indented JSON.
pub fn to_json_pretty<T: Serialize + ?Sized>(record: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parses and validates a sample payload.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text does not match the payload shape and
/// [`Error::Malformed`] if it does but breaks a payload rule.
pub fn payload_from_json(json: &str) -> Result<SamplePayload, Error> {
    let payload: SamplePayload = serde_json::from_str(json)?;
    if let Err(defect) = payload.validate() {
        tracing::debug!(%defect, "rejected sample payload");
        return Err(defect.into());
    }
    Ok(payload)
}

/// Parses and validates a build smoke summary.
///
/// # Errors
///
/// Same as [`payload_from_json`], with the metadata rules checked as well.
pub fn summary_from_json(json: &str) -> Result<BuildSmokeSummary, Error> {
    let summary: BuildSmokeSummary = serde_json::from_str(json)?;
    if let Err(defect) = summary.validate() {
        tracing::debug!(%defect, "rejected build smoke summary");
        return Err(defect.into());
    }
    Ok(summary)
}
