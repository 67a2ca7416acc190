use std::fmt;

/// Errors returned when reading smoke records back from JSON.
#[derive(Debug)]
pub enum Error {
    /// The input was not valid JSON for the expected record shape
    Json(serde_json::Error),
    /// The input parsed, but a field breaks a record rule
    Malformed(Defect),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(e) => write!(f, "Invalid JSON: {}", e),
            Error::Malformed(d) => write!(f, "Malformed record: {}", d),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Malformed(d) => Some(d),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<Defect> for Error {
    fn from(d: Defect) -> Self {
        Error::Malformed(d)
    }
}

/// A structural defect found in a smoke record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    /// Which rule the record broke
    pub kind: DefectKind,
    /// Human-readable detail, including the offending value
    pub message: String,
}

impl Defect {
    /// Creates a new defect.
    pub fn new(kind: DefectKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Defect {}

/// The kind of structural defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    /// Payload id is not `smoke-<integer>`
    BadId,
    /// Payload tags differ from the fixed sequence
    BadTags,
    /// Payload is not marked active
    Inactive,
    /// Summary name differs from the build name
    BadName,
    /// Summary version differs from the build version
    BadVersion,
    /// Creation timestamp is not RFC 3339
    BadTimestamp,
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefectKind::BadId => write!(f, "bad id"),
            DefectKind::BadTags => write!(f, "bad tags"),
            DefectKind::Inactive => write!(f, "inactive"),
            DefectKind::BadName => write!(f, "bad name"),
            DefectKind::BadVersion => write!(f, "bad version"),
            DefectKind::BadTimestamp => write!(f, "bad timestamp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defect_display_includes_kind_and_message() {
        let d = Defect::new(DefectKind::BadId, "expected smoke-<seed>, got 'x'");
        assert_eq!(d.to_string(), "bad id: expected smoke-<seed>, got 'x'");
    }

    #[test]
    fn error_wraps_defect() {
        let err: Error = Defect::new(DefectKind::Inactive, "active is false").into();
        assert!(matches!(err, Error::Malformed(ref d) if d.kind == DefectKind::Inactive));
        assert!(err.to_string().starts_with("Malformed record: inactive"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_wraps_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON"));
    }
}
