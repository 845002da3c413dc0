//! Error types for loading assets and driving controllers.
//!
//! Evaluation and ticking never fail; degenerate input produces degenerate
//! numbers instead.

/// Errors surfaced by deserialization and by name-based lookups.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Label not found: {label}")]
    LabelNotFound { label: String },

    #[error("Event not found: {name}")]
    EventNotFound { name: String },
}

impl AnimationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Serialization { .. } => "serialization",
            Self::MissingField { .. } | Self::InvalidField { .. } => "validation",
            Self::LabelNotFound { .. } | Self::EventNotFound { .. } => "data",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            AnimationError::LabelNotFound { label: "x".into() }.category(),
            "data"
        );
        assert_eq!(AnimationError::invalid("fps", "nan").category(), "validation");
        let err: AnimationError = serde_json::from_str::<f64>("{").unwrap_err().into();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn display_names_the_field() {
        let err = AnimationError::MissingField {
            field: "animationStructure".into(),
        };
        assert_eq!(err.to_string(), "Missing field: animationStructure");
    }
}
