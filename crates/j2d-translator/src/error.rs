//! Fatal translation errors.

use j2d_common::SourceLocation;

/// Errors that abort a translation run.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// A construct the translator has no mapping for.
    #[error("unsupported construct {kind}: {detail}{}", at(.location))]
    Unsupported {
        kind: String,
        detail: String,
        location: Option<SourceLocation>,
    },

    /// An operator or token that should always have a mapping did not.
    #[error("invariant violation in {kind}: {detail}{}", at(.location))]
    InvariantViolation {
        kind: String,
        detail: String,
        location: Option<SourceLocation>,
    },

    /// Rejected configuration, reported before translation starts.
    #[error("configuration error: {0}")]
    Configuration(String),
}

fn at(location: &Option<SourceLocation>) -> String {
    location
        .as_ref()
        .map(|loc| format!(" at {loc}"))
        .unwrap_or_default()
}

impl TranslateError {
    pub fn unsupported(
        kind: impl Into<String>,
        detail: impl Into<String>,
        location: Option<&SourceLocation>,
    ) -> Self {
        Self::Unsupported {
            kind: kind.into(),
            detail: detail.into(),
            location: location.cloned(),
        }
    }

    pub fn invariant(
        kind: impl Into<String>,
        detail: impl Into<String>,
        location: Option<&SourceLocation>,
    ) -> Self {
        Self::InvariantViolation {
            kind: kind.into(),
            detail: detail.into(),
            location: location.cloned(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Unsupported { location, .. } | Self::InvariantViolation { location, .. } => {
                location.as_ref()
            }
            Self::Configuration(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
