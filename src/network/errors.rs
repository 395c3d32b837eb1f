//! Error types for network construction and program emission

use thiserror::Error;

/// Errors that can occur when building a network or emitting its program
#[derive(Debug, Error)]
pub enum NetworkError {
    // ─────────────────────────────────────────────────────────────────────────
    // Construction Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Two rates share a function identifier
    ///
    /// `fname` names both a generated function and a λ variable, so a
    /// collision would silently shadow one rate in the emitted program.
    #[error("Duplicate rate function identifier '{fname}'")]
    DuplicateIdentifier { fname: String },

    /// Failed to parse JSON rate definitions
    #[error("Failed to parse rate definitions: {0}")]
    Parse(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────────────────
    // Emission Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Writing the generated program failed
    #[error("Failed to write generated program: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    /// Create a duplicate identifier error
    pub fn duplicate_identifier(fname: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            fname: fname.into(),
        }
    }
}
