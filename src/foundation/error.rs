/// Result of any fallible stageqc operation.
pub type StageQcResult<T> = Result<T, StageQcError>;

/// Why a stage definition could not be loaded or an asset could not be measured.
///
/// A QC mismatch is not an error: it is reported through [`crate::QcResult`].
#[derive(thiserror::Error, Debug)]
pub enum StageQcError {
    /// The stage definition is inconsistent (bad sizes, offsets or ids).
    #[error("validation error: {0}")]
    Validation(String),

    /// File refused before probing (unsupported type or too large).
    #[error("rejected: {0}")]
    Rejected(String),

    /// Dimension probing failed (unreadable file, unsupported codec, missing tool).
    #[error("probe error: {0}")]
    Probe(String),

    /// A stage definition, ffprobe output or report was not valid JSON for its type.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem or subprocess failure, with the context it was raised under.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageQcError {
    /// Stage definition rejected by [`crate::StageSpec::from_def`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// File turned away by the upload gate.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Asset whose dimensions could not be read.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    /// JSON that did not match the expected shape.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
