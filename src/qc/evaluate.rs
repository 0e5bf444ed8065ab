use std::fmt;

use crate::{foundation::core::Dimensions, stage::spec::StageSpec};

/// Largest absolute difference between `width / height` ratios still treated as equal.
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

/// Outcome class of a QC check, in decreasing order of acceptability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcTier {
    /// Exact resolution match.
    Pass,
    /// Right proportions, wrong resolution.
    Warning,
    /// Neither resolution nor proportions match.
    Fail,
}

impl QcTier {
    /// Upper-case badge text.
    pub fn as_str(self) -> &'static str {
        match self {
            QcTier::Pass => "PASS",
            QcTier::Warning => "WARNING",
            QcTier::Fail => "FAIL",
        }
    }
}

impl fmt::Display for QcTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing measured asset dimensions with the stage resolution.
///
/// Carries both flags and both dimension pairs, so the tier can be re-derived
/// with [`QcResult::tier`] without repeating the comparison.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QcResult {
    /// `actual == expected`, compared as integers.
    pub dimensions_match: bool,
    /// Aspect ratios within [`ASPECT_RATIO_TOLERANCE`].
    pub aspect_ratio_match: bool,
    /// Required resolution.
    pub expected: Dimensions,
    /// Measured resolution.
    pub actual: Dimensions,
    /// Human-readable explanation.
    pub message: String,
}

impl QcResult {
    /// Classification, with an exact match taking precedence over an aspect match.
    pub fn tier(&self) -> QcTier {
        if self.dimensions_match {
            QcTier::Pass
        } else if self.aspect_ratio_match {
            QcTier::Warning
        } else {
            QcTier::Fail
        }
    }
}

/// Classify `measured` against `expected`.
///
/// Pure and total. A zero `measured.height` gives a non-finite aspect ratio,
/// which never matches and lands in [`QcTier::Fail`].
pub fn evaluate(measured: Dimensions, expected: Dimensions) -> QcResult {
    let dimensions_match = measured == expected;
    let diff = (expected.aspect_ratio() - measured.aspect_ratio()).abs();
    // NaN compares false, so degenerate input cannot match.
    let aspect_ratio_match = diff < ASPECT_RATIO_TOLERANCE;

    let mut result = QcResult {
        dimensions_match,
        aspect_ratio_match,
        expected,
        actual: measured,
        message: String::new(),
    };
    result.message = match result.tier() {
        QcTier::Pass => "Perfect! Dimensions match exactly.".to_string(),
        QcTier::Warning => format!(
            "Aspect ratio is correct but resolution differs. Expected {expected}, got {measured}"
        ),
        QcTier::Fail => format!("Dimensions mismatch. Expected {expected}, got {measured}"),
    };

    tracing::debug!(
        %measured,
        %expected,
        aspect_diff = diff,
        tier = %result.tier(),
        "qc evaluated"
    );
    result
}

/// [`evaluate`] against the full resolution of `spec`.
pub fn evaluate_for_stage(measured: Dimensions, spec: &StageSpec) -> QcResult {
    evaluate(measured, spec.total())
}

#[cfg(test)]
#[path = "../../tests/unit/qc/evaluate.rs"]
mod tests;
