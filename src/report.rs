use std::{fmt, path::Path};

use crate::{
    assets::gate::{GatedFile, MediaKind, gate_file},
    assets::probe::{MeasuredAsset, probe},
    foundation::error::StageQcResult,
    qc::evaluate::{QcResult, QcTier, evaluate_for_stage},
    stage::spec::StageSpec,
};

/// Everything known about one checked file.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AssetReport {
    /// Final path component.
    pub file_name: String,
    /// Size on disk.
    pub size_bytes: u64,
    /// Image or video.
    pub kind: MediaKind,
    /// Video duration, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Classification derived from `qc`.
    pub tier: QcTier,
    /// Full comparison result.
    pub qc: QcResult,
}

impl AssetReport {
    /// Assemble a report from the outputs of the gating, probing and QC steps.
    pub fn new(file: &GatedFile, measured: &MeasuredAsset, qc: QcResult) -> Self {
        Self {
            file_name: file.file_name.clone(),
            size_bytes: file.size_bytes,
            kind: measured.kind,
            duration_secs: measured.duration_secs,
            tier: qc.tier(),
            qc,
        }
    }
}

impl fmt::Display for AssetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        writeln!(f, "[{}] {}", self.tier, self.file_name)?;
        writeln!(
            f,
            "  type:     {kind} ({})",
            format_file_size(self.size_bytes)
        )?;
        if let Some(d) = self.duration_secs {
            writeln!(f, "  duration: {}", format_duration(d))?;
        }
        writeln!(f, "  expected: {}", self.qc.expected)?;
        writeln!(f, "  actual:   {}", self.qc.actual)?;
        write!(f, "  {}", self.qc.message)
    }
}

/// Gate, probe and evaluate the file at `path` against `spec`.
///
/// Errors cover files that never reach QC (rejected or unreadable); a size
/// mismatch is reported through the returned [`AssetReport`].
#[tracing::instrument(level = "debug", skip(path, spec), fields(path = %path.display()))]
pub fn check_file(path: &Path, spec: &StageSpec) -> StageQcResult<AssetReport> {
    let gated = gate_file(path)?;
    let measured = probe(&gated)?;
    let qc = evaluate_for_stage(measured.dimensions(), spec);
    Ok(AssetReport::new(&gated, &measured, qc))
}

/// Human-readable byte count using 1024-based units, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0usize;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = ((bytes as f64 / scale as f64) * 100.0).round() / 100.0;
    format!("{value} {}", UNITS[unit])
}

/// `m:ss` with whole seconds, e.g. `1:05`.
pub fn format_duration(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
#[path = "../tests/unit/report.rs"]
mod tests;
