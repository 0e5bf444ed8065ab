use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::gate::{GatedFile, MediaKind},
    foundation::core::Dimensions,
    foundation::error::{StageQcError, StageQcResult},
};

/// Measured properties of a probed asset; the only input the QC core needs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasuredAsset {
    /// Width in pixels, always > 0.
    pub width: u32,
    /// Height in pixels, always > 0.
    pub height: u32,
    /// Image or video.
    pub kind: MediaKind,
    /// Container duration for videos, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

impl MeasuredAsset {
    /// Pixel dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Probe a gated file with the prober for its kind.
pub fn probe(file: &GatedFile) -> StageQcResult<MeasuredAsset> {
    match file.kind {
        MediaKind::Image => probe_image(&file.path),
        MediaKind::Video => probe_video(&file.path),
    }
}

/// Read image dimensions from the file header without decoding pixels.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn probe_image(path: &Path) -> StageQcResult<MeasuredAsset> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format '{}'", path.display()))?;
    let (width, height) = reader.into_dimensions().map_err(|e| {
        StageQcError::probe(format!("read image header '{}': {e}", path.display()))
    })?;
    measured(path, width, height, MediaKind::Image, None)
}

/// Probe video dimensions and duration through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn probe_video(path: &Path) -> StageQcResult<MeasuredAsset> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| StageQcError::probe(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(StageQcError::probe(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_ffprobe_json(path, &out.stdout)
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe video dimensions and duration through `ffprobe`.
///
/// Returns an error when the `media-ffmpeg` feature is disabled.
pub fn probe_video(_path: &Path) -> StageQcResult<MeasuredAsset> {
    Err(StageQcError::probe(
        "video assets require the 'media-ffmpeg' feature",
    ))
}

#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
fn parse_ffprobe_json(path: &Path, stdout: &[u8]) -> StageQcResult<MeasuredAsset> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| StageQcError::probe(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            StageQcError::probe(format!("no video stream found in '{}'", path.display()))
        })?;
    let width = video
        .width
        .ok_or_else(|| StageQcError::probe("missing video width from ffprobe"))?;
    let height = video
        .height
        .ok_or_else(|| StageQcError::probe("missing video height from ffprobe"))?;

    // ffprobe reports durations as decimal strings; "N/A" for live sources.
    let duration_secs = parsed
        .format
        .and_then(|f| f.duration)
        .or_else(|| video.duration.clone())
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0);

    measured(path, width, height, MediaKind::Video, duration_secs)
}

fn measured(
    path: &Path,
    width: u32,
    height: u32,
    kind: MediaKind,
    duration_secs: Option<f64>,
) -> StageQcResult<MeasuredAsset> {
    if width == 0 || height == 0 {
        return Err(StageQcError::probe(format!(
            "'{}' reports empty dimensions {width}x{height}",
            path.display()
        )));
    }
    tracing::debug!(width, height, ?kind, ?duration_secs, "probed asset");
    Ok(MeasuredAsset {
        width,
        height,
        kind,
        duration_secs,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
