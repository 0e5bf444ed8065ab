use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{StageQcError, StageQcResult};

/// Largest accepted upload, 500 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 500 * 1024 * 1024;

/// Accepted still-image MIME types.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

/// Accepted video MIME types.
pub const ACCEPTED_VIDEO_TYPES: &[&str] = &["video/mp4", "video/quicktime", "video/x-m4v"];

/// Broad media category of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video.
    Video,
}

/// Map an accepted MIME type to its [`MediaKind`]; `None` for anything else.
pub fn media_kind_for_mime(mime: &str) -> Option<MediaKind> {
    if ACCEPTED_IMAGE_TYPES.contains(&mime) {
        Some(MediaKind::Image)
    } else if ACCEPTED_VIDEO_TYPES.contains(&mime) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// True if `mime` is on the allow-list.
pub fn is_accepted_mime(mime: &str) -> bool {
    media_kind_for_mime(mime).is_some()
}

/// Infer a MIME type from the file extension (case-insensitive).
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "mp4" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "m4v" => Some("video/x-m4v"),
        _ => None,
    }
}

/// Reject sizes above [`MAX_FILE_SIZE_BYTES`].
pub fn check_file_size(size_bytes: u64) -> StageQcResult<()> {
    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(StageQcError::rejected(format!(
            "file is {size_bytes} bytes, limit is {MAX_FILE_SIZE_BYTES} bytes"
        )));
    }
    Ok(())
}

/// A file that passed type and size gating and is ready to probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatedFile {
    /// Path as given.
    pub path: PathBuf,
    /// Final path component, for display.
    pub file_name: String,
    /// MIME type inferred from the extension.
    pub mime: &'static str,
    /// Category derived from `mime`.
    pub kind: MediaKind,
    /// Size on disk.
    pub size_bytes: u64,
}

/// Check that `path` is a regular file of an accepted type within the size limit.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn gate_file(path: &Path) -> StageQcResult<GatedFile> {
    let mime = mime_for_path(path).ok_or_else(|| {
        StageQcError::rejected(format!(
            "'{}' is not a supported type (png, jpg, jpeg, mp4, mov, m4v)",
            path.display()
        ))
    })?;
    let kind = media_kind_for_mime(mime)
        .ok_or_else(|| StageQcError::rejected(format!("unsupported MIME type '{mime}'")))?;

    let meta =
        std::fs::metadata(path).with_context(|| format!("stat '{}'", path.display()))?;
    if !meta.is_file() {
        return Err(StageQcError::rejected(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    check_file_size(meta.len())?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(mime, size_bytes = meta.len(), "file accepted");
    Ok(GatedFile {
        path: path.to_path_buf(),
        file_name,
        mime,
        kind,
        size_bytes: meta.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/gate.rs"]
mod tests;
