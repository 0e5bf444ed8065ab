//! stageqc checks media assets against a multi-screen stage and maps the
//! stage's screens onto any display surface.
//!
//! A stage is one center (safe) screen flanked by pillar screens, all the same
//! height, laid edge to edge. The default is the 4140x1080 five-screen stage:
//! pillars at 0, 360, 3420 and 3780 (360px wide) around a 2700px center at
//! 720, with an advisory 1920x1080 HD guide centered in it.
//!
//! # Pipeline overview
//!
//! 1. **Gate**: [`gate_file`] checks the file type and size.
//! 2. **Probe**: [`probe`] measures pixel dimensions (image header or `ffprobe`).
//! 3. **Evaluate**: [`evaluate`] classifies the dimensions as pass, warning or fail.
//! 4. **Project** (for drawing): [`project`] maps the stage zones onto a surface.
//!
//! Steps 3 and 4 are pure, synchronous and independent of each other. All IO
//! happens in steps 1 and 2.
//!
//! # Configuration
//!
//! Stage geometry is a [`StageDef`] (JSON via Serde), validated once into an
//! immutable [`StageSpec`]. Zone offsets are derived from widths, so a valid
//! spec always tiles its full width with no gaps or overlaps.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod qc;
mod stage;

/// Per-file QC reports and display helpers.
pub mod report;

pub use assets::gate::{
    ACCEPTED_IMAGE_TYPES, ACCEPTED_VIDEO_TYPES, GatedFile, MAX_FILE_SIZE_BYTES, MediaKind,
    check_file_size, gate_file, is_accepted_mime, media_kind_for_mime, mime_for_path,
};
pub use assets::probe::{MeasuredAsset, probe, probe_image, probe_video};
pub use foundation::core::{Dimensions, Point, Rect, Size};
pub use foundation::error::{StageQcError, StageQcResult};
pub use layout::projection::{ProjectedLayout, ProjectedPillar, project};
pub use qc::evaluate::{ASPECT_RATIO_TOLERANCE, QcResult, QcTier, evaluate, evaluate_for_stage};
pub use report::{AssetReport, check_file, format_duration, format_file_size};
pub use stage::def::{ScreenDef, StageDef};
pub use stage::spec::{PillarZone, StageSpec, StageZone, ZoneKind, ZoneSpan};
