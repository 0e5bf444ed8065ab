use std::{collections::HashSet, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::Dimensions,
    foundation::error::{StageQcError, StageQcResult},
    stage::def::{HD_GUIDE, ScreenDef, StageDef},
};

/// A pillar screen placed on the stage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PillarZone {
    /// Stable identifier (`P1`).
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Left edge in stage pixels; the zone covers `[x_offset, x_offset + pillar width)`.
    pub x_offset: u32,
}

/// A horizontal band of the stage spanning `[x_offset, x_offset + width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ZoneSpan {
    /// Left edge in stage pixels.
    pub x_offset: u32,
    /// Width in stage pixels.
    pub width: u32,
    /// Height in stage pixels.
    pub height: u32,
}

impl ZoneSpan {
    /// Exclusive right edge.
    pub fn end(self) -> u32 {
        self.x_offset + self.width
    }
}

/// Which screen a [`StageZone`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneKind {
    /// Index into [`StageSpec::pillars`].
    Pillar(usize),
    /// The center screen.
    Center,
}

/// One screen of the stage in left-to-right order, as yielded by [`StageSpec::zones`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageZone {
    /// Screen identity.
    pub kind: ZoneKind,
    /// Horizontal extent.
    pub span: ZoneSpan,
}

/// Validated, immutable stage geometry.
///
/// Built only through [`StageSpec::from_def`] (or [`Default`]), so the screens
/// always tile `[0, total width)` contiguously: every offset is derived from
/// the widths of the screens to its left.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StageSpec {
    total: Dimensions,
    pillar: Dimensions,
    pillars: Vec<PillarZone>,
    center: ZoneSpan,
    hd_guide: ZoneSpan,
    #[serde(skip)]
    pillars_left_of_center: usize,
}

impl StageSpec {
    /// Validate a [`StageDef`] and lay its screens out left to right.
    pub fn from_def(def: &StageDef) -> StageQcResult<Self> {
        if def.height == 0 {
            return Err(StageQcError::validation("stage height must be > 0"));
        }
        if def.center_width == 0 {
            return Err(StageQcError::validation("center_width must be > 0"));
        }

        let centers = def
            .screens
            .iter()
            .filter(|s| matches!(s, ScreenDef::Center { .. }))
            .count();
        if centers != 1 {
            return Err(StageQcError::validation(format!(
                "stage must have exactly one center screen, found {centers}"
            )));
        }
        if def.pillar_width == 0 && def.screens.len() > 1 {
            return Err(StageQcError::validation("pillar_width must be > 0"));
        }

        let mut seen_ids = HashSet::new();
        let mut pillars = Vec::with_capacity(def.screens.len() - 1);
        let mut center = None;
        let mut pillars_left_of_center = 0usize;
        let mut x = 0u32;

        for (idx, screen) in def.screens.iter().enumerate() {
            let (declared, width) = match screen {
                ScreenDef::Pillar { x_offset, .. } => (*x_offset, def.pillar_width),
                ScreenDef::Center { x_offset } => (*x_offset, def.center_width),
            };
            if let Some(declared) = declared
                && declared != x
            {
                return Err(StageQcError::validation(format!(
                    "screens[{idx}] declares x_offset {declared}, but screens to its left end at {x}"
                )));
            }

            match screen {
                ScreenDef::Pillar { id, label, .. } => {
                    if id.trim().is_empty() {
                        return Err(StageQcError::validation(format!(
                            "screens[{idx}] pillar id must be non-empty"
                        )));
                    }
                    if !seen_ids.insert(id.as_str()) {
                        return Err(StageQcError::validation(format!(
                            "duplicate pillar id '{id}'"
                        )));
                    }
                    if center.is_none() {
                        pillars_left_of_center += 1;
                    }
                    pillars.push(PillarZone {
                        id: id.clone(),
                        label: label.clone().unwrap_or_else(|| id.clone()),
                        x_offset: x,
                    });
                }
                ScreenDef::Center { .. } => {
                    center = Some(ZoneSpan {
                        x_offset: x,
                        width: def.center_width,
                        height: def.height,
                    });
                }
            }

            x = x.checked_add(width).ok_or_else(|| {
                StageQcError::validation("total stage width overflows u32")
            })?;
        }

        let center = center.ok_or_else(|| StageQcError::validation("missing center screen"))?;

        let guide = match def.hd_guide {
            Some(guide) => guide,
            None if HD_GUIDE.width <= center.width && HD_GUIDE.height <= def.height => HD_GUIDE,
            None => Dimensions::new(center.width, def.height),
        };
        if !guide.is_positive() {
            return Err(StageQcError::validation("hd_guide width/height must be > 0"));
        }
        if guide.width > center.width || guide.height > def.height {
            return Err(StageQcError::validation(format!(
                "hd_guide {guide} does not fit inside the {}x{} center screen",
                center.width, def.height
            )));
        }
        let hd_guide = ZoneSpan {
            x_offset: center.x_offset + (center.width - guide.width) / 2,
            width: guide.width,
            height: guide.height,
        };

        let spec = Self {
            total: Dimensions::new(x, def.height),
            pillar: Dimensions::new(def.pillar_width, def.height),
            pillars,
            center,
            hd_guide,
            pillars_left_of_center,
        };
        tracing::debug!(
            total = %spec.total,
            pillars = spec.pillars.len(),
            center_x = spec.center.x_offset,
            "stage spec validated"
        );
        Ok(spec)
    }

    /// Parse and validate a JSON [`StageDef`].
    pub fn from_json_str(json: &str) -> StageQcResult<Self> {
        let def: StageDef = serde_json::from_str(json)
            .map_err(|e| StageQcError::serde(format!("stage definition: {e}")))?;
        Self::from_def(&def)
    }

    /// Read, parse and validate a JSON [`StageDef`] file.
    #[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> StageQcResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read stage definition '{}'", path.display()))?;
        let def: StageDef = serde_json::from_str(&json).map_err(|e| {
            StageQcError::serde(format!("stage definition '{}': {e}", path.display()))
        })?;
        Self::from_def(&def)
    }

    /// Full stage canvas size; the resolution an asset must have to pass QC.
    pub fn total(&self) -> Dimensions {
        self.total
    }

    /// Size shared by every pillar.
    pub fn pillar(&self) -> Dimensions {
        self.pillar
    }

    /// Pillars, left to right.
    pub fn pillars(&self) -> &[PillarZone] {
        &self.pillars
    }

    /// Horizontal extent of pillar `idx`.
    pub fn pillar_span(&self, idx: usize) -> Option<ZoneSpan> {
        self.pillars.get(idx).map(|p| ZoneSpan {
            x_offset: p.x_offset,
            width: self.pillar.width,
            height: self.pillar.height,
        })
    }

    /// The center (safe) zone.
    pub fn center(&self) -> ZoneSpan {
        self.center
    }

    /// The advisory HD guide, centered inside [`StageSpec::center`].
    pub fn hd_guide(&self) -> ZoneSpan {
        self.hd_guide
    }

    /// Every screen in left-to-right order.
    pub fn zones(&self) -> impl Iterator<Item = StageZone> + '_ {
        let pillar = move |idx: usize| StageZone {
            kind: ZoneKind::Pillar(idx),
            span: ZoneSpan {
                x_offset: self.pillars[idx].x_offset,
                width: self.pillar.width,
                height: self.pillar.height,
            },
        };
        let split = self.pillars_left_of_center;
        (0..split)
            .map(pillar)
            .chain(std::iter::once(StageZone {
                kind: ZoneKind::Center,
                span: self.center,
            }))
            .chain((split..self.pillars.len()).map(pillar))
    }

    /// Stage x-positions where one screen ends and the next begins.
    pub fn boundaries(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self.zones().map(|z| z.span.end()).collect();
        out.pop();
        out
    }
}

impl Default for StageSpec {
    /// The layout of [`StageDef::five_screen`].
    fn default() -> Self {
        Self::from_def(&StageDef::five_screen()).expect("five-screen stage definition is valid")
    }
}

impl TryFrom<&StageDef> for StageSpec {
    type Error = StageQcError;

    fn try_from(def: &StageDef) -> StageQcResult<Self> {
        Self::from_def(def)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/spec.rs"]
mod tests;
