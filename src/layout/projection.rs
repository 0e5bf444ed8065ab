use crate::{
    foundation::core::{Dimensions, Point, Rect, Size},
    stage::spec::{StageSpec, ZoneSpan},
};

/// A pillar projected into surface coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProjectedPillar {
    /// Pillar identifier from the stage spec.
    pub id: String,
    /// Pillar label from the stage spec.
    pub label: String,
    /// Rectangle in surface pixels.
    pub rect: Rect,
}

/// Stage zones mapped onto a display surface showing an asset.
///
/// All rectangles share the surface's coordinate space. The asset is fitted
/// into the surface preserving its own aspect ratio and centered, and the
/// stage is stretched across the displayed asset width, so zone edges stay
/// aligned with the picture whatever the asset's resolution.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProjectedLayout {
    /// Surface the layout was computed for.
    pub surface: Size,
    /// Where the asset itself is drawn.
    pub display: Rect,
    /// Asset pixels to surface pixels.
    pub scale: f64,
    /// Stage pixels to surface pixels.
    pub overlay_scale: f64,
    /// Pillars, left to right.
    pub pillars: Vec<ProjectedPillar>,
    /// The center (safe) zone.
    pub center: Rect,
    /// Advisory HD guide inside the center zone.
    pub hd_guide: Rect,
    /// Surface x-positions of the screen seams, left to right.
    pub boundaries: Vec<f64>,
}

/// Project `spec` onto a `surface` that displays an asset of size `asset`.
///
/// Returns `None` when the surface has no area yet (not measured), so callers
/// draw nothing instead of degenerate rectangles.
///
/// `asset` must have non-zero sides; probing guarantees this before an asset
/// reaches the core.
pub fn project(spec: &StageSpec, surface: Size, asset: Dimensions) -> Option<ProjectedLayout> {
    if !(surface.width > 0.0 && surface.height > 0.0)
        || !surface.width.is_finite()
        || !surface.height.is_finite()
    {
        return None;
    }
    debug_assert!(
        asset.is_positive(),
        "project() called with non-positive asset dimensions {asset}"
    );
    if !asset.is_positive() {
        return None;
    }

    let asset = asset.to_size();
    let scale = (surface.width / asset.width).min(surface.height / asset.height);
    let display_size = Size::new(asset.width * scale, asset.height * scale);
    let origin = Point::new(
        center_offset(surface.width, display_size.width),
        center_offset(surface.height, display_size.height),
    );
    let overlay_scale = display_size.width / f64::from(spec.total().width);

    let band = |span: ZoneSpan| {
        Rect::from_origin_size(
            Point::new(
                origin.x + f64::from(span.x_offset) * overlay_scale,
                origin.y,
            ),
            Size::new(f64::from(span.width) * overlay_scale, display_size.height),
        )
    };

    let pillars = spec
        .pillars()
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| {
            spec.pillar_span(idx).map(|span| ProjectedPillar {
                id: p.id.clone(),
                label: p.label.clone(),
                rect: band(span),
            })
        })
        .collect();

    let boundaries = spec
        .boundaries()
        .into_iter()
        .map(|x| origin.x + f64::from(x) * overlay_scale)
        .collect();

    let layout = ProjectedLayout {
        surface,
        display: Rect::from_origin_size(origin, display_size),
        scale,
        overlay_scale,
        pillars,
        center: band(spec.center()),
        hd_guide: band(spec.hd_guide()),
        boundaries,
    };
    tracing::trace!(
        surface_w = surface.width,
        surface_h = surface.height,
        scale,
        overlay_scale,
        "projected stage layout"
    );
    Some(layout)
}

fn center_offset(container: f64, content: f64) -> f64 {
    (container - content).max(0.0) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/layout/projection.rs"]
mod tests;
