//! Pill and dot rendering.
//!
//! Rendering is a pure function of the animation opacity, the workspace
//! snapshot and the palette: a capsule-shaped background with one dot
//! per slot, the active workspace drawn larger, occupied workspaces
//! brighter, empty slots dimmed.  Every color's alpha is multiplied by
//! the global opacity so the whole pill fades as one.
//!
//! The geometry helpers are kept free of cairo so the layout can be
//! unit-tested headless.

use crate::config::OverlayConfig;
use crate::palette::{Palette, Rgba};
use crate::workspaces::WorkspaceState;
use gtk4::cairo;
use std::f64::consts::PI;

/// Below this opacity nothing is drawn at all.
pub const MIN_VISIBLE_OPACITY: f64 = 0.001;

/// Surface size (width, height) in pixels for `dots` dot slots.
pub fn surface_size(dots: usize, cfg: &OverlayConfig) -> (i32, i32) {
    let span = dots.saturating_sub(1) as f64 * cfg.dot_spacing;
    let w = cfg.pad_h * 2.0 + span + cfg.active_dot_radius * 2.0;
    let h = cfg.pad_v * 2.0 + cfg.active_dot_radius * 2.0;
    (w.ceil() as i32, h.ceil() as i32)
}

/// X coordinates of `dots` dot centres, horizontally centred in `width`.
pub fn dot_centers(dots: usize, width: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let span = dots.saturating_sub(1) as f64 * spacing;
    let start = (width - span) / 2.0;
    (0..dots).map(move |i| start + i as f64 * spacing)
}

/// Color and radius for the dot of workspace `ws`.
fn dot_style(
    ws: i32,
    current: i32,
    occupied: bool,
    palette: &Palette,
    cfg: &OverlayConfig,
) -> (Rgba, f64) {
    if ws == current {
        (palette.active, cfg.active_dot_radius)
    } else if occupied {
        (palette.occupied, cfg.dot_radius)
    } else {
        (palette.dim, cfg.dot_radius - 1.0)
    }
}

fn set_source(cr: &cairo::Context, color: Rgba, opacity: f64) {
    cr.set_source_rgba(color.r, color.g, color.b, color.a * opacity);
}

/// Draw the indicator into a `width` × `height` surface.
///
/// Skips all drawing when `opacity` is negligible.
pub fn draw_indicator(
    cr: &cairo::Context,
    width: f64,
    height: f64,
    opacity: f64,
    state: &WorkspaceState,
    dots: usize,
    palette: &Palette,
    cfg: &OverlayConfig,
) -> Result<(), cairo::Error> {
    if opacity < MIN_VISIBLE_OPACITY {
        return Ok(());
    }

    // Capsule background: two half-circle caps joined by straight edges.
    let r = height / 2.0;
    cr.new_sub_path();
    cr.arc(r, r, r, PI * 0.5, PI * 1.5);
    cr.arc(width - r, r, r, PI * 1.5, PI * 0.5);
    cr.close_path();
    set_source(cr, palette.background, opacity);
    cr.fill()?;

    let cy = height / 2.0;
    for (i, cx) in dot_centers(dots, width, cfg.dot_spacing).enumerate() {
        let ws = i as i32 + 1;
        let (color, radius) = dot_style(ws, state.current(), state.is_occupied(ws), palette, cfg);
        set_source(cr, color, opacity);
        cr.arc(cx, cy, radius, 0.0, PI * 2.0);
        cr.fill()?;
    }

    Ok(())
}
