//! Shared numeric constants for the dashboard crate.

// ── Geometry policy ─────────────────────────────────────────────

/// Smallest width or height a resize may produce, in container percent.
pub const MIN_BOX_SIZE_PCT: f64 = 10.0;

/// Distance from a container edge, in percent, within which a resized edge
/// snaps flush to that container edge.
pub const SNAP_TO_END_PCT: f64 = 2.0;

/// Upper bound of every container-relative coordinate.
pub const FULL_PCT: f64 = 100.0;

// ── New widgets ─────────────────────────────────────────────────

/// Top offset of a freshly added widget, in percent.
pub const DEFAULT_TOP_PCT: f64 = 0.0;

/// Left offset of a freshly added widget, in percent.
pub const DEFAULT_LEFT_PCT: f64 = 0.0;

/// Width of a freshly added widget, in percent.
pub const DEFAULT_WIDTH_PCT: f64 = 25.0;

/// Height of a freshly added widget, in percent.
pub const DEFAULT_HEIGHT_PCT: f64 = 25.0;

// ── Hotspots ────────────────────────────────────────────────────

/// Thickness of an idle edge hotspot strip in CSS pixels.
pub const HOTSPOT_IDLE_PX: f64 = 20.0;

/// Thickness of a hotspot while its resize session is active.
pub const HOTSPOT_ACTIVE_PX: f64 = 200.0;

/// Outward offset of an active hotspot so it straddles the edge it drags.
pub const HOTSPOT_ACTIVE_OFFSET_PX: f64 = -100.0;
