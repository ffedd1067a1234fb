//! Shared numeric constants for the overlay crate.
//!
//! All sizes are display-space CSS pixels.

// ── Panels ──────────────────────────────────────────────────────

/// Width shared by every information panel.
pub const PANEL_WIDTH: f64 = 120.0;

/// Height of a collapsed panel: one summary line plus the toggle control.
pub const PANEL_BASE_HEIGHT: f64 = 28.0;

/// Extra height of an expanded panel (four telemetry lines).
pub const PANEL_EXPANDED_INCREMENT: f64 = 4.0 * PANEL_LINE_HEIGHT;

/// Height of the "no data" panel shown for entities without telemetry.
pub const PANEL_PLACEHOLDER_HEIGHT: f64 = 22.0;

/// Minimum horizontal gap between two panels.
pub const PANEL_SPACING: f64 = 6.0;

/// Gap between a detection box and a panel placed above it.
pub const PANEL_ANCHOR_GAP: f64 = 10.0;

/// Inner padding of a panel.
pub const PANEL_PADDING: f64 = 4.0;

/// Text line advance inside a panel.
pub const PANEL_LINE_HEIGHT: f64 = 16.0;

/// Side of the square expand/collapse control.
pub const TOGGLE_SIZE: f64 = 14.0;

// ── Markers ─────────────────────────────────────────────────────

/// Stroke width of the corner-bracket detection marker.
pub const MARKER_THICKNESS: f64 = 2.0;

/// Stroke width of panel outlines and connectors.
pub const PANEL_STROKE: f64 = 1.0;

/// Side of the decorative logo drawn next to identified entities.
pub const LOGO_SIZE: f64 = 16.0;

/// Gap between the logo and the detection box.
pub const LOGO_GAP: f64 = 2.0;

// ── Text ────────────────────────────────────────────────────────

pub const PANEL_FONT: &str = "12px Arial";
pub const PLACEHOLDER_FONT: &str = "bold 14px Arial";
pub const TOGGLE_FONT: &str = "bold 12px Arial";
pub const PLACEHOLDER_TEXT: &str = "NO DATA";
