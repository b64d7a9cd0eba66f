//! Shared numeric constants for the stage crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Multiplicative factor applied by one zoom-in step (divided on zoom-out).
pub const ZOOM_STEP: f64 = 1.1;

/// Smallest zoom scale the viewport accepts.
pub const MIN_ZOOM_SCALE: f64 = 0.1;

/// Largest zoom scale the viewport accepts.
pub const MAX_ZOOM_SCALE: f64 = 16.0;

/// Zoom scale at which content is shown at its natural size.
pub const ORIGINAL_ZOOM_SCALE: f64 = 1.0;

/// Relative tolerance used when deciding a zoom scale sits on a bound.
pub const ZOOM_BOUND_EPSILON: f64 = 1e-9;

// ── Tools ───────────────────────────────────────────────────────

/// Exclusivity group shared by the viewport control tools.
pub const CONTROL_GROUP: &str = "control";

/// Registered id of the default move tool.
pub const MOVE_TOOL_ID: &str = "move";

/// Registered id of the default pan/zoom tool.
pub const PAN_ZOOM_TOOL_ID: &str = "zoom-pan";
