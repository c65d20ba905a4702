//! Shared canvas constants.

/// World-space width of a canvas item card.
pub const ITEM_WIDTH: f64 = 160.0;

/// World-space height of a canvas item card.
pub const ITEM_HEIGHT: f64 = 56.0;

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative step for wheel zoom, per notch.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Multiplicative step for the zoom toolbar buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// World-space radius of a connector hit circle.
pub const CONNECTOR_HIT_RADIUS: f64 = 12.0;

/// Default hit-test slop around an item body, in world units.
pub const DEFAULT_HIT_RADIUS: f64 = 3.0;

/// Color assigned to agents whose definition file carries none.
pub const DEFAULT_AGENT_COLOR: &str = "#007bff";

/// Name of the per-project directory holding agent definition files.
pub const AGENTS_DIR: &str = "agents";

/// File name of the flushed workflow layout inside a project.
pub const WORKFLOW_FILE: &str = "workflow.json";
