// Page wiring and interaction tuning for the web front-end.
//
// Layout, framing and label numbers live in `buildvolume_core::constants`;
// this module only holds what is specific to the browser.

// Assets
pub const CATALOG_URL: &str = "data/printers.json";

// DOM ids
pub const ID_SCENE: &str = "scene";
pub const ID_GIZMO: &str = "gizmo";
pub const ID_TOOLTIP: &str = "metric-tooltip";
pub const ID_SEARCH: &str = "printer-search";
pub const ID_LIST: &str = "printer-list";
pub const ID_ALIGN: &str = "align-mode";
pub const ID_VIEW2D: &str = "view2d-toggle";
pub const ID_THEME: &str = "theme-toggle";
pub const ID_AXES: &str = "toggle-axes";
pub const ID_REFERENCE_TOGGLE: &str = "toggle-benchy";
pub const ID_REFERENCE_COLOR: &str = "benchy-color";
pub const ID_MODEL_SELECT: &str = "model-select";
pub const ID_CUSTOM_NAME: &str = "custom-name";
pub const ID_CUSTOM_X: &str = "custom-x";
pub const ID_CUSTOM_Y: &str = "custom-y";
pub const ID_CUSTOM_Z: &str = "custom-z";
pub const ID_CUSTOM_COLOR: &str = "custom-color";
pub const ID_CUSTOM_ADD: &str = "custom-add";

// CSS
pub const CLASS_LABEL: &str = "name-label";
pub const CLASS_LIGHT_THEME: &str = "theme-light";

// Pixel ratio caps
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const MAX_PIXEL_RATIO_TOUCH: f64 = 1.5;

// Main view pointer handling
pub const ORBIT_SPEED: f32 = 0.005; // radians per CSS pixel
pub const WHEEL_ZOOM_BASE: f32 = 1.0015; // distance factor per wheel delta unit
pub const WHEEL_DELTA_CLAMP: f32 = 200.0;
pub const CLICK_SLOP_PX: f32 = 4.0; // pointer travel that still counts as a click

// Tooltip offset from the pointer
pub const TOOLTIP_OFFSET_PX: f32 = 14.0;

// Frame loop
pub const MAX_FRAME_DT_MS: u64 = 100; // longer gaps (tab switch) are clamped

// Axis guide colors (X, Y, Z)
pub const AXIS_COLORS: [u32; 3] = [0xff5555, 0x55ff55, 0x5599ff];

// Reference mesh outline: edges between faces bent more than this are drawn
pub const FEATURE_EDGE_DEG: f32 = 1.0;

// Lighting for lit geometry
pub const LIGHT_DIR: [f32; 3] = [1.0, -1.0, 2.5];
pub const LIGHT_AMBIENT: f32 = 0.6;
pub const LIGHT_DIRECTIONAL: f32 = 0.85;
