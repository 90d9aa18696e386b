// Shared layout/camera/label tuning constants. All lengths are millimeters.

// Bounds
pub const FALLBACK_BOUNDS_MAX: f32 = 100.0; // edge of the unit box used when nothing is visible

// Layout
pub const ROW_GAP_WIDTH_CAP: f32 = 200.0; // printer widths above this don't widen the row gap
pub const ROW_GAP_FACTOR: f32 = 0.5;
pub const ROW_GAP_EMPTY: f32 = 80.0;

// Grid and axis guides
pub const GRID_MIN_SPAN: f32 = 400.0;
pub const GRID_STEP: f32 = 50.0;
pub const GRID_MARGIN: f32 = 200.0;
pub const GRID_MIN_DIVISIONS: u32 = 10;
pub const GRID_CELL_FINE: f32 = 25.0; // precise pointer
pub const GRID_CELL_COARSE: f32 = 60.0; // touch
pub const AXIS_MIN_LENGTH: f32 = 200.0;
pub const AXIS_HEAD_MIN: f32 = 20.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const FRAMING_SIZE_FACTOR: f32 = 1.4;
pub const FRAMING_BASE_DISTANCE: f32 = 200.0;
pub const FRAMING_OFFSET: [f32; 3] = [0.35, -1.0, 0.7]; // oblique three-quarter view
pub const FRAMING_TARGET_HEIGHT_FACTOR: f32 = 0.4;
pub const FRAMING_TARGET_MIN_HEIGHT: f32 = 60.0;
pub const ORBIT_MIN_DISTANCE: f32 = 200.0;
pub const ORBIT_MAX_DISTANCE: f32 = 5_000.0;
pub const TOP_DOWN_PADDING: f32 = 50.0;
pub const TOP_DOWN_MIN_DISTANCE: f32 = 200.0;
pub const TOP_DOWN_ZOOM_MIN: f32 = 0.5;
pub const TOP_DOWN_ZOOM_MAX: f32 = 2.0;
pub const MIN_ASPECT: f32 = 0.1;
pub const MIN_TAN: f32 = 1e-4;
pub const TWEEN_DURATION_MS: u64 = 320;

// Orientation gizmo
pub const GIZMO_FOV_DEG: f32 = 50.0;
pub const GIZMO_EYE_DISTANCE: f32 = 1.5;
pub const GIZMO_LABEL_OFFSET: f32 = 0.58;
pub const GIZMO_LABEL_SCALE: f32 = 0.45;
pub const GIZMO_ROTATE_SPEED: f32 = 0.0025; // radians per pixel
pub const GIZMO_DAMPING_DRAG: f32 = 0.9;
pub const GIZMO_DAMPING_RELEASE: f32 = 0.94;
pub const GIZMO_REST_VELOCITY: f32 = 1e-4;
pub const GIZMO_POLAR_EPS: f32 = 0.05;

// Flatten
pub const FLATTEN_THIN_SCALE: f32 = 0.001;

// Labels
pub const LABEL_HASH_BASE: i32 = 131;
pub const LABEL_SLOTS: i32 = 12;
pub const LABEL_SLOT_DEG: f32 = 30.0;
pub const LABEL_RADIUS_FACTOR: f32 = 0.3;
pub const LABEL_MIN_RADIUS: f32 = 50.0;
pub const LABEL_HEIGHT_OFFSET: f32 = 40.0;
pub const LABEL_MARGIN_2D: f32 = 16.0;
pub const LABEL_GROUND_Z: f32 = 5.0; // just above flattened geometry
pub const LABEL_CAMERA_CLEARANCE: f32 = 10.0;
pub const LABEL_FONT_PX: f32 = 22.0;
pub const LABEL_CHAR_WIDTH_EM: f32 = 0.6; // average glyph advance for the label font
pub const LABEL_PAD_X_PX: f32 = 14.0;
pub const LABEL_PAD_Y_PX: f32 = 8.0;
pub const LABEL_WORLD_SCALE: f32 = 0.35; // world mm per label pixel
pub const LABEL_HOVER_RADIUS_PX: f32 = 30.0;

// Highlight
pub const FILL_OPACITY: f32 = 0.18;
pub const FILL_OPACITY_HOVER: f32 = 0.32;
pub const EDGE_OPACITY: f32 = 0.6;
pub const EDGE_OPACITY_HOVER: f32 = 1.0;
pub const HOVER_LIGHTEN: f32 = 0.1;
pub const LABEL_BASE_OPACITY: f32 = 0.78;
pub const LABEL_HOVER_OPACITY: f32 = 1.0;

// Reference model
pub const REFERENCE_DEFAULT_COLOR: &str = "#ff8a3d";
pub const REFERENCE_FILL_OPACITY: f32 = 0.9;
pub const REFERENCE_EDGE_LIGHTEN: f32 = 0.2;

// Custom printers
pub const CUSTOM_BRAND: &str = "Custom";
pub const CUSTOM_PALETTE: [&str; 29] = [
    "#ff6f61", "#5adbb5", "#f4c95d", "#8a6be9", "#3fa7d6", "#ff9f1c", "#ef476f", "#ffd166",
    "#06d6a0", "#118ab2", "#9ef01a", "#ffa69e", "#ff6b6b", "#a7c957", "#ffc8dd", "#80ed99",
    "#ffb4a2", "#64dfdf", "#f07167", "#e36414", "#5f0f40", "#fee440", "#30c5ff", "#9d4edd",
    "#00f5d4", "#f77f00", "#5a189a", "#ff5d8f", "#4895ef",
];
