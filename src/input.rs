use glam::Vec2;

/// What a drag on the main view does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Orbit,
    Pan,
}

/// Left button orbits, anything else (or shift) pans. The top-down view
/// cannot orbit, so every drag pans there.
#[inline]
pub fn drag_kind(button: i16, shift: bool, top_down: bool) -> DragKind {
    if button == 0 && !shift && !top_down {
        DragKind::Orbit
    } else {
        DragKind::Pan
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct PointerDrag {
    pub active: bool,
    pub kind: Option<DragKind>,
    pub start: Vec2,
    pub last: Vec2,
    pub travel: f32,
}

impl PointerDrag {
    pub fn begin(&mut self, pos: Vec2, kind: DragKind) {
        self.active = true;
        self.kind = Some(kind);
        self.start = pos;
        self.last = pos;
        self.travel = 0.0;
    }

    /// Record a move and return the delta since the previous position.
    pub fn update(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        self.travel += delta.length();
        delta
    }

    /// End the drag; returns true when it was short enough to be a click.
    pub fn end(&mut self, slop_px: f32) -> bool {
        let was_click = self.active && self.travel <= slop_px;
        self.active = false;
        self.kind = None;
        was_click
    }
}

/// Distance multiplier for a wheel delta; positive deltas zoom out.
#[inline]
pub fn wheel_zoom_factor(delta_y: f32, base: f32, clamp: f32) -> f32 {
    if !delta_y.is_finite() {
        return 1.0;
    }
    base.powf(delta_y.max(-clamp).min(clamp))
}

/// Parse a millimeter field. Blank or malformed text gives NaN so the
/// custom-printer validation rejects it.
#[inline]
pub fn parse_dimension(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(f32::NAN)
}

/// Pointer position relative to an element's top-left corner.
#[inline]
pub fn local_point(client_x: f32, client_y: f32, left: f32, top: f32) -> Vec2 {
    Vec2::new(client_x - left, client_y - top)
}

/// Tooltip body for a hovered printer.
pub fn tooltip_text(name: &str, dimensions: &str, liters: &str) -> String {
    format!("{name}\n{dimensions}\n{liters}")
}
