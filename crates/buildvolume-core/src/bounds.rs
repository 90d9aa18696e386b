use crate::constants::*;
use glam::{Vec2, Vec3};

/// Footprint of a box whose base sits on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxExtent {
    pub position: Vec2,
    pub size: Vec3,
    pub visible: bool,
}

/// A reference model's extent; unlike boxes its base may be lifted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelExtent {
    pub position: Vec3,
    pub size: Vec3,
}

/// Axis-aligned bounds of everything currently visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub size: Vec3,
    pub center: Vec3,
}

impl SceneBounds {
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            size: max - min,
            center: (min + max) * 0.5,
        }
    }

    /// Box used when nothing is visible, so consumers never see infinities.
    pub fn fallback() -> Self {
        Self::from_min_max(Vec3::ZERO, Vec3::splat(FALLBACK_BOUNDS_MAX))
    }

    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size.max_element()
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Union AABB over visible boxes and an optional visible reference model.
pub fn compute_bounds<I>(boxes: I, reference: Option<ModelExtent>) -> SceneBounds
where
    I: IntoIterator<Item = BoxExtent>,
{
    let mut acc: Option<(Vec3, Vec3)> = None;
    let mut fold = |lo: Vec3, hi: Vec3| {
        acc = Some(match acc {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        });
    };

    for b in boxes.into_iter().filter(|b| b.visible) {
        let half = Vec2::new(b.size.x, b.size.y) * 0.5;
        fold(
            Vec3::new(b.position.x - half.x, b.position.y - half.y, 0.0),
            Vec3::new(b.position.x + half.x, b.position.y + half.y, b.size.z),
        );
    }
    if let Some(m) = reference {
        let half = Vec2::new(m.size.x, m.size.y) * 0.5;
        fold(
            Vec3::new(m.position.x - half.x, m.position.y - half.y, m.position.z),
            Vec3::new(
                m.position.x + half.x,
                m.position.y + half.y,
                m.position.z + m.size.z,
            ),
        );
    }

    match acc {
        Some((min, max)) if min.is_finite() && max.is_finite() => {
            SceneBounds::from_min_max(min, max)
        }
        _ => SceneBounds::fallback(),
    }
}

/// Ground grid sized to cover the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub size: f32,
    pub divisions: u32,
}

impl GridSpec {
    pub fn for_bounds(bounds: &SceneBounds, coarse_pointer: bool) -> Self {
        let span = bounds.size.x.max(bounds.size.y).max(GRID_MIN_SPAN);
        let size = (span / GRID_STEP).ceil() * GRID_STEP + GRID_MARGIN;
        let cell = if coarse_pointer {
            GRID_CELL_COARSE
        } else {
            GRID_CELL_FINE
        };
        let divisions = ((size / cell).round() as u32).max(GRID_MIN_DIVISIONS);
        Self { size, divisions }
    }
}

/// XYZ arrows drawn from the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGuide {
    pub length: f32,
    pub head_length: f32,
    pub head_width: f32,
}

impl AxisGuide {
    pub fn for_bounds(bounds: &SceneBounds) -> Self {
        let length = (bounds.max_dimension() * 0.5).max(AXIS_MIN_LENGTH);
        let head_length = (length * 0.12).max(AXIS_HEAD_MIN);
        Self {
            length,
            head_length,
            head_width: head_length * 0.4,
        }
    }
}
