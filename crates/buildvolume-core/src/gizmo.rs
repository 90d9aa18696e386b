//! Orientation gizmo: a small camera that mirrors the main view, six clickable
//! face labels, and an inertial drag-orbit.

use crate::camera::Camera;
use crate::constants::*;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GizmoFace {
    Top,
    Bottom,
    Front,
    Back,
    Right,
    Left,
}

impl GizmoFace {
    pub const ALL: [GizmoFace; 6] = [
        GizmoFace::Top,
        GizmoFace::Bottom,
        GizmoFace::Front,
        GizmoFace::Back,
        GizmoFace::Right,
        GizmoFace::Left,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GizmoFace::Top => "Top",
            GizmoFace::Bottom => "Bottom",
            GizmoFace::Front => "Front",
            GizmoFace::Back => "Back",
            GizmoFace::Right => "Right",
            GizmoFace::Left => "Left",
        }
    }

    /// Direction from the pivot to the camera when this face is chosen.
    pub fn view(self) -> Vec3 {
        match self {
            GizmoFace::Top => Vec3::Z,
            GizmoFace::Bottom => Vec3::NEG_Z,
            GizmoFace::Front => Vec3::Y,
            GizmoFace::Back => Vec3::NEG_Y,
            GizmoFace::Right => Vec3::X,
            GizmoFace::Left => Vec3::NEG_X,
        }
    }

    pub fn label_position(self) -> Vec3 {
        self.view() * GIZMO_LABEL_OFFSET
    }
}

/// Camera for the gizmo viewport, oriented like `main`.
pub fn gizmo_camera(main: &Camera) -> Camera {
    let back = (main.eye - main.target).try_normalize().unwrap_or(Vec3::Z);
    Camera {
        eye: back * GIZMO_EYE_DISTANCE,
        target: Vec3::ZERO,
        up: main.up,
        aspect: 1.0,
        fovy_radians: GIZMO_FOV_DEG.to_radians(),
        znear: 0.1,
        zfar: 10.0,
    }
}

/// Face label under a pointer at `pointer` pixels in a square gizmo viewport
/// of `size` pixels. The label nearest the gizmo camera wins.
pub fn pick_face(gizmo: &Camera, pointer: Vec2, size: f32) -> Option<GizmoFace> {
    let half_extent = GIZMO_LABEL_SCALE / 2.0;
    let mut hits: SmallVec<[(GizmoFace, f32); 6]> = SmallVec::new();
    for face in GizmoFace::ALL {
        let pos = face.label_position();
        let Some(center) = gizmo.world_to_screen(pos, size, size) else {
            continue;
        };
        let depth = gizmo.eye.distance(pos);
        // label half-size in pixels at this depth
        let px_per_unit = size / (2.0 * depth * (gizmo.fovy_radians / 2.0).tan().max(MIN_TAN));
        let half_px = half_extent * px_per_unit;
        let d = (pointer - center).abs();
        if d.x <= half_px && d.y <= half_px {
            hits.push((face, depth));
        }
    }
    hits.into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(face, _)| face)
}

/// Drag-orbit state with velocity inertia.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GizmoOrbit {
    pub active: bool,
    pub polar: f32,
    pub azimuth: f32,
    pub vel_polar: f32,
    pub vel_azimuth: f32,
}

impl GizmoOrbit {
    /// Begin a drag from the current camera angles; velocity resets.
    pub fn start(&mut self, polar: f32, azimuth: f32) {
        self.polar = polar;
        self.azimuth = azimuth;
        self.vel_polar = 0.0;
        self.vel_azimuth = 0.0;
    }

    /// Pointer moved by `(dx, dy)` pixels with a button held.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.active = true;
        self.vel_azimuth -= dx * GIZMO_ROTATE_SPEED;
        self.vel_polar -= dy * GIZMO_ROTATE_SPEED;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_moving(&self) -> bool {
        self.active
            || self.vel_azimuth.abs() >= GIZMO_REST_VELOCITY
            || self.vel_polar.abs() >= GIZMO_REST_VELOCITY
    }

    /// Apply one frame of motion. Returns the new `(polar, azimuth)` or `None`
    /// when at rest.
    pub fn step(&mut self) -> Option<(f32, f32)> {
        if !self.is_moving() {
            return None;
        }
        self.azimuth += self.vel_azimuth;
        self.polar = (self.polar + self.vel_polar)
            .max(GIZMO_POLAR_EPS)
            .min(PI - GIZMO_POLAR_EPS);
        let damping = if self.active {
            GIZMO_DAMPING_DRAG
        } else {
            GIZMO_DAMPING_RELEASE
        };
        self.vel_azimuth *= damping;
        self.vel_polar *= damping;
        Some((self.polar, self.azimuth))
    }
}
