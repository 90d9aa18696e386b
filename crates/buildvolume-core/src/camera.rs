//! Camera description, framing math and the 2D/3D camera rig.

use crate::bounds::SceneBounds;
use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::PI;
use std::time::Duration;

/// Right-handed, Z-up perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -500.0, 350.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(MIN_ASPECT), self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    ///
    /// Looking straight along `up` would make the basis degenerate, so the
    /// world Y axis stands in for `up` in that case.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.eye).normalize_or_zero();
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            Vec3::Y
        } else {
            self.up
        };
        Mat4::look_at_rh(self.eye, self.target, up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Project a world point to pixel coordinates in a `width` x `height`
    /// viewport (origin top-left). `None` when the point is behind the camera.
    pub fn world_to_screen(&self, p: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj() * Vec4::new(p.x, p.y, p.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Orbit3D,
    TopDown2D,
}

/// Distance and polar-angle bounds enforced by the orbit controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitLimits {
    pub fn orbit_3d() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: 0.0,
            max_polar: PI,
        }
    }

    pub fn top_down(distance: f32) -> Self {
        Self {
            min_distance: distance * TOP_DOWN_ZOOM_MIN,
            max_distance: distance * TOP_DOWN_ZOOM_MAX,
            min_polar: 0.0,
            max_polar: 0.0,
        }
    }
}

/// Position/target pair a camera can be moved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Oblique three-quarter view of the scene.
pub fn frame_3d(bounds: &SceneBounds) -> CameraView {
    let distance = bounds.max_dimension() * FRAMING_SIZE_FACTOR + FRAMING_BASE_DISTANCE;
    let target = pivot_3d(bounds);
    CameraView {
        eye: target + Vec3::from(FRAMING_OFFSET) * distance,
        target,
    }
}

/// Look-at point for 3D framing, lifted so short scenes aren't viewed flat.
pub fn pivot_3d(bounds: &SceneBounds) -> Vec3 {
    Vec3::new(
        bounds.center.x,
        bounds.center.y,
        (bounds.size.z * FRAMING_TARGET_HEIGHT_FACTOR).max(FRAMING_TARGET_MIN_HEIGHT),
    )
}

/// Distance at which the padded XY bounds fill the vertical field of view.
pub fn top_down_distance(bounds: &SceneBounds, fovy_radians: f32, aspect: f32) -> f32 {
    let padded_x = bounds.size.x + TOP_DOWN_PADDING * 2.0;
    let padded_y = bounds.size.y + TOP_DOWN_PADDING * 2.0;
    let tan = (fovy_radians / 2.0).tan().max(MIN_TAN);
    let aspect = if aspect.is_finite() {
        aspect.max(MIN_ASPECT)
    } else {
        1.0
    };
    let from_height = padded_y / (2.0 * tan);
    let from_width = padded_x / (2.0 * tan) / aspect;
    from_height.max(from_width).max(TOP_DOWN_MIN_DISTANCE)
}

/// Aspect ratio of a viewport with both sides floored.
#[inline]
pub fn viewport_aspect(width: f32, height: f32) -> f32 {
    (width.max(1.0) / height.max(1.0)).max(MIN_ASPECT)
}

/// Straight-down view at `distance` above the scene center.
pub fn frame_2d(bounds: &SceneBounds, distance: f32) -> CameraView {
    let target = Vec3::new(bounds.center.x, bounds.center.y, 0.0);
    CameraView {
        eye: target + Vec3::Z * distance,
        target,
    }
}

#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A smoothed move between two camera views.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTween {
    pub from: CameraView,
    pub to: CameraView,
    pub elapsed: Duration,
    pub duration: Duration,
}

impl CameraTween {
    pub fn new(from: CameraView, to: CameraView) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: Duration::from_millis(TWEEN_DURATION_MS),
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Advance by `dt`; returns the interpolated view and whether it finished.
    /// The final step lands exactly on the destination.
    pub fn advance(&mut self, dt: Duration) -> (CameraView, bool) {
        self.elapsed += dt;
        let t = self.progress();
        if t >= 1.0 {
            return (self.to, true);
        }
        let e = smoothstep(t);
        (
            CameraView {
                eye: self.from.eye.lerp(self.to.eye, e),
                target: self.from.target.lerp(self.to.target, e),
            },
            false,
        )
    }
}

/// Main camera plus the 2D/3D state machine around it.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub camera: Camera,
    mode: CameraMode,
    limits: OrbitLimits,
    saved_3d: Option<CameraView>,
    tween: Option<CameraTween>,
    top_down_distance: f32,
    pivot: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            mode: CameraMode::Orbit3D,
            limits: OrbitLimits::orbit_3d(),
            saved_3d: None,
            tween: None,
            top_down_distance: 400.0,
            pivot: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_2d(&self) -> bool {
        self.mode == CameraMode::TopDown2D
    }

    pub fn limits(&self) -> OrbitLimits {
        self.limits
    }

    pub fn saved_3d(&self) -> Option<CameraView> {
        self.saved_3d
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn top_down_distance(&self) -> f32 {
        self.top_down_distance
    }

    /// Look-at point of the last 3D framing; the gizmo orbits around it.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.camera.eye,
            target: self.camera.target,
        }
    }

    pub fn set_view(&mut self, view: CameraView) {
        self.camera.eye = view.eye;
        self.camera.target = view.target;
    }

    /// Start a tween from the current view, replacing any in flight.
    pub fn animate_to(&mut self, to: CameraView) {
        if self.tween.is_some() {
            log::debug!("[camera] replacing active tween");
        }
        self.tween = Some(CameraTween::new(self.view(), to));
    }

    pub fn cancel_tween(&mut self) {
        self.tween = None;
    }

    /// Immediate reframe after a bounds-affecting change.
    pub fn reframe(&mut self, bounds: &SceneBounds) {
        self.pivot = pivot_3d(bounds);
        self.tween = None;
        match self.mode {
            CameraMode::Orbit3D => {
                self.set_view(frame_3d(bounds));
                self.limits = OrbitLimits::orbit_3d();
            }
            CameraMode::TopDown2D => self.apply_top_down(bounds),
        }
    }

    fn apply_top_down(&mut self, bounds: &SceneBounds) {
        self.top_down_distance =
            top_down_distance(bounds, self.camera.fovy_radians, self.camera.aspect);
        self.set_view(frame_2d(bounds, self.top_down_distance));
        self.limits = OrbitLimits::top_down(self.top_down_distance);
    }

    /// Save the 3D view and animate to a top-down framing.
    pub fn enter_2d(&mut self, bounds: &SceneBounds) {
        if self.is_2d() {
            return;
        }
        self.saved_3d = Some(self.view());
        self.mode = CameraMode::TopDown2D;
        self.top_down_distance =
            top_down_distance(bounds, self.camera.fovy_radians, self.camera.aspect);
        self.limits = OrbitLimits::top_down(self.top_down_distance);
        self.animate_to(frame_2d(bounds, self.top_down_distance));
        log::info!(
            "[camera] 2D top-down, distance {:.1}",
            self.top_down_distance
        );
    }

    /// Return to the saved 3D view, or frame the bounds when none was saved.
    pub fn exit_2d(&mut self, bounds: &SceneBounds) {
        if !self.is_2d() {
            return;
        }
        self.mode = CameraMode::Orbit3D;
        self.limits = OrbitLimits::orbit_3d();
        match self.saved_3d {
            Some(saved) => self.animate_to(saved),
            None => self.reframe(bounds),
        }
        log::info!("[camera] 3D orbit");
    }

    /// Viewport change. Only a top-down view depends on the aspect ratio.
    pub fn resize(&mut self, aspect: f32, bounds: &SceneBounds) {
        self.camera.aspect = aspect.max(MIN_ASPECT);
        if self.is_2d() {
            self.tween = None;
            self.apply_top_down(bounds);
        }
    }

    /// Per-frame update: advance the tween, then hold the top-down lock.
    /// Returns true while the camera is moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(tween) = self.tween.as_mut() {
            let (view, done) = tween.advance(dt);
            self.set_view(view);
            if done {
                self.tween = None;
            }
            return true;
        }
        if self.is_2d() {
            let target = Vec3::new(self.camera.target.x, self.camera.target.y, 0.0);
            self.camera.target = target;
            self.camera.eye = target + Vec3::Z * self.top_down_distance;
        }
        false
    }

    /// Rotate around the target by azimuth/polar deltas (radians).
    /// Disabled in top-down mode.
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        if self.is_2d() {
            return;
        }
        self.tween = None;
        let offset = self.camera.eye - self.camera.target;
        let (radius, polar, azimuth) = to_spherical(offset);
        let eps = 1e-4;
        let polar = (polar + d_polar)
            .max(self.limits.min_polar + eps)
            .min(self.limits.max_polar - eps);
        self.camera.eye = self.camera.target + from_spherical(radius, polar, azimuth + d_azimuth);
    }

    /// Multiply the viewing distance by `factor`, clamped to the limits.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.tween = None;
        if self.is_2d() {
            self.top_down_distance = (self.top_down_distance * factor)
                .max(self.limits.min_distance)
                .min(self.limits.max_distance);
            self.camera.eye = self.camera.target + Vec3::Z * self.top_down_distance;
            return;
        }
        let offset = self.camera.eye - self.camera.target;
        let dir = offset.try_normalize().unwrap_or(Vec3::Z);
        let distance = (offset.length() * factor)
            .max(self.limits.min_distance)
            .min(self.limits.max_distance);
        self.camera.eye = self.camera.target + dir * distance;
    }

    /// Pan in the ground plane by a screen-space delta in pixels.
    pub fn pan(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        self.tween = None;
        let offset = self.camera.eye - self.camera.target;
        let world_per_px = 2.0 * offset.length() * (self.camera.fovy_radians / 2.0).tan()
            / viewport_height.max(1.0);
        let forward = Vec3::new(-offset.x, -offset.y, 0.0)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        let right = forward.cross(Vec3::Z);
        let delta = (-right * dx_px + forward * dy_px) * world_per_px;
        self.camera.eye += delta;
        self.camera.target += delta;
    }

    /// Place the camera on `dir` from the pivot, keeping its current distance.
    pub fn snap_to_direction(&mut self, dir: Vec3) {
        let Some(dir) = dir.try_normalize() else {
            return;
        };
        self.tween = None;
        let distance = self.camera.eye.distance(self.pivot);
        self.camera.eye = self.pivot + dir * distance;
        self.camera.target = self.pivot;
        self.camera.up = Vec3::Z;
    }

    /// Place the camera at spherical angles around the pivot.
    pub fn orbit_pivot_to(&mut self, polar: f32, azimuth: f32) {
        self.tween = None;
        let distance = self.camera.eye.distance(self.pivot);
        self.camera.eye = self.pivot + from_spherical(distance, polar, azimuth);
        self.camera.target = self.pivot;
    }

    /// Spherical angles `(polar, azimuth)` of the eye around the pivot.
    pub fn pivot_angles(&self) -> (f32, f32) {
        let (_, polar, azimuth) = to_spherical(self.camera.eye - self.pivot);
        (polar, azimuth)
    }
}

/// `(radius, polar from +Z, azimuth from +X)`.
pub fn to_spherical(v: Vec3) -> (f32, f32, f32) {
    let radius = v.length();
    if radius <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let polar = (v.z / radius).clamp(-1.0, 1.0).acos();
    let azimuth = v.y.atan2(v.x);
    (radius, polar, azimuth)
}

pub fn from_spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let s = polar.sin();
    Vec3::new(
        radius * s * azimuth.cos(),
        radius * s * azimuth.sin(),
        radius * polar.cos(),
    )
}
