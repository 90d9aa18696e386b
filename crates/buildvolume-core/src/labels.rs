//! Name-tag placement.
//!
//! In 3D each label floats at a fixed, name-derived angle around its box so
//! labels of neighbouring printers rarely collide. In 2D labels sit inside
//! their footprint at one of six anchors, cycled alphabetically.

use crate::constants::*;
use glam::{Vec2, Vec3};

/// Polynomial string hash over UTF-16 units with 32-bit two's-complement
/// wrap. Kept bit-exact so label angles match across implementations.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(LABEL_HASH_BASE).wrapping_add(unit as i32)
    })
}

/// Angular slot in `-11..=11`; the sign of the hash is kept.
#[inline]
pub fn angle_slot(name: &str) -> i32 {
    name_hash(name) % LABEL_SLOTS
}

/// Local offset of a 3D label from its box's base center.
///
/// Depends only on the printer's own name and dimensions.
pub fn world_anchor(name: &str, size: Vec3) -> Vec3 {
    let radius = (size.x.max(size.y) * LABEL_RADIUS_FACTOR).max(LABEL_MIN_RADIUS);
    let angle = (angle_slot(name) as f32 * LABEL_SLOT_DEG).to_radians();
    Vec3::new(
        angle.cos() * radius,
        angle.sin() * radius,
        size.z + LABEL_HEIGHT_OFFSET,
    )
}

/// 3D label position: box position plus anchor, kept at least
/// [`LABEL_CAMERA_CLEARANCE`] below the camera and above the ground label
/// height.
pub fn place_label_3d(box_position: Vec2, anchor: Vec3, camera_z: f32) -> Vec3 {
    let z = anchor
        .z
        .min(camera_z - LABEL_CAMERA_CLEARANCE)
        .max(LABEL_GROUND_Z);
    Vec3::new(box_position.x + anchor.x, box_position.y + anchor.y, z)
}

/// Relative anchor points cycled across visible printers in 2D.
pub const ANCHORS_2D: [Vec2; 6] = [
    Vec2::new(-0.45, 0.45),  // top-left
    Vec2::new(0.45, 0.45),   // top-right
    Vec2::new(-0.45, -0.45), // bottom-left
    Vec2::new(0.45, -0.45),  // bottom-right
    Vec2::new(0.0, 0.45),    // top-center
    Vec2::new(0.0, -0.45),   // bottom-center
];

#[inline]
pub fn anchor_2d(order_index: usize) -> Vec2 {
    ANCHORS_2D[order_index % ANCHORS_2D.len()]
}

/// Alphabetical order used to assign 2D anchors.
pub fn order_2d<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = names.into_iter().collect();
    out.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    out
}

// JS-style sign: zero stays zero.
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// 2D label position inside a box footprint.
///
/// The anchor is scaled by the half footprint and pulled inward by the
/// margin, then clamped so the label's own half size stays inside the box.
/// When the footprint is too small for the label the upper bound wins.
pub fn place_label_2d(box_position: Vec2, footprint: Vec2, label_size: Vec2, anchor: Vec2) -> Vec3 {
    let half = footprint * 0.5;
    let half_label = label_size * 0.5;
    let raw = Vec2::new(
        box_position.x + anchor.x * half.x - sign(anchor.x) * LABEL_MARGIN_2D,
        box_position.y + anchor.y * half.y - sign(anchor.y) * LABEL_MARGIN_2D,
    );
    let lo = box_position - half + Vec2::splat(LABEL_MARGIN_2D) + half_label;
    let hi = box_position + half - Vec2::splat(LABEL_MARGIN_2D) - half_label;
    Vec3::new(
        raw.x.max(lo.x).min(hi.x),
        raw.y.max(lo.y).min(hi.y),
        LABEL_GROUND_Z,
    )
}

/// Estimated world size of a rendered name tag.
pub fn label_size(text: &str) -> Vec2 {
    let chars = text.chars().count() as f32;
    let width_px = chars * LABEL_FONT_PX * LABEL_CHAR_WIDTH_EM + LABEL_PAD_X_PX * 2.0;
    let height_px = LABEL_FONT_PX + LABEL_PAD_Y_PX * 2.0;
    Vec2::new(width_px, height_px) * LABEL_WORLD_SCALE
}

/// Name of the label closest to `pointer` within `max_px`, given labels'
/// projected screen positions.
pub fn nearest_label<'a, I>(screen_positions: I, pointer: Vec2, max_px: f32) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, Vec2)>,
{
    screen_positions
        .into_iter()
        .map(|(name, p)| (name, p.distance_squared(pointer)))
        .filter(|(_, d2)| *d2 <= max_px * max_px)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}
