//! XY placement of printer boxes.
//!
//! Placement runs in three steps: a per-mode placement of the visible set,
//! a global centering pass, then the reference model is parked on the
//! smallest visible printer.

use crate::constants::{ROW_GAP_EMPTY, ROW_GAP_FACTOR, ROW_GAP_WIDTH_CAP};
use glam::{Vec2, Vec3};

/// How visible printers are arranged on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// Every box shares the same center.
    #[default]
    Center,
    /// Ascending by volume, left to right along X.
    RowByVolume,
    /// Every box shares its minimum corner.
    Corner,
}

impl AlignMode {
    /// Maps the `align-mode` select value; unknown values are `Center`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "row-x" => Self::RowByVolume,
            "corner" => Self::Corner,
            _ => Self::Center,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::RowByVolume => "row-x",
            Self::Corner => "corner",
        }
    }
}

/// A visible printer as seen by the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutItem<'a> {
    pub name: &'a str,
    pub size: Vec3,
}

impl LayoutItem<'_> {
    #[inline]
    fn volume(&self) -> f32 {
        self.size.x * self.size.y * self.size.z
    }
}

/// Gap between neighbours in a row. One value is shared by the whole row.
pub fn row_gap(items: &[LayoutItem<'_>]) -> f32 {
    items
        .iter()
        .map(|it| it.size.x.min(ROW_GAP_WIDTH_CAP))
        .reduce(f32::max)
        .map(|w| w * ROW_GAP_FACTOR)
        .unwrap_or(ROW_GAP_EMPTY)
}

/// Visible items ordered by ascending volume; equal volumes keep input order.
pub fn volume_order<'i, 'a>(items: &'i [LayoutItem<'a>]) -> Vec<&'i LayoutItem<'a>> {
    let mut order: Vec<&LayoutItem<'a>> = items.iter().collect();
    order.sort_by(|a, b| a.volume().total_cmp(&b.volume()));
    order
}

/// Per-mode placement of the visible items (before centering).
pub fn compute_placements<'a>(items: &[LayoutItem<'a>], mode: AlignMode) -> Vec<(&'a str, Vec2)> {
    match mode {
        AlignMode::Center => items.iter().map(|it| (it.name, Vec2::ZERO)).collect(),
        AlignMode::Corner => items
            .iter()
            .map(|it| (it.name, Vec2::new(it.size.x, it.size.y) * 0.5))
            .collect(),
        AlignMode::RowByVolume => {
            let order = volume_order(items);
            let gap = row_gap(items);
            let total: f32 = order.iter().map(|it| it.size.x).sum::<f32>()
                + gap * order.len().saturating_sub(1) as f32;
            let mut cursor = -total / 2.0;
            order
                .into_iter()
                .map(|it| {
                    let placed = (it.name, Vec2::new(cursor + it.size.x / 2.0, 0.0));
                    cursor += it.size.x + gap;
                    placed
                })
                .collect()
        }
    }
}

/// Offset that moves the union XY box of `footprints` onto the origin.
///
/// Each footprint is `(center, size)`. Returns `None` for an empty set.
pub fn centering_offset<I>(footprints: I) -> Option<Vec2>
where
    I: IntoIterator<Item = (Vec2, Vec2)>,
{
    let (lo, hi) = footprints.into_iter().fold(None, |acc: Option<(Vec2, Vec2)>, (c, size)| {
        let half = size * 0.5;
        let (lo, hi) = (c - half, c + half);
        Some(match acc {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        })
    })?;
    let offset = -(lo + hi) * 0.5;
    offset.is_finite().then_some(offset)
}

/// Index of the smallest-volume item; ties go to the earliest.
pub fn smallest_by_volume(items: &[LayoutItem<'_>]) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, it)| match best {
            Some((_, v)) if v <= it.volume() => best,
            _ => Some((i, it.volume())),
        })
        .map(|(i, _)| i)
}
