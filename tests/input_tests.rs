// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn left_drag_orbits_other_buttons_pan() {
    assert_eq!(drag_kind(0, false, false), DragKind::Orbit);
    assert_eq!(drag_kind(0, true, false), DragKind::Pan);
    assert_eq!(drag_kind(1, false, false), DragKind::Pan);
    assert_eq!(drag_kind(2, false, false), DragKind::Pan);
}

#[test]
fn top_down_view_always_pans() {
    assert_eq!(drag_kind(0, false, true), DragKind::Pan);
}

#[test]
fn short_drag_counts_as_click() {
    let mut drag = PointerDrag::default();
    drag.begin(Vec2::new(10.0, 10.0), DragKind::Orbit);
    let delta = drag.update(Vec2::new(12.0, 10.0));
    assert_eq!(delta, Vec2::new(2.0, 0.0));
    assert!(drag.end(4.0));
    assert!(!drag.active);
    assert_eq!(drag.kind, None);
}

#[test]
fn travel_accumulates_across_moves() {
    let mut drag = PointerDrag::default();
    drag.begin(Vec2::ZERO, DragKind::Pan);
    // out and back: net zero, but travel is 6
    drag.update(Vec2::new(3.0, 0.0));
    drag.update(Vec2::ZERO);
    assert_eq!(drag.travel, 6.0);
    assert!(!drag.end(4.0));
}

#[test]
fn ending_an_idle_drag_is_not_a_click() {
    let mut drag = PointerDrag::default();
    assert!(!drag.end(4.0));
}

#[test]
fn wheel_factor_is_clamped_and_directional() {
    let out = wheel_zoom_factor(100.0, 1.001, 200.0);
    let back = wheel_zoom_factor(-100.0, 1.001, 200.0);
    assert!(out > 1.0);
    assert!(back < 1.0);
    assert!((out * back - 1.0).abs() < 1e-5);

    let huge = wheel_zoom_factor(10_000.0, 1.001, 200.0);
    assert_eq!(huge, wheel_zoom_factor(200.0, 1.001, 200.0));
    assert_eq!(wheel_zoom_factor(0.0, 1.001, 200.0), 1.0);
}

#[test]
fn wheel_factor_ignores_garbage() {
    assert_eq!(wheel_zoom_factor(f32::NAN, 1.001, 200.0), 1.0);
    assert_eq!(wheel_zoom_factor(f32::INFINITY, 1.001, 200.0), 1.0);
}

#[test]
fn dimension_fields_parse_or_reject() {
    assert_eq!(parse_dimension(" 250 "), 250.0);
    assert_eq!(parse_dimension("180.5"), 180.5);
    assert!(parse_dimension("").is_nan());
    assert!(parse_dimension("12mm").is_nan());
}

#[test]
fn local_point_subtracts_element_origin() {
    assert_eq!(local_point(150.0, 90.0, 100.0, 40.0), Vec2::new(50.0, 50.0));
}

#[test]
fn tooltip_lists_name_then_metrics() {
    let text = tooltip_text("Prusa MK4", "250 × 210 × 220 mm", "11.55 L");
    assert_eq!(text, "Prusa MK4\n250 × 210 × 220 mm\n11.55 L");
}
