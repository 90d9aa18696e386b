// Property checks for layout, labels and framing.

mod common;

use buildvolume_core::*;
use common::{printer, RecordingScene};
use glam::{Vec2, Vec3};
use proptest::prelude::*;
use std::time::Duration;

fn dims() -> impl Strategy<Value = Vec3> {
    (20.0f32..600.0, 20.0f32..600.0, 20.0f32..600.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn align_mode() -> impl Strategy<Value = AlignMode> {
    prop_oneof![
        Just(AlignMode::Center),
        Just(AlignMode::RowByVolume),
        Just(AlignMode::Corner),
    ]
}

proptest! {
    #[test]
    fn angle_slot_stays_in_range(name in ".{0,40}") {
        let slot = angle_slot(&name);
        prop_assert!((-11..=11).contains(&slot), "slot {slot} for {name:?}");
    }

    #[test]
    fn label_2d_stays_inside_roomy_footprint(
        pos in (-500.0f32..500.0, -500.0f32..500.0),
        extra in (0.0f32..400.0, 0.0f32..400.0),
        text in "[A-Za-z0-9 ]{1,24}",
        index in 0usize..12,
    ) {
        let size = label_size(&text);
        let footprint = size + Vec2::splat(2.0 * 16.0) + Vec2::new(extra.0, extra.1);
        let center = Vec2::new(pos.0, pos.1);
        let placed = place_label_2d(center, footprint, size, anchor_2d(index));
        let half = footprint * 0.5;
        let half_label = size * 0.5;
        prop_assert!(placed.x - half_label.x >= center.x - half.x - 1e-3);
        prop_assert!(placed.x + half_label.x <= center.x + half.x + 1e-3);
        prop_assert!(placed.y - half_label.y >= center.y - half.y - 1e-3);
        prop_assert!(placed.y + half_label.y <= center.y + half.y + 1e-3);
        prop_assert_eq!(placed.z, 5.0);
    }

    #[test]
    fn label_3d_height_is_bounded(anchor_z in -100.0f32..1000.0, camera_z in -100.0f32..2000.0) {
        let placed = place_label_3d(Vec2::ZERO, Vec3::new(0.0, 0.0, anchor_z), camera_z);
        prop_assert!(placed.z >= 5.0);
        prop_assert!(placed.z <= anchor_z.max(5.0));
    }

    #[test]
    fn viewer_bounds_cover_visible_boxes_and_center_them(
        sizes in prop::collection::vec(dims(), 1..6),
        mode in align_mode(),
    ) {
        let printers: Vec<Printer> = sizes
            .iter()
            .enumerate()
            .map(|(i, s)| printer(&format!("P{i}"), s.x, s.y, s.z))
            .collect();
        let mut viewer = Viewer::new(RecordingScene::default(), Viewport::new(800.0, 600.0));
        viewer.load_catalog(printers);
        viewer.set_align_mode(mode);
        for i in 0..sizes.len() {
            viewer.set_printer_visible(&format!("P{i}"), true);
        }

        let bounds = *viewer.bounds();
        let tolerance = 1e-2;
        for (i, s) in sizes.iter().enumerate() {
            let rep = viewer.registry().get(&format!("P{i}")).unwrap();
            let half = Vec2::new(s.x, s.y) * 0.5;
            prop_assert!(rep.position.x - half.x >= bounds.min.x - tolerance);
            prop_assert!(rep.position.y - half.y >= bounds.min.y - tolerance);
            prop_assert!(rep.position.x + half.x <= bounds.max.x + tolerance);
            prop_assert!(rep.position.y + half.y <= bounds.max.y + tolerance);
            prop_assert!(s.z <= bounds.max.z + tolerance);
        }
        prop_assert_eq!(bounds.min.z, 0.0);
        // the union of footprints is centered on the origin
        prop_assert!((bounds.min.x + bounds.max.x).abs() < 0.05);
        prop_assert!((bounds.min.y + bounds.max.y).abs() < 0.05);
    }

    #[test]
    fn top_down_distance_fits_and_has_floor(
        lo in (-800.0f32..0.0, -800.0f32..0.0),
        hi in (0.0f32..800.0, 0.0f32..800.0),
        aspect in 0.2f32..4.0,
    ) {
        let bounds =
            SceneBounds::from_min_max(Vec3::new(lo.0, lo.1, 0.0), Vec3::new(hi.0, hi.1, 100.0));
        let fovy = 45f32.to_radians();
        let d = top_down_distance(&bounds, fovy, aspect);
        prop_assert!(d >= 200.0);
        let visible_h = 2.0 * d * (fovy / 2.0).tan();
        let visible_w = visible_h * aspect;
        prop_assert!(visible_h + 1e-2 >= bounds.size.y + 100.0);
        prop_assert!(visible_w + 1e-2 >= bounds.size.x + 100.0);
    }

    #[test]
    fn hover_never_compounds(toggles in prop::collection::vec(any::<bool>(), 1..30)) {
        let mut viewer = Viewer::new(RecordingScene::default(), Viewport::new(800.0, 600.0));
        viewer.load_catalog(vec![printer("P", 200.0, 200.0, 200.0)]);
        viewer.set_printer_visible("P", true);
        let color = Rgb::from_u32(0x3fa7d6);
        for on in toggles {
            viewer.hover_printer(on.then_some("P"));
            let expected = if on { hover_style(color) } else { base_style(color) };
            prop_assert_eq!(viewer.scene().boxes["P"].style, expected);
        }
    }

    #[test]
    fn tween_always_lands_on_target(
        steps in prop::collection::vec(1u64..120, 1..40),
        eye in (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..500.0),
    ) {
        let from = CameraView { eye: Vec3::new(0.0, -300.0, 300.0), target: Vec3::ZERO };
        let to = CameraView {
            eye: Vec3::new(eye.0, eye.1, eye.2),
            target: Vec3::new(5.0, 5.0, 0.0),
        };
        let mut tween = CameraTween::new(from, to);
        let mut last = None;
        for ms in steps {
            let (view, done) = tween.advance(Duration::from_millis(ms));
            last = Some((view, done));
            if done {
                break;
            }
        }
        let (view, done) = tween.advance(Duration::from_secs(1));
        prop_assert!(done);
        prop_assert_eq!(view, to);
        if let Some((view, true)) = last {
            prop_assert_eq!(view, to);
        }
    }
}
