use super::{element_point, Wiring};
use crate::constants::{CLICK_SLOP_PX, ORBIT_SPEED, WHEEL_DELTA_CLAMP, WHEEL_ZOOM_BASE};
use crate::dom;
use crate::input::{self, DragKind};
use crate::overlay;
use glam::Vec2;
use web_sys as web;

/// Orbit, pan, zoom and hover on the main view.
pub fn wire_canvas(w: &Wiring) {
    wire_pointerdown(w);
    wire_pointermove(w);
    wire_pointerup(w);
    wire_wheel(w);
    wire_leave(w);

    // Right drag pans; keep the browser menu out of the way
    dom::add_listener(&w.canvas, "contextmenu", |ev: web::Event| {
        ev.prevent_default();
    });
}

fn wire_pointerdown(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointerdown", move |ev: web::PointerEvent| {
        let pos = element_point(&ev, &w.canvas);
        let mut viewer = w.viewer.borrow_mut();
        let kind = input::drag_kind(ev.button(), ev.shift_key(), viewer.is_2d());
        w.drag.borrow_mut().begin(pos, kind);
        viewer.begin_orbit_drag();
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        overlay::hide_tooltip(&w.document);
    });
}

fn wire_pointermove(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointermove", move |ev: web::PointerEvent| {
        let pos = element_point(&ev, &w.canvas);
        let mut drag = w.drag.borrow_mut();
        if drag.active {
            let delta = drag.update(pos);
            let kind = drag.kind;
            drop(drag);
            let mut viewer = w.viewer.borrow_mut();
            match kind {
                Some(DragKind::Orbit) => {
                    viewer.orbit_drag(-delta.x * ORBIT_SPEED, -delta.y * ORBIT_SPEED)
                }
                Some(DragKind::Pan) => viewer.pan_drag(delta.x, delta.y),
                None => {}
            }
            return;
        }
        drop(drag);
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        update_hover(&w, Some(pos), client);
    });
}

fn wire_pointerup(w: &Wiring) {
    for event in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let target = w.canvas.clone();
        dom::add_listener(&target, event, move |ev: web::PointerEvent| {
            let was_click = w.drag.borrow_mut().end(CLICK_SLOP_PX);
            _ = w.canvas.release_pointer_capture(ev.pointer_id());
            w.viewer.borrow_mut().end_orbit_drag();
            // Touch has no hover, so a tap picks the label under the finger
            let coarse = w.viewer.borrow().viewport().coarse_pointer;
            if was_click && coarse {
                let pos = element_point(&ev, &w.canvas);
                let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
                update_hover(&w, Some(pos), client);
            }
        });
    }
}

fn wire_wheel(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let factor =
            input::wheel_zoom_factor(ev.delta_y() as f32, WHEEL_ZOOM_BASE, WHEEL_DELTA_CLAMP);
        let mut viewer = w.viewer.borrow_mut();
        viewer.on_wheel(factor);
        overlay::update_view_toggle(&w.document, viewer.is_2d());
    });
}

fn wire_leave(w: &Wiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointerleave", move |_ev: web::PointerEvent| {
        if w.drag.borrow().active {
            return;
        }
        update_hover(&w, None, Vec2::ZERO);
    });
}

/// Hover the label nearest `pos` and show or hide the size tooltip.
fn update_hover(w: &Wiring, pos: Option<Vec2>, client: Vec2) {
    let mut viewer = w.viewer.borrow_mut();
    viewer.hover(pos);
    match viewer.hovered_printer() {
        Some(p) => {
            let text = input::tooltip_text(&p.name, &p.dimensions_text(), &p.liters_text());
            overlay::show_tooltip(&w.document, &text, client);
        }
        None => overlay::hide_tooltip(&w.document),
    }
}
