mod controls;
mod pointer;

pub use controls::{render_list, select_reference, wire_controls, wire_gizmo};
pub use pointer::wire_canvas;

use crate::gizmo::GizmoView;
use crate::input::PointerDrag;
use crate::scene::WebScene;
use buildvolume_core::Viewer;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Shared handles every listener closes over.
#[derive(Clone)]
pub struct Wiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer<WebScene>>>,
    pub gizmo: Option<Rc<GizmoView>>,
    pub drag: Rc<RefCell<PointerDrag>>,
    pub gizmo_last: Rc<RefCell<Option<Vec2>>>,
}

impl Wiring {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        viewer: Rc<RefCell<Viewer<WebScene>>>,
        gizmo: Option<Rc<GizmoView>>,
    ) -> Self {
        Self {
            document,
            canvas,
            viewer,
            gizmo,
            drag: Rc::new(RefCell::new(PointerDrag::default())),
            gizmo_last: Rc::new(RefCell::new(None)),
        }
    }
}

/// Pointer position in CSS pixels relative to `el`.
pub(crate) fn element_point(ev: &web::MouseEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    crate::input::local_point(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
    )
}
