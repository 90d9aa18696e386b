#![cfg(target_arch = "wasm32")]
use buildvolume_core::{ReferenceModelKind, Viewer, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod geometry;
mod gizmo;
mod input;
mod loader;
mod overlay;
mod render;
mod scene;

use constants::*;
use scene::WebScene;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("buildvolume-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::by_id(&document, ID_SCENE)
        .ok_or_else(|| anyhow::anyhow!("missing canvas #{}", ID_SCENE))?;

    let coarse = dom::prefers_coarse_pointer();
    let (css_w, css_h) = dom::css_size(&canvas);
    let mut viewport = Viewport::new(css_w.max(1.0), css_h.max(1.0));
    viewport.coarse_pointer = coarse;
    dom::sync_canvas_backing_size(&canvas, coarse);

    let viewer = Rc::new(RefCell::new(Viewer::new(WebScene::new(), viewport)));
    {
        let v = viewer.borrow();
        overlay::apply_theme(&document, v.theme());
        overlay::update_view_toggle(&document, v.is_2d());
    }

    let gizmo = match dom::by_id::<web::HtmlCanvasElement>(&document, ID_GIZMO) {
        Some(c) => match gizmo::GizmoView::new(c) {
            Ok(g) => Some(Rc::new(g)),
            Err(e) => {
                log::warn!("[init] gizmo disabled: {:?}", e);
                None
            }
        },
        None => None,
    };

    let wiring = events::Wiring::new(
        document.clone(),
        canvas.clone(),
        viewer.clone(),
        gizmo.clone(),
    );
    events::wire_canvas(&wiring);
    events::wire_controls(&wiring);
    events::wire_gizmo(&wiring);

    match loader::load_catalog(&viewer, CATALOG_URL).await {
        Ok(_) => {}
        Err(e) => log::error!("[init] {}", e),
    }
    events::render_list(&document, &viewer.borrow(), &dom::input_value(&document, ID_SEARCH));

    let kind = dom::select_value(&document, ID_MODEL_SELECT)
        .map(|key| ReferenceModelKind::from_key(&key))
        .unwrap_or_default();
    events::select_reference(&wiring, kind);

    let container = canvas
        .parent_element()
        .or_else(|| document.body().map(Into::into))
        .ok_or_else(|| anyhow::anyhow!("no label container"))?;
    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        gpu,
        canvas,
        overlay: overlay::LabelOverlay::new(document, container),
        gizmo,
        last_instant: Instant::now(),
        css_size: (css_w, css_h),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
