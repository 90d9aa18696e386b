use crate::constants::MAX_FRAME_DT_MS;
use crate::dom;
use crate::gizmo::GizmoView;
use crate::overlay::LabelOverlay;
use crate::render;
use crate::scene::WebScene;
use buildvolume_core::Viewer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer<WebScene>>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub overlay: LabelOverlay,
    pub gizmo: Option<Rc<GizmoView>>,
    pub last_instant: Instant,
    pub css_size: (f32, f32),
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_millis(MAX_FRAME_DT_MS));
        self.last_instant = now;

        let mut viewer = self.viewer.borrow_mut();

        // Track the canvas' CSS size; the viewer projects labels in CSS pixels
        let css = dom::css_size(&self.canvas);
        if css != self.css_size && css.0 > 0.0 && css.1 > 0.0 {
            self.css_size = css;
            viewer.resize(css.0, css.1);
        }
        let coarse = viewer.viewport().coarse_pointer;
        let (w_px, h_px) = dom::sync_canvas_backing_size(&self.canvas, coarse);

        viewer.tick(dt);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w_px, h_px);
            g.sync(&mut viewer);
            let background = viewer.theme().palette().background;
            match g.render(viewer.camera(), background) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost; reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        self.overlay
            .sync(viewer.scene(), viewer.camera(), self.css_size.0, self.css_size.1);

        if let Some(gizmo) = &self.gizmo {
            gizmo.draw(viewer.camera(), viewer.theme() == buildvolume_core::Theme::Light);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
