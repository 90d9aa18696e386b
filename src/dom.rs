use crate::constants::{MAX_PIXEL_RATIO, MAX_PIXEL_RATIO_TOUCH};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Typed lookup by id; `None` when missing or of another element type.
pub fn by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

/// Attach a listener for `event` on any event target, leaking the closure
/// for the life of the page.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn input_value(document: &web::Document, id: &str) -> String {
    by_id::<web::HtmlInputElement>(document, id)
        .map(|el| el.value())
        .unwrap_or_default()
}

pub fn is_checked(document: &web::Document, id: &str) -> Option<bool> {
    by_id::<web::HtmlInputElement>(document, id).map(|el| el.checked())
}

pub fn select_value(document: &web::Document, id: &str) -> Option<String> {
    by_id::<web::HtmlSelectElement>(document, id).map(|el| el.value())
}

pub fn prefers_coarse_pointer() -> bool {
    web::window()
        .and_then(|w| w.match_media("(pointer: coarse)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// CSS size of an element in pixels.
pub fn css_size(el: &web::Element) -> (f32, f32) {
    let rect = el.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

/// Keep the canvas backing store at CSS size times a capped device pixel
/// ratio. Returns the backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, coarse: bool) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let cap = if coarse {
        MAX_PIXEL_RATIO_TOUCH
    } else {
        MAX_PIXEL_RATIO
    };
    let dpr = w.device_pixel_ratio().min(cap).max(1.0);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}
