use crate::scene::WebScene;
use buildvolume_core::{stl, Error, ReferenceModelKind, Viewer};
use js_sys::Uint8Array;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(url: &str, reason: impl std::fmt::Debug) -> Error {
    Error::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", reason),
    }
}

async fn fetch_ok(url: &str) -> Result<web::Response, Error> {
    let window = web::window().ok_or_else(|| fetch_error(url, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_error(url, e))?
        .dyn_into::<web::Response>()
        .map_err(|e| fetch_error(url, e))?;
    if !resp.ok() {
        return Err(fetch_error(url, format!("HTTP {}", resp.status())));
    }
    Ok(resp)
}

pub async fn fetch_text(url: &str) -> Result<String, Error> {
    let resp = fetch_ok(url).await?;
    let promise = resp.text().map_err(|e| fetch_error(url, e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| fetch_error(url, e))?
        .as_string()
        .ok_or_else(|| fetch_error(url, "body is not text"))
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, Error> {
    let resp = fetch_ok(url).await?;
    let promise = resp.array_buffer().map_err(|e| fetch_error(url, e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| fetch_error(url, e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

/// Fetch and register the printer catalog. Returns the number of printers.
pub async fn load_catalog(
    viewer: &Rc<RefCell<Viewer<WebScene>>>,
    url: &str,
) -> Result<usize, Error> {
    let text = fetch_text(url).await?;
    let printers = buildvolume_core::parse_catalog(&text)?;
    let mut viewer = viewer.borrow_mut();
    viewer.load_catalog(printers);
    log::info!("[loader] catalog: {} printers", viewer.catalog().len());
    Ok(viewer.catalog().len())
}

/// Fetch and decode a reference model, handing the outcome to the viewer.
pub async fn load_reference(
    viewer: Rc<RefCell<Viewer<WebScene>>>,
    kind: ReferenceModelKind,
    url: &'static str,
) {
    let result = match fetch_bytes(url).await {
        Ok(bytes) => stl::decode(&bytes),
        Err(e) => Err(e),
    };
    let mut viewer = viewer.borrow_mut();
    match result {
        Ok(mesh) => viewer.reference_model_loaded(kind, mesh),
        Err(e) => viewer.reference_model_failed(kind, &e),
    }
}
