use crate::constants::{CLASS_LABEL, CLASS_LIGHT_THEME, ID_TOOLTIP, TOOLTIP_OFFSET_PX};
use crate::scene::WebScene;
use buildvolume_core::{Camera, Theme};
use fnv::FnvHashMap;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM name tags positioned over the canvas each frame.
pub struct LabelOverlay {
    document: web::Document,
    container: web::Element,
    elements: FnvHashMap<String, web::HtmlElement>,
}

impl LabelOverlay {
    pub fn new(document: web::Document, container: web::Element) -> Self {
        Self {
            document,
            container,
            elements: FnvHashMap::default(),
        }
    }

    fn create(&self, text: &str) -> Option<web::HtmlElement> {
        let el = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        el.set_class_name(CLASS_LABEL);
        el.set_text_content(Some(text));
        let style = el.style();
        _ = style.set_property("position", "absolute");
        _ = style.set_property("pointer-events", "none");
        _ = style.set_property("transform", "translate(-50%, -50%)");
        _ = style.set_property("white-space", "nowrap");
        _ = self.container.append_child(&el);
        Some(el)
    }

    /// Mirror the scene's labels: create new ones, drop removed ones and
    /// move the rest to their projected screen position.
    pub fn sync(&mut self, scene: &WebScene, camera: &Camera, width: f32, height: f32) {
        self.elements.retain(|name, el| {
            let keep = scene.label(name).is_some();
            if !keep {
                el.remove();
            }
            keep
        });
        for (name, label) in scene.labels() {
            if !self.elements.contains_key(name) {
                match self.create(&label.text) {
                    Some(el) => {
                        self.elements.insert(name.to_string(), el);
                    }
                    None => {
                        log::warn!("[overlay] could not create label for {}", name);
                        continue;
                    }
                }
            }
            let Some(el) = self.elements.get(name) else {
                continue;
            };
            let style = el.style();
            let screen = label
                .visible
                .then(|| camera.world_to_screen(label.position, width, height))
                .flatten();
            match screen {
                Some(p) => {
                    _ = style.set_property("display", "block");
                    _ = style.set_property("left", &format!("{:.1}px", p.x));
                    _ = style.set_property("top", &format!("{:.1}px", p.y));
                    _ = style.set_property("opacity", &format!("{:.2}", label.opacity));
                }
                None => {
                    _ = style.set_property("display", "none");
                }
            }
        }
    }
}

pub fn show_tooltip(document: &web::Document, text: &str, pointer: Vec2) {
    let Some(el) = document
        .get_element_by_id(ID_TOOLTIP)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    el.set_inner_text(text);
    let style = el.style();
    _ = style.set_property("left", &format!("{:.0}px", pointer.x + TOOLTIP_OFFSET_PX));
    _ = style.set_property("top", &format!("{:.0}px", pointer.y + TOOLTIP_OFFSET_PX));
    _ = el.class_list().remove_1("hidden");
}

pub fn hide_tooltip(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ID_TOOLTIP) {
        _ = el.class_list().add_1("hidden");
    }
}

pub fn apply_theme(document: &web::Document, theme: Theme) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = match theme {
            Theme::Light => cl.add_1(CLASS_LIGHT_THEME),
            Theme::Dark => cl.remove_1(CLASS_LIGHT_THEME),
        };
    }
    if let Some(btn) = document.get_element_by_id(crate::constants::ID_THEME) {
        btn.set_text_content(Some(match theme {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        }));
    }
}

/// Reflect the camera mode on the 2D/3D toggle button.
pub fn update_view_toggle(document: &web::Document, is_2d: bool) {
    if let Some(btn) = document.get_element_by_id(crate::constants::ID_VIEW2D) {
        btn.set_text_content(Some(if is_2d { "2D" } else { "3D" }));
        let title = if is_2d {
            "Switch to 3D view"
        } else {
            "Switch to 2D top view"
        };
        _ = btn.set_attribute("title", title);
        _ = btn.set_attribute("aria-label", title);
    }
}
