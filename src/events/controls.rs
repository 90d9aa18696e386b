use super::{element_point, Wiring};
use crate::constants::*;
use crate::dom;
use crate::input;
use crate::loader;
use crate::overlay;
use crate::scene::WebScene;
use buildvolume_core::{AlignMode, CustomPrinterInput, Printer, ReferenceModelKind, Viewer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const EMPTY_LIST_TEXT: &str = "No printers match your search.";
const DATA_PRINTER: &str = "data-printer";

/// Sidebar controls: search, printer list, view toggles, reference model and
/// the custom printer form.
pub fn wire_controls(w: &Wiring) {
    wire_search(w);
    wire_list(w);
    wire_align(w);
    wire_view_buttons(w);
    wire_reference(w);
    wire_custom_form(w);
}

fn current_query(document: &web::Document) -> String {
    dom::input_value(document, ID_SEARCH)
}

/// Rebuild the printer list for `query`.
pub fn render_list(document: &web::Document, viewer: &Viewer<WebScene>, query: &str) {
    let Some(list) = document.get_element_by_id(ID_LIST) else {
        log::warn!("[controls] missing #{}", ID_LIST);
        return;
    };
    list.set_inner_html("");
    let printers = viewer.filtered_printers(query);
    if printers.is_empty() {
        if let Ok(empty) = document.create_element("p") {
            empty.set_class_name("empty");
            empty.set_text_content(Some(EMPTY_LIST_TEXT));
            _ = list.append_child(&empty);
        }
        return;
    }
    for printer in printers {
        let visible = viewer.is_printer_visible(&printer.name);
        match printer_row(document, printer, visible) {
            Some(row) => {
                _ = list.append_child(&row);
            }
            None => log::warn!("[controls] could not build row for {}", printer.name),
        }
    }
}

fn printer_row(document: &web::Document, p: &Printer, visible: bool) -> Option<web::Element> {
    let row = document.create_element("label").ok()?;
    row.set_class_name("printer-item");
    row.set_attribute(DATA_PRINTER, &p.name).ok()?;

    let checkbox = document
        .create_element("input")
        .ok()?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?;
    checkbox.set_type("checkbox");
    checkbox.set_checked(visible);
    checkbox.set_attribute(DATA_PRINTER, &p.name).ok()?;

    let swatch = document
        .create_element("span")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    swatch.set_class_name("color");
    _ = swatch.style().set_property("background", &p.color.to_hex());

    let info = document.create_element("div").ok()?;
    info.set_class_name("info");
    let title = document.create_element("strong").ok()?;
    title.set_text_content(Some(&p.name));
    let summary = document.create_element("small").ok()?;
    summary.set_text_content(Some(&format!(
        "{} · {} · {}",
        p.brand,
        p.dimensions_text(),
        p.liters_text()
    )));
    info.append_child(&title).ok()?;
    info.append_child(&summary).ok()?;

    row.append_child(&checkbox).ok()?;
    row.append_child(&swatch).ok()?;
    row.append_child(&info).ok()?;
    Some(row)
}

/// Printer name of the list row an event came from.
fn row_printer(ev: &web::Event) -> Option<String> {
    let el = ev.target()?.dyn_into::<web::Element>().ok()?;
    el.closest(".printer-item")
        .ok()
        .flatten()?
        .get_attribute(DATA_PRINTER)
}

fn wire_search(w: &Wiring) {
    let Some(search) = w.document.get_element_by_id(ID_SEARCH) else {
        log::warn!("[controls] missing #{}", ID_SEARCH);
        return;
    };
    let w = w.clone();
    dom::add_listener(&search, "input", move |_ev: web::Event| {
        let query = current_query(&w.document);
        render_list(&w.document, &w.viewer.borrow(), &query);
    });
}

/// Checkbox changes and row hover, delegated to the list container so
/// re-rendering never re-wires rows.
fn wire_list(w: &Wiring) {
    let Some(list) = w.document.get_element_by_id(ID_LIST) else {
        log::warn!("[controls] missing #{}", ID_LIST);
        return;
    };

    let w_change = w.clone();
    dom::add_listener(&list, "change", move |ev: web::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(name) = input.get_attribute(DATA_PRINTER) else {
            return;
        };
        let mut viewer = w_change.viewer.borrow_mut();
        if !viewer.set_printer_visible(&name, input.checked()) {
            input.set_checked(viewer.is_printer_visible(&name));
        }
    });

    let w_over = w.clone();
    dom::add_listener(&list, "mouseover", move |ev: web::MouseEvent| {
        let name = row_printer(&ev);
        let mut viewer = w_over.viewer.borrow_mut();
        match name {
            Some(name) if viewer.is_printer_visible(&name) => {
                viewer.hover_printer(Some(&name));
            }
            _ => {
                viewer.hover_printer(None);
            }
        }
    });

    let w_leave = w.clone();
    dom::add_listener(&list, "mouseleave", move |_ev: web::MouseEvent| {
        w_leave.viewer.borrow_mut().hover_printer(None);
    });
}

fn wire_align(w: &Wiring) {
    let Some(select) = dom::by_id::<web::HtmlSelectElement>(&w.document, ID_ALIGN) else {
        log::warn!("[controls] missing #{}", ID_ALIGN);
        return;
    };
    let w = w.clone();
    let target = select.clone();
    dom::add_listener(&target, "change", move |_ev: web::Event| {
        let mode = AlignMode::from_key(&select.value());
        log::info!("[controls] align {}", mode.key());
        w.viewer.borrow_mut().set_align_mode(mode);
    });
}

fn wire_view_buttons(w: &Wiring) {
    let w2 = w.clone();
    dom::add_click_listener(&w.document, ID_VIEW2D, move || {
        let mut viewer = w2.viewer.borrow_mut();
        viewer.toggle_2d_mode();
        overlay::update_view_toggle(&w2.document, viewer.is_2d());
    });

    let w_theme = w.clone();
    dom::add_click_listener(&w.document, ID_THEME, move || {
        let theme = w_theme.viewer.borrow_mut().toggle_theme();
        overlay::apply_theme(&w_theme.document, theme);
    });

    if let Some(axes) = dom::by_id::<web::HtmlInputElement>(&w.document, ID_AXES) {
        let w_axes = w.clone();
        let target = axes.clone();
        dom::add_listener(&target, "change", move |_ev: web::Event| {
            w_axes.viewer.borrow_mut().set_axes_visible(axes.checked());
        });
    }
}

fn wire_reference(w: &Wiring) {
    if let Some(toggle) = dom::by_id::<web::HtmlInputElement>(&w.document, ID_REFERENCE_TOGGLE) {
        let w_toggle = w.clone();
        let target = toggle.clone();
        dom::add_listener(&target, "change", move |_ev: web::Event| {
            w_toggle
                .viewer
                .borrow_mut()
                .set_reference_visible(toggle.checked());
        });
    }

    if let Some(color) = dom::by_id::<web::HtmlInputElement>(&w.document, ID_REFERENCE_COLOR) {
        let w_color = w.clone();
        let target = color.clone();
        dom::add_listener(&target, "input", move |_ev: web::Event| {
            if let Err(e) = w_color.viewer.borrow_mut().set_reference_color(&color.value()) {
                log::warn!("[controls] {}", e);
            }
        });
    }

    if let Some(select) = dom::by_id::<web::HtmlSelectElement>(&w.document, ID_MODEL_SELECT) {
        let w_model = w.clone();
        let target = select.clone();
        dom::add_listener(&target, "change", move |_ev: web::Event| {
            let kind = ReferenceModelKind::from_key(&select.value());
            select_reference(&w_model, kind);
        });
    }
}

/// Switch the reference model and start fetching it.
pub fn select_reference(w: &Wiring, kind: ReferenceModelKind) {
    let url = w.viewer.borrow_mut().select_reference_model(kind);
    spawn_local(loader::load_reference(w.viewer.clone(), kind, url));
}

fn read_custom_form(document: &web::Document) -> CustomPrinterInput {
    CustomPrinterInput {
        name: dom::input_value(document, ID_CUSTOM_NAME),
        x: input::parse_dimension(&dom::input_value(document, ID_CUSTOM_X)),
        y: input::parse_dimension(&dom::input_value(document, ID_CUSTOM_Y)),
        z: input::parse_dimension(&dom::input_value(document, ID_CUSTOM_Z)),
        color: dom::input_value(document, ID_CUSTOM_COLOR),
    }
}

fn wire_custom_form(w: &Wiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_click_listener(&document, ID_CUSTOM_ADD, move || {
        let form = read_custom_form(&w.document);
        let mut viewer = w.viewer.borrow_mut();
        match viewer.add_custom_printer(form) {
            Some(name) => {
                log::info!("[controls] added {}", name);
                render_list(&w.document, &viewer, &current_query(&w.document));
            }
            None => log::warn!("[controls] custom printer needs positive dimensions"),
        }
    });
}

/// Face clicks and drag-to-orbit on the orientation cube.
pub fn wire_gizmo(w: &Wiring) {
    let Some(view) = w.gizmo.clone() else {
        return;
    };
    let target = view.canvas().clone();

    let w_down = w.clone();
    let view_down = view.clone();
    dom::add_listener(&target, "pointerdown", move |ev: web::PointerEvent| {
        ev.prevent_default();
        let css = element_point(&ev, view_down.canvas());
        let mut viewer = w_down.viewer.borrow_mut();
        if let Some(face) = view_down.pick(viewer.camera(), view_down.to_canvas_px(css)) {
            viewer.gizmo_face_clicked(face);
        }
        viewer.gizmo_drag_start();
        *w_down.gizmo_last.borrow_mut() = Some(css);
        _ = view_down.canvas().set_pointer_capture(ev.pointer_id());
    });

    let w_move = w.clone();
    let view_move = view.clone();
    dom::add_listener(&target, "pointermove", move |ev: web::PointerEvent| {
        if ev.buttons() == 0 {
            return;
        }
        let css = element_point(&ev, view_move.canvas());
        let mut last = w_move.gizmo_last.borrow_mut();
        let Some(prev) = last.replace(css) else {
            return;
        };
        drop(last);
        let d = css - prev;
        w_move.viewer.borrow_mut().gizmo_drag_move(d.x, d.y);
    });

    for event in ["pointerup", "pointerleave", "pointercancel"] {
        let w_up = w.clone();
        let view_up = view.clone();
        dom::add_listener(&target, event, move |ev: web::PointerEvent| {
            if w_up.gizmo_last.borrow_mut().take().is_none() {
                return;
            }
            _ = view_up.canvas().release_pointer_capture(ev.pointer_id());
            w_up.viewer.borrow_mut().gizmo_drag_end();
        });
    }
}
