use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Selector for page chrome that must keep its own clicks and taps.
const INTERACTIVE_CHROME: &str = "button, a, input, textarea, select, [role=button]";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Click listener on `#element_id`; `None` when the element is absent.
pub fn click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<EventListener> {
    let el = document.get_element_by_id(element_id)?;
    Some(EventListener::new(&el, "click", move |_| handler()))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// True when the event started on a button, link or form control.
///
/// Walks the target's ancestry so a tap on an icon inside a button counts too.
pub fn is_interactive_target(event: &web::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_CHROME).ok().flatten())
        .is_some()
}

/// Parse a `data-*` attribute; `None` when missing or malformed.
pub fn data_attr<T: std::str::FromStr>(el: &web::Element, name: &str) -> Option<T> {
    let raw = el.get_attribute(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[mount] ignoring malformed {}=\"{}\"", name, raw);
            None
        }
    }
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        } else {
            _ = cl.add_1("hidden");
            // fallback for pages without the CSS class
            _ = el.set_attribute("style", "display:none");
        }
    }
}

pub fn is_visible(document: &web::Document, id: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(el) => {
            !el.class_list().contains("hidden")
                && !el
                    .get_attribute("style")
                    .map(|s| s.contains("display:none"))
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// Current value of `<input id=...>`, or empty.
pub fn input_value(document: &web::Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn clear_input(document: &web::Document, id: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}
