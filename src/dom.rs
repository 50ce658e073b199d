use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn html_element_by_id(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Click listener the browser removes after its first call.
pub fn add_once_click_listener(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// Run `handler` once after `delay_ms`.
pub fn set_timeout(delay_ms: i32, handler: impl FnOnce() + 'static) {
    let closure = Closure::once(handler);
    if let Some(window) = web::window() {
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        );
    }
    closure.forget();
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
