use crate::constants::{JS_ENABLED_CLASS, NAV_HEADER_SELECTOR};
use crate::fetch;
use pano_core::constants::COMPILED_INDEX_URL;
use pano_core::nav::{
    header_transform, legacy_hash_id, parse_compiled_index, resolve_legacy_redirect, HeaderScroll,
    LegacyRedirect,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Page chrome shared by every page: JS-only styling, the hide-on-scroll
/// header and old `#id` links.
pub fn install(window: &web::Window, document: &web::Document) {
    if let Some(root) = document.document_element() {
        _ = root.class_list().add_1(JS_ENABLED_CLASS);
    }
    handle_legacy_hash(window);
    wire_header_scroll(window, document);
}

fn scroll_top(window: &web::Window, document: &web::Document) -> f64 {
    let y = window.page_y_offset().unwrap_or(0.0);
    if y != 0.0 {
        return y;
    }
    document
        .document_element()
        .map(|el| el.scroll_top() as f64)
        .unwrap_or(0.0)
}

fn update_header(document: &web::Document, scroll: &RefCell<HeaderScroll>, scroll_top: f64) {
    let Some(header) = document
        .query_selector(NAV_HEADER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    let height = header.offset_height() as f64;
    let dataset = header.dataset();
    let current = dataset
        .get("offset")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let offset = scroll.borrow_mut().update(scroll_top, current, height);
    _ = header
        .style()
        .set_property("transform", &header_transform(offset));
    _ = dataset.set("offset", &offset.to_string());
}

/// Scroll events are coalesced to one header update per animation frame.
fn wire_header_scroll(window: &web::Window, document: &web::Document) {
    let scroll = Rc::new(RefCell::new(HeaderScroll::default()));
    let ticking = Rc::new(Cell::new(false));
    let win = window.clone();
    let doc = document.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        let top = scroll_top(&win, &doc);
        if ticking.get() {
            return;
        }
        ticking.set(true);
        let ticking = ticking.clone();
        let scroll = scroll.clone();
        let doc = doc.clone();
        let on_frame = Closure::once(move || {
            update_header(&doc, &scroll, top);
            ticking.set(false);
        });
        _ = win.request_animation_frame(on_frame.as_ref().unchecked_ref());
        on_frame.forget();
    }) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &opts,
    );
    on_scroll.forget();
}

fn clear_hash(window: &web::Window) {
    let location = window.location();
    let Ok(pathname) = location.pathname() else {
        return;
    };
    if let Ok(history) = window.history() {
        _ = history.replace_state_with_url(&JsValue::NULL, "", Some(pathname.as_str()));
    }
}

/// `/#item` links from the old single-page layout are sent to
/// `/{year}/{item}` when the item is known and public.
fn handle_legacy_hash(window: &web::Window) {
    let Ok(hash) = window.location().hash() else {
        return;
    };
    let Some(item_id) = legacy_hash_id(&hash).map(str::to_owned) else {
        return;
    };
    log::info!("[nav] legacy hash link: {}", item_id);
    let window = window.clone();
    spawn_local(async move {
        let redirect = match fetch::fetch_text(COMPILED_INDEX_URL).await {
            Ok(text) => match parse_compiled_index(&text) {
                Ok(entries) => resolve_legacy_redirect(&entries, &item_id),
                Err(e) => {
                    log::error!("[nav] compiled index: {}", e);
                    LegacyRedirect::ClearHash
                }
            },
            Err(e) => {
                log::error!("[nav] compiled index: {:?}", e);
                LegacyRedirect::ClearHash
            }
        };
        match redirect {
            LegacyRedirect::Redirect(url) => {
                log::info!("[nav] redirecting to {}", url);
                _ = window.location().replace(&url);
            }
            LegacyRedirect::ClearHash => {
                log::info!("[nav] item {} not found or locked", item_id);
                clear_hash(&window);
            }
        }
    });
}
