use crate::constants::{DESCRIPTION_ID, FOOTER_ID, TITLE_ID};
use crate::dom;
use pano_core::constants::FOOTER_PROMPT;
use pano_core::{FadeOutItem, Manifest};
use web_sys as web;

/// Fill in the start-screen text for a location.
pub fn show_manifest(document: &web::Document, manifest: &Manifest) {
    dom::set_text(document, TITLE_ID, &manifest.title);
    dom::set_text(document, DESCRIPTION_ID, &manifest.desc);
    dom::set_text(document, FOOTER_ID, FOOTER_PROMPT);
}

/// CSS opacity fade for each item after `delay_ms`; pointer events are
/// switched off once an item has finished fading.
pub fn fade_out(document: &web::Document, items: Vec<FadeOutItem>, delay_ms: i32) {
    let document = document.clone();
    dom::set_timeout(delay_ms, move || {
        for item in items {
            let Some(el) = dom::html_element_by_id(&document, item.element_id) else {
                continue;
            };
            let style = el.style();
            _ = style.set_property("transition", &item.transition_css());
            _ = style.set_property("opacity", "0");
            let settle = el.clone();
            dom::set_timeout(item.settle_delay_ms(), move || {
                _ = settle.style().set_property("pointer-events", "none");
            });
        }
    });
}
