// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so its constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use pano_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_within_reasonable_bounds() {
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
    assert!(CAMERA_ZNEAR > 0.0);
    // the panorama is drawn at infinity, but the frustum still has to be valid
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn drag_constants_are_sane() {
    assert!(DRAG_RADIANS_PER_PX > 0.0);
    // a full-width drag on a large screen should not spin more than a few turns
    assert!(DRAG_RADIANS_PER_PX * 4000.0 < 8.0 * std::f32::consts::PI);
    assert_eq!(PITCH_LIMIT, std::f32::consts::FRAC_PI_2);
}

#[test]
fn mobile_tokens_are_lowercase_and_unique() {
    for token in MOBILE_UA_TOKENS {
        assert_eq!(token, token.to_ascii_lowercase());
        assert!(!token.is_empty());
    }
    let mut sorted = MOBILE_UA_TOKENS.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), MOBILE_UA_TOKENS.len());
}

#[test]
fn element_ids_are_distinct() {
    let ids = [PANORAMA_CONTAINER_ID, TITLE_ID, DESCRIPTION_ID, FOOTER_ID];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn fade_out_group_targets_page_elements() {
    let manifest = pano_core::Manifest::from_json(r#"{"pano": "p.jpg"}"#).unwrap();
    let ids: Vec<&str> = manifest
        .fade_out_group()
        .iter()
        .map(|i| i.element_id)
        .collect();
    assert_eq!(ids, vec![TITLE_ID, DESCRIPTION_ID, FOOTER_ID]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn site_paths_and_fallbacks() {
    assert!(!LOCATION_ROOT.ends_with('/'));
    assert!(COMPILED_INDEX_URL.starts_with('/'));
    assert_eq!(LEGACY_YEAR_FALLBACK.len(), 4);
    assert!(FOOTER_FADE_SECS > 0.0);
    assert!(NAV_HEADER_SELECTOR.starts_with('.'));
    assert!(CLEAR_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}
