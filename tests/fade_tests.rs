// Host-side tests for the timed fades.

use pano_core::fade::{Fade, FadeOutItem};

#[test]
fn fade_is_anchored_to_first_timestamp() {
    let mut fade = Fade::from_secs(4.0);
    assert_eq!(fade.duration_ms(), 4000.0);
    assert!(!fade.is_complete(0.0));
    assert_eq!(fade.progress(500.0), 0.0);
    assert_eq!(fade.progress(1500.0), 0.25);
    assert_eq!(fade.progress(4500.0), 1.0);
    assert!(fade.is_complete(4500.0));
}

#[test]
fn progress_is_clamped() {
    let mut fade = Fade::from_secs(1.0);
    fade.progress(1000.0);
    assert_eq!(fade.progress(500.0), 0.0);
    assert_eq!(fade.progress(99_999.0), 1.0);
}

#[test]
fn invalid_durations_complete_immediately() {
    for secs in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let mut fade = Fade::from_secs(secs);
        assert_eq!(fade.duration_ms(), 0.0);
        assert!(fade.is_complete(0.0));
        assert_eq!(fade.progress(0.0), 1.0);
    }
}

#[test]
fn fade_out_item_css_and_delay() {
    let item = FadeOutItem {
        element_id: "title",
        duration_secs: 2.5,
    };
    assert_eq!(item.transition_css(), "opacity 2.5s ease-in-out");
    assert_eq!(item.settle_delay_ms(), 2500);

    let instant = FadeOutItem {
        element_id: "footer",
        duration_secs: -1.0,
    };
    assert_eq!(instant.settle_delay_ms(), 0);
}
