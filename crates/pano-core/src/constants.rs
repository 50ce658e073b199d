//! Shared look-around and presentation tuning constants.
//!
//! These keep magic numbers out of the control and render code and are
//! checked for sanity by the host-side tests.

use std::f32::consts::FRAC_PI_2;

// Drag look-around
pub const DRAG_RADIANS_PER_PX: f32 = 0.005; // yaw/pitch change per pixel of drag
pub const PITCH_LIMIT: f32 = FRAC_PI_2; // pitch is clamped to [-limit, limit]

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Capability detection: lowercase user-agent fragments that mark a mobile device
pub const MOBILE_UA_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

// Site layout
pub const SITE_ID_PARAM: &str = "id";
pub const LOCATION_ROOT: &str = "./loc";
pub const MANIFEST_FILE: &str = "manifest.json";

// Start-screen text fades
pub const FOOTER_PROMPT: &str = "touch to enter";
pub const FOOTER_FADE_SECS: f64 = 1.0;

// Legacy `#id` links
pub const COMPILED_INDEX_URL: &str = "/static/compiled.json";
pub const LEGACY_YEAR_FALLBACK: &str = "0000";
