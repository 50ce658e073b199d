// DOM hooks and presentation constants used by the web frontend.
// Element ids match the page templates; tuning values live in
// `pano_core::constants`.

// Viewer page
pub const PANORAMA_CONTAINER_ID: &str = "panorama";
pub const TITLE_ID: &str = "title";
pub const DESCRIPTION_ID: &str = "description";
pub const FOOTER_ID: &str = "footer";

// Site-wide chrome
pub const NAV_HEADER_SELECTOR: &str = ".nav-header";
pub const JS_ENABLED_CLASS: &str = "js-enabled";

// Renderer
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0]; // seen through the panorama while it fades in
