use crate::audio::{AudioFade, StreamingAudio};
use crate::dom;
use crate::events::{pointer, tilt::TiltListeners};
use crate::overlay;
use crate::sensors::{self, BrowserSensors};
use pano_core::{request_permissions, ControlMode, Manifest, Negotiator, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static TILT: RefCell<Option<TiltListeners>> = const { RefCell::new(None) };
}

/// Lock in the negotiated control mode and subscribe its input listeners.
pub fn enable_controls(
    mode: ControlMode,
    window: &web::Window,
    container: &web::HtmlElement,
    session: &Rc<RefCell<ViewerSession>>,
) {
    let screen_deg = sensors::screen_orientation_deg(window);
    if !session.borrow_mut().activate(mode, screen_deg) {
        return;
    }
    match mode {
        ControlMode::TiltEnabled => {
            let listeners = TiltListeners::connect(window, session.clone());
            TILT.with(|t| *t.borrow_mut() = Some(listeners));
        }
        ControlMode::TouchEnabled => pointer::wire_drag_handlers(container, session.clone()),
        ControlMode::Undetermined => {}
    }
}

/// Tear down the tilt listeners, if any were installed.
pub fn disconnect_tilt() {
    TILT.with(|t| {
        if let Some(listeners) = t.borrow_mut().as_mut() {
            listeners.disconnect();
        }
    });
}

/// Gated platforms only prompt from a trusted input event, so the prompts are
/// raised synchronously in the click and only their answers are awaited.
pub fn wire_permission_click(
    window: &web::Window,
    container: &web::HtmlElement,
    negotiator: Rc<RefCell<Negotiator>>,
    sensors: BrowserSensors,
    session: Rc<RefCell<ViewerSession>>,
) {
    let window = window.clone();
    let target = container.clone();
    let container = container.clone();
    dom::add_once_click_listener(&target, move || {
        if !negotiator.borrow_mut().begin_permission_request() {
            return;
        }
        let pending = request_permissions(&sensors);
        let negotiator = negotiator.clone();
        let session = session.clone();
        let window = window.clone();
        let container = container.clone();
        spawn_local(async move {
            let result = pending.await;
            let mode = negotiator.borrow_mut().finish_permission_request(result);
            log::info!("[negotiate] asked for permissions: {:?}", mode);
            enable_controls(mode, &window, &container, &session);
        });
    });
}

/// First click on the panorama: start the ambience, fade the panorama in and
/// the start-screen text out.
pub fn wire_begin_click(
    document: &web::Document,
    container: &web::HtmlElement,
    manifest: &Manifest,
    site_id: &str,
    session: Rc<RefCell<ViewerSession>>,
    audio: Rc<RefCell<Option<AudioFade>>>,
) {
    let document = document.clone();
    let sounds = manifest.sound_paths(site_id);
    let fade_secs = manifest.fade_in_secs;
    let fade_group = manifest.fade_out_group();
    dom::add_once_click_listener(container, move || {
        log::info!("[audio] clicked, starting fade-in over {}s", fade_secs);
        match StreamingAudio::start(&sounds) {
            Ok(stream) => *audio.borrow_mut() = Some(AudioFade::new(stream, fade_secs)),
            Err(e) => log::error!("[audio] {:?}", e),
        }
        session.borrow_mut().start_texture_fade(fade_secs);
        overlay::fade_out(&document, fade_group.clone(), 0);
    });
}
