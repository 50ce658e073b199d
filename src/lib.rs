#![cfg(target_arch = "wasm32")]
use crate::constants::PANORAMA_CONTAINER_ID;
use pano_core::constants::SITE_ID_PARAM;
use pano_core::{manifest_url, query_param, ControlMode, Manifest, NegotiationState, Negotiator, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod nav;
mod overlay;
mod render;
mod sensors;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Pages going into the back/forward cache keep their tilt listeners so the
/// view still follows the device when the page is restored.
fn wire_teardown(window: &web::Window, session: Rc<RefCell<ViewerSession>>) {
    let on_hide = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        let teardown = session.borrow_mut().on_page_hide(ev.persisted());
        if teardown {
            events::disconnect_tilt();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();
}

fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("display", "block");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Stop consuming device orientation. Safe to call more than once.
#[wasm_bindgen]
pub fn disconnect() {
    events::disconnect_tilt();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    nav::install(&window, &document);

    // Listing pages only get the nav glue.
    let Some(container) = dom::html_element_by_id(&document, PANORAMA_CONTAINER_ID) else {
        return Ok(());
    };

    let canvas = create_canvas(&document, &container)?;
    wire_canvas_resize(&canvas);

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let session = Rc::new(RefCell::new(ViewerSession::new(aspect)));
    wire_teardown(&window, session.clone());

    negotiate_controls(&window, &container, &session).await;

    let search = window.location().search().unwrap_or_default();
    let Some(site_id) = query_param(&search, SITE_ID_PARAM) else {
        log::error!("No site ID provided.");
        return Ok(());
    };
    load_site(&document, &container, canvas, &site_id, session).await
}

async fn negotiate_controls(
    window: &web::Window,
    container: &web::HtmlElement,
    session: &Rc<RefCell<ViewerSession>>,
) {
    let sensors = sensors::BrowserSensors::new(window.clone());
    let mut negotiator = Negotiator::new();
    let state = negotiator.negotiate(&sensors).await;
    match negotiator.control_mode() {
        ControlMode::Undetermined if state == NegotiationState::TiltNeedsGesture => {
            log::info!("[negotiate] waiting for a tap to ask for sensor access");
            events::wire_permission_click(
                window,
                container,
                Rc::new(RefCell::new(negotiator)),
                sensors,
                session.clone(),
            );
        }
        ControlMode::Undetermined => log::warn!("[negotiate] stuck in {:?}", state),
        mode => events::enable_controls(mode, window, container, session),
    }
}

async fn load_panorama(
    canvas: &web::HtmlCanvasElement,
    path: &str,
) -> anyhow::Result<render::GpuState<'static>> {
    let pano_bytes = fetch::fetch_bytes(path).await?;
    let mut gpu = frame::init_gpu(canvas).await?;
    gpu.set_panorama(&pano_bytes)?;
    Ok(gpu)
}

async fn load_site(
    document: &web::Document,
    container: &web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    site_id: &str,
    session: Rc<RefCell<ViewerSession>>,
) -> anyhow::Result<()> {
    let manifest = Manifest::from_json(&fetch::fetch_text(&manifest_url(site_id)).await?)?;
    log::info!("loaded manifest for {}: {:?}", site_id, manifest.title);
    overlay::show_manifest(document, &manifest);

    // The start screen has to answer a tap even if the panorama never shows.
    let audio = Rc::new(RefCell::new(None));
    events::wire_begin_click(
        document,
        container,
        &manifest,
        site_id,
        session.clone(),
        audio.clone(),
    );

    let gpu = match load_panorama(&canvas, &manifest.pano_path(site_id)).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::error!("panorama unavailable, continuing without it: {:?}", e);
            None
        }
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        gpu,
        canvas,
        audio,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
