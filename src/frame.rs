use crate::audio::AudioFade;
use crate::render;
use pano_core::ViewerSession;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<ViewerSession>>,
    /// `None` when the panorama couldn't be shown; audio and fades still run.
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub audio: Rc<RefCell<Option<AudioFade>>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now_ms = instant::now();

        let (width, height) = (self.canvas.width(), self.canvas.height());
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(width, height);
        }

        if let Some(fade) = self.audio.borrow_mut().as_mut() {
            fade.step(now_ms);
        }

        let mut session = self.session.borrow_mut();
        session.resize(width, height);
        match session.tick(now_ms, &mut self.gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.reconfigure();
                }
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas).await
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
