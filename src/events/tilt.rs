use crate::sensors;
use pano_core::{OrientationSample, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window listeners feeding the tilt control. Dropping them without
/// `disconnect` leaves the browser holding dead callbacks, so they are kept
/// here until teardown.
pub struct TiltListeners {
    window: web::Window,
    session: Rc<RefCell<ViewerSession>>,
    on_screen: Option<Closure<dyn FnMut()>>,
    on_device: Option<Closure<dyn FnMut(web::DeviceOrientationEvent)>>,
}

impl TiltListeners {
    pub fn connect(window: &web::Window, session: Rc<RefCell<ViewerSession>>) -> Self {
        let screen_window = window.clone();
        let screen_session = session.clone();
        let on_screen = Closure::wrap(Box::new(move || {
            let deg = sensors::screen_orientation_deg(&screen_window);
            screen_session.borrow_mut().on_screen_orientation(deg);
        }) as Box<dyn FnMut()>);

        let device_session = session.clone();
        let on_device = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
            device_session
                .borrow_mut()
                .on_device_orientation(OrientationSample {
                    alpha: ev.alpha(),
                    beta: ev.beta(),
                    gamma: ev.gamma(),
                });
        }) as Box<dyn FnMut(_)>);

        _ = window.add_event_listener_with_callback(
            "orientationchange",
            on_screen.as_ref().unchecked_ref(),
        );
        _ = window
            .add_event_listener_with_callback("deviceorientation", on_device.as_ref().unchecked_ref());

        Self {
            window: window.clone(),
            session,
            on_screen: Some(on_screen),
            on_device: Some(on_device),
        }
    }

    /// Remove both listeners and stop the control. Repeat calls do nothing.
    pub fn disconnect(&mut self) {
        if let Some(cb) = self.on_screen.take() {
            _ = self
                .window
                .remove_event_listener_with_callback("orientationchange", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.on_device.take() {
            _ = self
                .window
                .remove_event_listener_with_callback("deviceorientation", cb.as_ref().unchecked_ref());
        }
        self.session.borrow_mut().disconnect();
    }
}
