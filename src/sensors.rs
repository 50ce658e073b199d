use js_sys::{Function, Object, Reflect};
use pano_core::{NegotiationError, SensorKind, SensorPlatform};
use std::future::Future;
use std::pin::Pin;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Sensor capabilities of the running browser.
#[derive(Clone)]
pub struct BrowserSensors {
    window: web::Window,
}

impl BrowserSensors {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }

    fn event_interface(&self, kind: SensorKind) -> Option<JsValue> {
        Reflect::get(&self.window, &kind.event_interface().into())
            .ok()
            .filter(|v| !v.is_undefined())
    }

    fn request_fn(&self, kind: SensorKind) -> Option<(JsValue, Function)> {
        let iface = self.event_interface(kind)?;
        let func = Reflect::get(&iface, &"requestPermission".into())
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((iface, func))
    }
}

/// Legacy `window.orientation` in degrees, 0 where unsupported.
pub fn screen_orientation_deg(window: &web::Window) -> f64 {
    Reflect::get(window, &"orientation".into())
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

impl SensorPlatform for BrowserSensors {
    fn user_agent(&self) -> String {
        let navigator = self.window.navigator();
        match navigator.user_agent() {
            Ok(ua) if !ua.is_empty() => ua,
            _ => navigator.vendor(),
        }
    }

    fn has_sensor_events(&self) -> bool {
        let has = |name: &str| Reflect::has(&self.window, &name.into()).unwrap_or(false);
        has(SensorKind::Orientation.event_interface()) && has(SensorKind::Motion.event_interface())
    }

    fn has_gated_permission(&self) -> bool {
        self.request_fn(SensorKind::Orientation).is_some()
            && self.request_fn(SensorKind::Motion).is_some()
    }

    async fn query_permission(&self, kind: SensorKind) -> Result<bool, NegotiationError> {
        let permissions = self
            .window
            .navigator()
            .permissions()
            .map_err(|e| NegotiationError::Query(js_error(e)))?;
        let descriptor = Object::new();
        Reflect::set(&descriptor, &"name".into(), &kind.permission_name().into())
            .map_err(|e| NegotiationError::Query(js_error(e)))?;
        let promise = permissions
            .query(&descriptor)
            .map_err(|e| NegotiationError::Query(js_error(e)))?;
        let status = JsFuture::from(promise)
            .await
            .map_err(|e| NegotiationError::Query(js_error(e)))?;
        let state = Reflect::get(&status, &"state".into())
            .ok()
            .and_then(|v| v.as_string());
        log::info!("[negotiate] {} permission: {:?}", kind.permission_name(), state);
        Ok(state.as_deref() == Some("granted"))
    }

    type Request = Pin<Box<dyn Future<Output = Result<bool, NegotiationError>>>>;

    fn request_permission(&self, kind: SensorKind) -> Self::Request {
        // requestPermission() is called now, while the click is on the stack
        let promise = self
            .request_fn(kind)
            .ok_or(NegotiationError::Unsupported)
            .and_then(|(iface, func)| {
                func.call0(&iface)
                    .map_err(|e| NegotiationError::Request(js_error(e)))?
                    .dyn_into::<js_sys::Promise>()
                    .map_err(|e| NegotiationError::Request(js_error(e)))
            });
        Box::pin(async move {
            let answer = JsFuture::from(promise?)
                .await
                .map_err(|e| NegotiationError::Request(js_error(e)))?;
            Ok(answer.as_string().as_deref() == Some("granted"))
        })
    }
}
