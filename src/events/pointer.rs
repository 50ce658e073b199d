use glam::Vec2;
use pano_core::ViewerSession;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn mouse_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn touch_positions(ev: &web::TouchEvent) -> Vec<Vec2> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect()
}

fn listen_mouse(
    target: &web::HtmlElement,
    event: &str,
    handler: impl FnMut(web::MouseEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::MouseEvent)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn listen_touch(
    target: &web::HtmlElement,
    event: &str,
    handler: impl FnMut(web::TouchEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::TouchEvent)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Click/touch-and-drag look-around on the panorama container.
pub fn wire_drag_handlers(container: &web::HtmlElement, session: Rc<RefCell<ViewerSession>>) {
    let s = session.clone();
    listen_mouse(container, "mousedown", move |ev: web::MouseEvent| {
        s.borrow_mut().mouse_down(mouse_pos(&ev));
    });
    let s = session.clone();
    listen_mouse(container, "mousemove", move |ev: web::MouseEvent| {
        s.borrow_mut().mouse_move(mouse_pos(&ev));
    });
    let s = session.clone();
    listen_mouse(container, "mouseup", move |_ev: web::MouseEvent| {
        s.borrow_mut().mouse_up();
    });

    let s = session.clone();
    listen_touch(container, "touchstart", move |ev: web::TouchEvent| {
        s.borrow_mut().touch_start(&touch_positions(&ev));
    });
    let s = session.clone();
    listen_touch(container, "touchmove", move |ev: web::TouchEvent| {
        s.borrow_mut().touch_move(&touch_positions(&ev));
    });
    let s = session;
    listen_touch(container, "touchend", move |_ev: web::TouchEvent| {
        s.borrow_mut().touch_end();
    });
}
