use crate::frame::SceneState;
use crate::input::{movement_for_key, nudged_value, step_observer, tuning_field_for_digit};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use vortex_core::{AudioCommand, ParticipantId};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, scene: &Rc<RefCell<SceneState>>) {
    if scene.borrow().session.is_torn_down() {
        return;
    }
    let key = ev.key();
    if let Some(delta) = movement_for_key(&key) {
        let mut s = scene.borrow_mut();
        s.observer = step_observer(s.observer, delta);
        let observer = s.observer;
        let commands = s.session.participant_moved(ParticipantId::LOCAL, observer);
        s.sound.apply_all(commands);
        ev.prevent_default();
        return;
    }
    if let Some(field) = tuning_field_for_digit(&key) {
        let mut s = scene.borrow_mut();
        let current = s.session.shape().get(field);
        let next = nudged_value(field, current, ev.shift_key());
        // Rejected values keep the previous shape; the warning is logged by the core.
        if s.session.tune(field, next).is_ok() {
            log::info!("[keys] {} = {:.3}", field.name(), s.session.shape().get(field));
        }
        if let Some(document) = crate::dom::window_document() {
            overlay::update_hint(&document, s.session.shape());
        }
        return;
    }
    match key.as_str() {
        "h" | "H" => {
            if let Some(document) = crate::dom::window_document() {
                overlay::toggle(&document, "hud");
            }
            ev.prevent_default();
        }
        "Escape" => {
            let mut s = scene.borrow_mut();
            s.session.teardown();
            s.sound.apply_all([AudioCommand::SetGain(0.0), AudioCommand::Pause]);
            log::info!("[keys] session torn down; input and frame loop stopped");
        }
        _ => {}
    }
}

pub fn wire_global_keydown(scene: Rc<RefCell<SceneState>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &scene);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
