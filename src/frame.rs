use crate::audio::WalkingSound;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use vortex_core::{marker_position, IntersectionResult, ParticipantId, VortexSession};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the frame loop and the input handlers share.
pub struct SceneState {
    pub session: VortexSession,
    pub observer: glam::Vec3,
    pub sound: WalkingSound,
}

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub canvas: web::HtmlCanvasElement,
    pub view: render::SideView,
    pub latest: Rc<RefCell<Option<IntersectionResult>>>,
    pub last_instant: Instant,
}

impl FrameContext {
    /// Run one frame. Returns false once the session has been torn down.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        if scene.session.is_torn_down() {
            return false;
        }
        let observer = scene.observer;
        let report = scene.session.frame(dt, Some(observer));
        let commands = report
            .audio
            .into_iter()
            .filter(|(id, _)| *id == ParticipantId::LOCAL)
            .map(|(_, cmd)| cmd);
        scene.sound.apply_all(commands);

        let axis = scene.session.axis_origin().unwrap_or(crate::constants::AXIS_ORIGIN);
        let observer_offset = render::side_offset(axis, observer);
        let marker_offset = self
            .latest
            .borrow()
            .as_ref()
            .map(|r| render::side_offset(axis, marker_position(r)));
        self.view.resize_if_needed(&self.canvas);
        self.view
            .draw(scene.session.vortex().table(), observer_offset, marker_offset);
        true
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow_mut().frame() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
