#![cfg(target_arch = "wasm32")]
use constants::*;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use vortex_core::{IntersectionResult, ParticipantId, ProximityReadout, VortexConfig, VortexSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

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

// Browsers keep the AudioContext suspended until a user gesture.
fn wire_start_button(audio_ctx: &web::AudioContext, document: &web::Document) {
    let audio_ok = audio_ctx.clone();
    let doc = document.clone();
    dom::add_click_listener(document, "overlay-ok", move || {
        _ = audio_ok.resume();
        overlay::hide(&doc, "start-overlay");
    });
}

fn build_session(nominal_gain: f32) -> anyhow::Result<VortexSession> {
    let config = VortexConfig {
        nominal_gain,
        ..VortexConfig::default()
    };
    let mut session = VortexSession::new(config)?;
    session.place(AXIS_ORIGIN);
    session.track(ParticipantId::LOCAL);
    let shape = session.shape();
    log::info!(
        "[session] vortex placed at ({:.2},{:.2},{:.2}) height={:.2} pool radius={:.2}",
        AXIS_ORIGIN.x,
        AXIS_ORIGIN.y,
        AXIS_ORIGIN.z,
        shape.total_height,
        shape.proximity_threshold()
    );
    Ok(session)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vortex-web starting");

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

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wire_start_button(&audio_ctx, &document);
    let sound = audio::WalkingSound::new(&audio_ctx)?;

    let mut session = build_session(sound.configured_volume())?;

    // HUD and marker consume intersection events; the latest one is kept for drawing.
    let latest: Rc<RefCell<Option<IntersectionResult>>> = Rc::new(RefCell::new(None));
    {
        let latest = latest.clone();
        let doc = document.clone();
        session.subscribe(move |result: &IntersectionResult| {
            overlay::update_hud(&doc, &ProximityReadout::from(result));
            *latest.borrow_mut() = Some(*result);
        });
    }

    let scene = Rc::new(RefCell::new(frame::SceneState {
        session,
        observer: OBSERVER_START,
        sound,
    }));
    events::wire_global_keydown(scene.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        view: render::SideView::new(ctx2d, &canvas),
        canvas,
        latest,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
