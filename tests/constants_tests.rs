// Host-side tests for constants and their relationships.
// The front-end crate is wasm-only, so its constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use std::time::Duration;
use vortex_core::constants as engine;

#[test]
#[allow(clippy::assertions_on_constants)]
fn fade_timing_divides_into_whole_steps() {
    assert!(engine::FADE_STEP > Duration::ZERO);
    assert!(engine::FADE_DURATION > engine::FADE_STEP);
    assert_eq!(
        engine::FADE_DURATION.as_millis() % engine::FADE_STEP.as_millis(),
        0
    );
    assert_eq!(engine::FADE_DURATION.as_millis() / engine::FADE_STEP.as_millis(), 10);
    // settle must outlast a frame or two so steady walking never fades
    assert!(engine::SETTLE_DELAY > Duration::from_millis(50));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shell_encloses_core() {
    assert!(engine::SHELL_RADIAL_SCALE > 1.0);
    assert!(engine::SHELL_HEIGHT_SCALE > 1.0);
    assert!(engine::FADE_SILENCE_EPSILON > 0.0 && engine::FADE_SILENCE_EPSILON < 0.1);
    assert!(engine::ON_AXIS_EPSILON > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_layout_is_consistent() {
    assert!(OBSERVER_MIN_Y < OBSERVER_MAX_Y);
    assert!(OBSERVER_START.y >= OBSERVER_MIN_Y && OBSERVER_START.y <= OBSERVER_MAX_Y);
    assert!(MOVE_STEP > 0.0 && RISE_STEP > 0.0);
    assert!(TUNE_STEP_FRACTION > 0.0 && TUNE_STEP_FRACTION < 1.0);
    assert!(WALKING_SOUND_VOLUME > 0.0 && WALKING_SOUND_VOLUME <= 1.0);
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    // the default vortex fits in the side view
    assert!(VIEW_HEIGHT_M >= 12.0);
    assert!(VIEW_MARGIN_PX > DOT_RADIUS_PX);
}

#[test]
fn observer_starts_inside_default_pool() {
    let threshold = vortex_core::ShapeParameters::default().proximity_threshold();
    let d = vortex_core::horizontal_distance(AXIS_ORIGIN, OBSERVER_START);
    assert!(d < threshold, "observer should start inside the pool ({d} vs {threshold})");
}
