//! Engine configuration. Every default mirrors the constants in `constants.rs`.

use crate::constants::*;
use crate::profile::{ProfileCurve, ShapeParameters};
use std::time::Duration;

/// Timing of the walking-sound debounce and fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
    pub settle_delay: Duration,
    pub fade_duration: Duration,
    pub fade_step: Duration,
    /// Gain at or below `silence_epsilon * start_gain` counts as silent.
    pub silence_epsilon: f32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            settle_delay: SETTLE_DELAY,
            fade_duration: FADE_DURATION,
            fade_step: FADE_STEP,
            silence_epsilon: FADE_SILENCE_EPSILON,
        }
    }
}

impl FadeConfig {
    /// Number of ramp steps in one full fade (at least one).
    pub fn steps(&self) -> u32 {
        let step = self.step_period().as_micros();
        (self.fade_duration.as_micros() / step).max(1) as u32
    }

    /// Ramp tick period; never zero.
    pub fn step_period(&self) -> Duration {
        self.fade_step.max(Duration::from_millis(1))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VortexConfig {
    pub shape: ShapeParameters,
    pub curve: ProfileCurve,
    pub evaluation_interval: Duration,
    pub fade: FadeConfig,
    /// Gain of the walking sound when fully audible; taken from the sink at setup.
    pub nominal_gain: f32,
}

impl Default for VortexConfig {
    fn default() -> Self {
        Self {
            shape: ShapeParameters::default(),
            curve: ProfileCurve::default(),
            evaluation_interval: EVALUATION_INTERVAL,
            fade: FadeConfig::default(),
            nominal_gain: DEFAULT_NOMINAL_GAIN,
        }
    }
}
