//! Walking-sound gain control.
//!
//! A participant moving inside the pool snaps the sound to its nominal gain.
//! When the "moved" signals stop for the settle delay, or the participant
//! leaves the pool, the gain ramps linearly to silence and playback pauses.
//!
//! The controller does not touch audio itself: every call returns the
//! [`AudioCommand`]s its sink should apply, in order.

use crate::config::FadeConfig;
use crate::intersection::horizontal_distance;
use crate::profile::ShapeParameters;
use crate::timer::{OneShotTimer, RepeatingTimer};
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCommand {
    SetGain(f32),
    Play,
    Pause,
}

pub type AudioCommands = SmallVec<[AudioCommand; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    /// Silent and paused.
    Idle,
    /// Playing at nominal gain; the settle timer may be pending.
    Active,
    /// Ramping down toward silence.
    FadingOut,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FadeRamp {
    start_gain: f32,
    steps_done: u32,
    ticker: RepeatingTimer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeState {
    current_gain: f32,
    phase: FadePhase,
    playing: bool,
    settle: OneShotTimer,
    ramp: Option<FadeRamp>,
}

impl FadeState {
    fn silent() -> Self {
        Self {
            current_gain: 0.0,
            phase: FadePhase::Idle,
            playing: false,
            settle: OneShotTimer::default(),
            ramp: None,
        }
    }

    pub fn current_gain(&self) -> f32 {
        self.current_gain
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Active with the settle timer running.
    pub fn is_holding(&self) -> bool {
        self.phase == FadePhase::Active && self.settle.is_pending()
    }

    pub fn settle_due(&self) -> Option<Duration> {
        self.settle.due()
    }

    pub fn fade_step_due(&self) -> Option<Duration> {
        self.ramp.and_then(|r| r.ticker.due())
    }

    pub fn has_pending_timers(&self) -> bool {
        self.settle.is_pending() || self.ramp.is_some_and(|r| r.ticker.is_active())
    }
}

pub struct ProximityFadeController {
    nominal_gain: f32,
    config: FadeConfig,
    state: FadeState,
}

impl ProximityFadeController {
    pub fn new(nominal_gain: f32, config: FadeConfig) -> Self {
        Self {
            nominal_gain: nominal_gain.max(0.0),
            config,
            state: FadeState::silent(),
        }
    }

    pub fn nominal_gain(&self) -> f32 {
        self.nominal_gain
    }

    pub fn state(&self) -> &FadeState {
        &self.state
    }

    pub fn phase(&self) -> FadePhase {
        self.state.phase
    }

    pub fn gain(&self) -> f32 {
        self.state.current_gain
    }

    /// Movement signal with a pre-computed distance and threshold.
    pub fn on_moved(&mut self, now: Duration, distance: f32, threshold: f32) -> AudioCommands {
        let mut out = self.advance(now);
        self.state.settle.cancel();
        if distance < threshold {
            self.enter_active(&mut out);
            self.state.settle.start(now, self.config.settle_delay);
        } else if self.state.phase == FadePhase::Active {
            self.start_fade(now);
        }
        out
    }

    /// Movement signal from raw positions. Without a shape there is no
    /// threshold yet and the signal is ignored.
    pub fn on_moved_at(
        &mut self,
        now: Duration,
        axis_origin: Vec3,
        position: Vec3,
        shape: Option<&ShapeParameters>,
    ) -> AudioCommands {
        match shape {
            Some(shape) => self.on_moved(
                now,
                horizontal_distance(axis_origin, position),
                shape.proximity_threshold(),
            ),
            None => AudioCommands::new(),
        }
    }

    /// Fire every timer due at or before `now`, earliest first.
    pub fn advance(&mut self, now: Duration) -> AudioCommands {
        let mut out = AudioCommands::new();
        loop {
            let settle_due = self.state.settle.due().filter(|due| *due <= now);
            let step_due = self.state.fade_step_due().filter(|due| *due <= now);
            match (settle_due, step_due) {
                (Some(settle), Some(step)) if settle <= step => self.fire_settle(now),
                (Some(_), None) => self.fire_settle(now),
                (_, Some(_)) => self.fire_fade_step(now, &mut out),
                (None, None) => break,
            }
        }
        out
    }

    /// Cancel all timers and drop any running fade. Gain and playback stay as they are.
    pub fn teardown(&mut self) {
        self.state.settle.cancel();
        self.state.ramp = None;
        if self.state.phase == FadePhase::FadingOut {
            self.state.phase = FadePhase::Active;
        }
    }

    fn enter_active(&mut self, out: &mut AudioCommands) {
        if self.state.ramp.take().is_some() {
            log::debug!("walking sound: fade interrupted at gain {:.3}", self.state.current_gain);
        }
        if self.state.current_gain != self.nominal_gain {
            self.state.current_gain = self.nominal_gain;
            out.push(AudioCommand::SetGain(self.nominal_gain));
        }
        if !self.state.playing {
            self.state.playing = true;
            out.push(AudioCommand::Play);
        }
        self.state.phase = FadePhase::Active;
    }

    fn fire_settle(&mut self, now: Duration) {
        if let Some(due) = self.state.settle.fire_if_due(now) {
            if self.state.phase == FadePhase::Active {
                self.start_fade(due);
            }
        }
    }

    fn start_fade(&mut self, at: Duration) {
        if self.state.ramp.is_some() || !self.state.playing {
            return;
        }
        let mut ticker = RepeatingTimer::default();
        ticker.start(at, self.config.step_period());
        self.state.ramp = Some(FadeRamp {
            start_gain: self.state.current_gain,
            steps_done: 0,
            ticker,
        });
        self.state.phase = FadePhase::FadingOut;
        log::debug!(
            "walking sound: fading out from {:.3} over {} steps",
            self.state.current_gain,
            self.config.steps()
        );
    }

    fn fire_fade_step(&mut self, now: Duration, out: &mut AudioCommands) {
        let steps = self.config.steps();
        let Some(ramp) = self.state.ramp.as_mut() else {
            return;
        };
        if ramp.ticker.fire_if_due(now).is_none() {
            return;
        }
        ramp.steps_done += 1;
        let remaining = steps.saturating_sub(ramp.steps_done);
        let gain = ramp.start_gain * remaining as f32 / steps as f32;
        if remaining == 0 || gain <= self.config.silence_epsilon * ramp.start_gain {
            self.state.ramp = None;
            self.state.current_gain = 0.0;
            self.state.playing = false;
            self.state.phase = FadePhase::Idle;
            out.push(AudioCommand::SetGain(0.0));
            out.push(AudioCommand::Pause);
            log::debug!("walking sound: faded out");
        } else {
            self.state.current_gain = gain;
            out.push(AudioCommand::SetGain(gain));
        }
    }
}

/// Identifies a tracked participant (a rig, a remote avatar, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    pub const LOCAL: ParticipantId = ParticipantId(0);
}

/// One fade controller per tracked participant, each driving its own sink.
pub struct ProximityField {
    nominal_gain: f32,
    config: FadeConfig,
    controllers: FnvHashMap<ParticipantId, ProximityFadeController>,
}

impl ProximityField {
    pub fn new(nominal_gain: f32, config: FadeConfig) -> Self {
        Self {
            nominal_gain,
            config,
            controllers: FnvHashMap::default(),
        }
    }

    /// Start tracking `id`. Tracking an already tracked participant is a no-op.
    pub fn track(&mut self, id: ParticipantId) {
        let (gain, config) = (self.nominal_gain, self.config);
        self.controllers
            .entry(id)
            .or_insert_with(|| ProximityFadeController::new(gain, config));
    }

    /// Stop tracking `id`, cancelling its timers. Returns whether it was tracked.
    pub fn untrack(&mut self, id: ParticipantId) -> bool {
        match self.controllers.remove(&id) {
            Some(mut controller) => {
                controller.teardown();
                true
            }
            None => false,
        }
    }

    pub fn controller(&self, id: ParticipantId) -> Option<&ProximityFadeController> {
        self.controllers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Route a movement signal. Untracked participants are ignored.
    pub fn on_moved(
        &mut self,
        id: ParticipantId,
        now: Duration,
        axis_origin: Vec3,
        position: Vec3,
        shape: Option<&ShapeParameters>,
    ) -> AudioCommands {
        match self.controllers.get_mut(&id) {
            Some(controller) => controller.on_moved_at(now, axis_origin, position, shape),
            None => AudioCommands::new(),
        }
    }

    pub fn advance(&mut self, now: Duration) -> Vec<(ParticipantId, AudioCommand)> {
        let mut out = Vec::new();
        for (id, controller) in self.controllers.iter_mut() {
            out.extend(controller.advance(now).into_iter().map(|cmd| (*id, cmd)));
        }
        out
    }

    pub fn teardown(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.teardown();
        }
    }
}
