//! Scene-facing host that wires the engine pieces together.
//!
//! Front-ends feed it frame deltas, the observer position and participant
//! movement; it hands back intersection results (also published to
//! subscribers) and audio commands for each participant's sink.

use crate::config::{FadeConfig, VortexConfig};
use crate::error::ShapeError;
use crate::events::{EventBus, SubscriptionId};
use crate::intersection::{IntersectionCalculator, IntersectionResult, ObserverSample};
use crate::profile::{ShapeField, ShapeParameters};
use crate::proximity::{AudioCommand, AudioCommands, ParticipantId, ProximityField};
use crate::vortex::Vortex;
use glam::Vec3;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub intersection: Option<IntersectionResult>,
    pub audio: Vec<(ParticipantId, AudioCommand)>,
}

pub struct VortexSession {
    vortex: Vortex,
    axis_origin: Option<Vec3>,
    calculator: IntersectionCalculator,
    intersections: EventBus<IntersectionResult>,
    proximity: ProximityField,
    fade: FadeConfig,
    clock: Duration,
    torn_down: bool,
}

impl VortexSession {
    pub fn new(config: VortexConfig) -> Result<Self, ShapeError> {
        let vortex = Vortex::new(config.shape, config.curve)?;
        Ok(Self {
            vortex,
            axis_origin: None,
            calculator: IntersectionCalculator::new(config.evaluation_interval),
            intersections: EventBus::new(),
            proximity: ProximityField::new(config.nominal_gain, config.fade),
            fade: config.fade,
            clock: Duration::ZERO,
            torn_down: false,
        })
    }

    /// Place the vortex axis in the world. Until then evaluations are skipped.
    pub fn place(&mut self, axis_origin: Vec3) {
        self.axis_origin = Some(axis_origin);
    }

    pub fn axis_origin(&self) -> Option<Vec3> {
        self.axis_origin
    }

    pub fn vortex(&self) -> &Vortex {
        &self.vortex
    }

    pub fn shape(&self) -> &ShapeParameters {
        self.vortex.shape()
    }

    pub fn fade_config(&self) -> &FadeConfig {
        &self.fade
    }

    /// Logical time since the session started.
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn set_shape(&mut self, shape: ShapeParameters) -> Result<(), ShapeError> {
        self.vortex.set_shape(shape)
    }

    pub fn tune(&mut self, field: ShapeField, value: f32) -> Result<(), ShapeError> {
        self.vortex.tune(field, value)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&IntersectionResult) + 'static,
    ) -> SubscriptionId {
        self.intersections.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.intersections.unsubscribe(id)
    }

    pub fn track(&mut self, id: ParticipantId) {
        self.proximity.track(id);
    }

    pub fn untrack(&mut self, id: ParticipantId) -> bool {
        self.proximity.untrack(id)
    }

    pub fn proximity(&self) -> &ProximityField {
        &self.proximity
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Advance the clock by `dt`, run the throttled intersection and fire due fade timers.
    /// A torn-down session reports nothing.
    pub fn frame(&mut self, dt: Duration, observer: Option<Vec3>) -> FrameReport {
        if self.torn_down {
            return FrameReport::default();
        }
        self.clock += dt;
        let sample = match (self.axis_origin, observer) {
            (Some(axis_origin), Some(observer)) => Some(ObserverSample {
                axis_origin,
                observer,
            }),
            _ => None,
        };
        let intersection = self
            .calculator
            .tick(dt, Some(self.vortex.table()), sample);
        if let Some(result) = &intersection {
            self.intersections.publish(result);
        }
        FrameReport {
            intersection,
            audio: self.proximity.advance(self.clock),
        }
    }

    /// A tracked participant's transform changed.
    pub fn participant_moved(&mut self, id: ParticipantId, position: Vec3) -> AudioCommands {
        let Some(axis_origin) = self.axis_origin.filter(|_| !self.torn_down) else {
            return AudioCommands::new();
        };
        self.proximity.on_moved(
            id,
            self.clock,
            axis_origin,
            position,
            Some(self.vortex.shape()),
        )
    }

    /// Cancel every pending timer and drop all subscriptions. The session is
    /// inert afterwards: frames and movement produce nothing.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.proximity.teardown();
        self.intersections.clear();
        log::info!("[session] torn down at {:?}", self.clock);
    }
}
