//! Cylindrical intersection of the axis -> observer ray with the core and shell surfaces.

use crate::constants::*;
use crate::profile::ProfileTable;
use glam::{Vec2, Vec3};
use std::time::Duration;

/// World positions captured for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverSample {
    pub axis_origin: Vec3,
    pub observer: Vec3,
}

/// Where the horizontal ray toward the observer crosses both surfaces, at the observer's world height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionResult {
    pub shell_point: Vec3,
    pub core_point: Vec3,
    pub distance_from_axis: f32,
    pub core_radius: f32,
    pub shell_radius: f32,
}

/// Observer position relative to the vortex axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxialOffset {
    pub local_height: f32,
    pub distance_from_axis: f32,
    /// Unit XZ direction from the axis to the observer; zero when on-axis.
    pub direction: Vec2,
}

#[inline]
fn planar_delta(axis_origin: Vec3, observer: Vec3) -> Vec2 {
    Vec2::new(observer.x - axis_origin.x, observer.z - axis_origin.z)
}

/// Distance from the vertical axis through `axis_origin`, ignoring height.
#[inline]
pub fn horizontal_distance(axis_origin: Vec3, observer: Vec3) -> f32 {
    let d = planar_delta(axis_origin, observer);
    (d.x * d.x + d.y * d.y).sqrt()
}

pub fn axial_offset(axis_origin: Vec3, observer: Vec3) -> AxialOffset {
    let delta = planar_delta(axis_origin, observer);
    let distance_from_axis = horizontal_distance(axis_origin, observer);
    let direction = if distance_from_axis > ON_AXIS_EPSILON {
        delta / distance_from_axis
    } else {
        Vec2::ZERO
    };
    AxialOffset {
        local_height: observer.y - axis_origin.y,
        distance_from_axis,
        direction,
    }
}

pub fn evaluate(table: &ProfileTable, sample: ObserverSample) -> IntersectionResult {
    let ObserverSample {
        axis_origin,
        observer,
    } = sample;
    let offset = axial_offset(axis_origin, observer);
    let core_radius = table.radius_at(offset.local_height);
    let shell_radius = table.shell_radius_at(offset.local_height);
    let on_ray = |radius: f32| {
        Vec3::new(
            axis_origin.x + offset.direction.x * radius,
            observer.y,
            axis_origin.z + offset.direction.y * radius,
        )
    };
    IntersectionResult {
        shell_point: on_ray(shell_radius),
        core_point: on_ray(core_radius),
        distance_from_axis: offset.distance_from_axis,
        core_radius,
        shell_radius,
    }
}

/// Rate limiter around [`evaluate`] for a higher-frequency frame loop.
#[derive(Clone, Debug)]
pub struct IntersectionCalculator {
    interval: Duration,
    elapsed: Duration,
}

impl Default for IntersectionCalculator {
    fn default() -> Self {
        Self::new(EVALUATION_INTERVAL)
    }
}

impl IntersectionCalculator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Accumulate `dt`; once a full interval has passed, reset and evaluate.
    ///
    /// A tick whose table or sample is missing is consumed without a result;
    /// the next attempt is one interval later.
    pub fn tick(
        &mut self,
        dt: Duration,
        table: Option<&ProfileTable>,
        sample: Option<ObserverSample>,
    ) -> Option<IntersectionResult> {
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed = Duration::ZERO;
        match (table, sample) {
            (Some(table), Some(sample)) => Some(evaluate(table, sample)),
            _ => {
                log::trace!("intersection tick skipped: shape or observer not ready");
                None
            }
        }
    }
}
