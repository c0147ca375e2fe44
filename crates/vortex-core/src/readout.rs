//! Consumers of intersection events: the marker placed between both
//! surfaces and the HUD distance readout.

use crate::constants::METERS_TO_CM;
use crate::intersection::IntersectionResult;
use glam::Vec3;
use std::fmt;

/// Midpoint between the shell and core intersection points.
#[inline]
pub fn marker_position(result: &IntersectionResult) -> Vec3 {
    (result.shell_point + result.core_point) * 0.5
}

/// Distances shown on the HUD, in centimetres. Negative means inside the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityReadout {
    pub center_cm: f32,
    pub shell_cm: f32,
    pub core_cm: f32,
}

impl From<&IntersectionResult> for ProximityReadout {
    fn from(r: &IntersectionResult) -> Self {
        Self {
            center_cm: r.distance_from_axis * METERS_TO_CM,
            shell_cm: (r.distance_from_axis - r.shell_radius) * METERS_TO_CM,
            core_cm: (r.distance_from_axis - r.core_radius) * METERS_TO_CM,
        }
    }
}

impl fmt::Display for ProximityReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dist Center:   {:.1} cm", self.center_cm)?;
        writeln!(f, "Dist Shell:    {:.1} cm", self.shell_cm)?;
        write!(f, "Dist Core:     {:.1} cm", self.core_cm)
    }
}
