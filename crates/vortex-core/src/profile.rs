//! Radial profile of the vortex: shape parameters, the control polygon they
//! produce, and the dense height -> radius table sampled by the intersection
//! and proximity paths.
//!
//! The table is rebuilt by value whenever the shape changes. Readers only ever
//! see a complete snapshot: [`ProfileTable::rebuild`] swaps in a fully built
//! table or leaves the old one untouched.

use crate::constants::*;
use crate::error::ShapeError;
use std::ops::RangeInclusive;

/// Scalar inputs of the vortex silhouette plus the floor pool size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParameters {
    pub base_width: f32,
    pub stem_pinch: f32,
    pub bulb_width: f32,
    pub bulb_height: f32,
    pub total_height: f32,
    pub pool_size: f32,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            base_width: 4.0,
            stem_pinch: 0.3808,
            bulb_width: 1.0,
            bulb_height: 10.0,
            total_height: 12.0,
            pool_size: 3.0,
        }
    }
}

/// Fields exposed to the live-tuning surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeField {
    BaseWidth,
    StemPinch,
    BulbWidth,
    BulbHeight,
    TotalHeight,
    PoolSize,
}

impl ShapeField {
    pub const ALL: [ShapeField; 6] = [
        ShapeField::BaseWidth,
        ShapeField::StemPinch,
        ShapeField::BulbWidth,
        ShapeField::BulbHeight,
        ShapeField::TotalHeight,
        ShapeField::PoolSize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeField::BaseWidth => "base_width",
            ShapeField::StemPinch => "stem_pinch",
            ShapeField::BulbWidth => "bulb_width",
            ShapeField::BulbHeight => "bulb_height",
            ShapeField::TotalHeight => "total_height",
            ShapeField::PoolSize => "pool_size",
        }
    }

    /// Range offered by the tuning panel. Values are clamped into it before validation.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ShapeField::BaseWidth => 0.5..=4.0,
            ShapeField::StemPinch => 0.1..=1.5,
            ShapeField::BulbWidth => 1.0..=4.0,
            ShapeField::BulbHeight => 3.0..=10.0,
            ShapeField::TotalHeight => 4.0..=12.0,
            ShapeField::PoolSize => 0.0..=3.0,
        }
    }
}

impl ShapeParameters {
    pub fn get(&self, field: ShapeField) -> f32 {
        match field {
            ShapeField::BaseWidth => self.base_width,
            ShapeField::StemPinch => self.stem_pinch,
            ShapeField::BulbWidth => self.bulb_width,
            ShapeField::BulbHeight => self.bulb_height,
            ShapeField::TotalHeight => self.total_height,
            ShapeField::PoolSize => self.pool_size,
        }
    }

    fn slot(&mut self, field: ShapeField) -> &mut f32 {
        match field {
            ShapeField::BaseWidth => &mut self.base_width,
            ShapeField::StemPinch => &mut self.stem_pinch,
            ShapeField::BulbWidth => &mut self.bulb_width,
            ShapeField::BulbHeight => &mut self.bulb_height,
            ShapeField::TotalHeight => &mut self.total_height,
            ShapeField::PoolSize => &mut self.pool_size,
        }
    }

    /// Copy with one field replaced, clamped into its tuning range and validated.
    pub fn with_field(&self, field: ShapeField, value: f32) -> Result<Self, ShapeError> {
        if !value.is_finite() {
            return Err(ShapeError::NonFinite {
                field: field.name(),
                value,
            });
        }
        let range = field.range();
        let mut next = *self;
        *next.slot(field) = value.clamp(*range.start(), *range.end());
        next.validate()?;
        Ok(next)
    }

    /// Radius around the axis inside which a walking participant counts as "in the pool".
    #[inline]
    pub fn proximity_threshold(&self) -> f32 {
        self.pool_size * POOL_RADIUS_SCALE
    }

    /// Control polygon, bottom to top: base, stem, pinch, bulb start, bulb max, bulb shoulder, tip.
    pub fn control_points(&self) -> [ProfilePoint; PROFILE_CONTROL_POINTS] {
        [
            ProfilePoint::new(self.base_width, 0.0),
            ProfilePoint::new(self.base_width * 0.5, 0.5),
            ProfilePoint::new(self.stem_pinch, self.bulb_height * 0.3),
            ProfilePoint::new(self.stem_pinch * 1.5, self.bulb_height * 0.5),
            ProfilePoint::new(self.bulb_width, self.bulb_height * 0.8),
            ProfilePoint::new(self.bulb_width * 0.6, self.bulb_height * 0.95),
            ProfilePoint::new(0.0, self.total_height),
        ]
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        for field in ShapeField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ShapeError::NonFinite {
                    field: field.name(),
                    value,
                });
            }
            if value < 0.0 {
                return Err(ShapeError::Negative {
                    field: field.name(),
                    value,
                });
            }
        }
        let points = self.control_points();
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].height < pair[0].height {
                return Err(ShapeError::NonMonotonicHeights {
                    index: index + 1,
                    height: pair[1].height,
                    prev_height: pair[0].height,
                });
            }
        }
        Ok(())
    }
}

/// One (radius, height) point of the profile. Laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProfilePoint {
    pub radius: f32,
    pub height: f32,
}

impl ProfilePoint {
    #[inline]
    pub const fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }
}

/// How the dense samples are drawn through the control polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileCurve {
    /// Uniform Catmull-Rom through every control point, ends duplicated.
    #[default]
    CatmullRom,
    /// The control polygon itself.
    Linear,
}

#[inline]
fn catmull_rom(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t * t2;
    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3 + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2 + v0 * t + p1
}

/// Evaluate the curve at parameter `p` in control-segment units (`0..=points.len() - 1`).
fn curve_point(points: &[ProfilePoint], curve: ProfileCurve, p: f32) -> ProfilePoint {
    let last = points.len() - 1;
    let i = (p.floor().max(0.0) as usize).min(last);
    let w = p - i as f32;
    let b = points[i];
    let c = points[(i + 1).min(last)];
    match curve {
        ProfileCurve::Linear => ProfilePoint::new(
            b.radius + (c.radius - b.radius) * w,
            b.height + (c.height - b.height) * w,
        ),
        ProfileCurve::CatmullRom => {
            let a = points[i.saturating_sub(1)];
            let d = points[(i + 2).min(last)];
            ProfilePoint::new(
                catmull_rom(w, a.radius, b.radius, c.radius, d.radius),
                catmull_rom(w, a.height, b.height, c.height, d.height),
            )
        }
    }
}

/// Snapshot of the profile for one set of shape parameters.
#[derive(Clone, Debug)]
pub struct ProfileTable {
    params: ShapeParameters,
    curve: ProfileCurve,
    control: [ProfilePoint; PROFILE_CONTROL_POINTS],
    samples: Vec<ProfilePoint>,
}

impl ProfileTable {
    pub fn build(params: &ShapeParameters) -> Result<Self, ShapeError> {
        Self::build_with(params, ProfileCurve::default())
    }

    pub fn build_with(params: &ShapeParameters, curve: ProfileCurve) -> Result<Self, ShapeError> {
        params.validate()?;
        let control = params.control_points();
        let segments = (PROFILE_CONTROL_POINTS - 1) as f32;
        let samples = (0..=PROFILE_SUBDIVISIONS)
            .map(|d| {
                let p = segments * d as f32 / PROFILE_SUBDIVISIONS as f32;
                curve_point(&control, curve, p)
            })
            .collect::<Vec<_>>();
        Ok(Self {
            params: *params,
            curve,
            control,
            samples,
        })
    }

    /// Replace this table with one built from `params`. On error the current
    /// snapshot is kept as-is.
    pub fn rebuild(&mut self, params: &ShapeParameters) -> Result<(), ShapeError> {
        *self = Self::build_with(params, self.curve)?;
        Ok(())
    }

    pub fn params(&self) -> &ShapeParameters {
        &self.params
    }

    pub fn curve(&self) -> ProfileCurve {
        self.curve
    }

    pub fn control_points(&self) -> &[ProfilePoint; PROFILE_CONTROL_POINTS] {
        &self.control
    }

    /// The `PROFILE_SUBDIVISIONS + 1` evenly spaced curve samples, bottom to top.
    pub fn samples(&self) -> &[ProfilePoint] {
        &self.samples
    }

    pub fn total_height(&self) -> f32 {
        self.params.total_height
    }

    /// Core radius at `height` above the vortex base.
    ///
    /// Below the base the base radius holds; above the tip the radius is 0.
    /// Inside the domain a control point's own height yields its radius;
    /// anything else interpolates the first bracketing pair of dense samples
    /// linearly.
    pub fn radius_at(&self, height: f32) -> f32 {
        if height < 0.0 {
            return self.control[0].radius;
        }
        if height > self.params.total_height {
            return 0.0;
        }
        // the spline may overshoot between close knots, so knots win outright
        if let Some(knot) = self.control.iter().find(|p| p.height == height) {
            return knot.radius;
        }
        for pair in self.samples.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if height >= a.height && height <= b.height {
                if b.height == a.height {
                    return a.radius;
                }
                let alpha = (height - a.height) / (b.height - a.height);
                return a.radius + (b.radius - a.radius) * alpha;
            }
        }
        0.0
    }

    /// Shell radius at `height`: the core profile compressed vertically, then expanded radially.
    #[inline]
    pub fn shell_radius_at(&self, height: f32) -> f32 {
        self.radius_at(height / SHELL_HEIGHT_SCALE) * SHELL_RADIAL_SCALE
    }
}
