use crate::constants::*;
use crate::error::ShapeError;
use crate::mesh::{lathe, LatheMesh};
use crate::profile::{ProfileCurve, ProfileTable, ShapeField, ShapeParameters};
use glam::Vec3;

/// Owner of the shape parameters and the profile table built from them.
///
/// Parameter changes rebuild the table synchronously. A rejected change
/// leaves both the parameters and the table as they were.
#[derive(Clone, Debug)]
pub struct Vortex {
    table: ProfileTable,
}

impl Vortex {
    pub fn new(shape: ShapeParameters, curve: ProfileCurve) -> Result<Self, ShapeError> {
        let table = ProfileTable::build_with(&shape, curve)?;
        Ok(Self { table })
    }

    pub fn shape(&self) -> &ShapeParameters {
        self.table.params()
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }

    pub fn proximity_threshold(&self) -> f32 {
        self.shape().proximity_threshold()
    }

    pub fn set_shape(&mut self, shape: ShapeParameters) -> Result<(), ShapeError> {
        if let Err(e) = self.table.rebuild(&shape) {
            log::warn!("[vortex] shape rejected: {}", e);
            return Err(e);
        }
        log::debug!(
            "[vortex] profile rebuilt: base={:.2} pinch={:.3} bulb={:.2}@{:.2} height={:.2}",
            shape.base_width,
            shape.stem_pinch,
            shape.bulb_width,
            shape.bulb_height,
            shape.total_height
        );
        Ok(())
    }

    /// Live-tuning entry point: clamp `value` into the field's range and rebuild.
    pub fn tune(&mut self, field: ShapeField, value: f32) -> Result<(), ShapeError> {
        let next = match self.shape().with_field(field, value) {
            Ok(next) => next,
            Err(e) => {
                log::warn!("[vortex] {} = {} rejected: {}", field.name(), value, e);
                return Err(e);
            }
        };
        self.set_shape(next)
    }

    pub fn core_mesh(&self) -> LatheMesh {
        lathe(self.table.samples(), LATHE_SEGMENTS, Vec3::ONE)
    }

    pub fn shell_mesh(&self) -> LatheMesh {
        lathe(
            self.table.samples(),
            LATHE_SEGMENTS,
            Vec3::new(SHELL_RADIAL_SCALE, SHELL_HEIGHT_SCALE, SHELL_RADIAL_SCALE),
        )
    }
}
