use glam::Vec3;

// Scene layout and interaction tuning for the web frontend.

// Scene layout
pub const AXIS_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0); // vortex base, world-space
pub const OBSERVER_START: Vec3 = Vec3::new(6.0, 1.6, 0.0); // eye position at load
pub const OBSERVER_MIN_Y: f32 = 0.1;
pub const OBSERVER_MAX_Y: f32 = 14.0;

// Movement (metres per key press)
pub const MOVE_STEP: f32 = 0.25;
pub const RISE_STEP: f32 = 0.2;

// Live tuning: fraction of a field's range applied per key press
pub const TUNE_STEP_FRACTION: f32 = 0.05;

// Walking sound
pub const WALKING_SOUND_VOLUME: f32 = 0.8; // sink's configured initial gain
pub const WALKING_SOUND_HZ: f32 = 96.0;
pub const MASTER_GAIN: f32 = 0.5;

// Side-view canvas
pub const VIEW_MARGIN_PX: f64 = 24.0;
pub const VIEW_HALF_WIDTH_M: f32 = 8.0; // metres shown either side of the axis
pub const VIEW_HEIGHT_M: f32 = 14.0;
pub const DOT_RADIUS_PX: f64 = 5.0;
