use std::time::Duration;

// Shared tuning constants for the vortex profile, intersection cadence and walking-sound fade.

// Profile
pub const PROFILE_CONTROL_POINTS: usize = 7;
pub const PROFILE_SUBDIVISIONS: usize = 100; // dense samples = subdivisions + 1

// Shell surface: profile height compressed before lookup, radius expanded after.
// Empirical values from the scene; keep them exact.
pub const SHELL_HEIGHT_SCALE: f32 = 1.02;
pub const SHELL_RADIAL_SCALE: f32 = 1.05;

// Intersection
pub const ON_AXIS_EPSILON: f32 = 0.001; // below this the observer counts as on-axis
pub const EVALUATION_INTERVAL: Duration = Duration::from_millis(150);

// Proximity
pub const POOL_RADIUS_SCALE: f32 = 2.75; // floor pool size -> walking threshold radius
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);
pub const FADE_DURATION: Duration = Duration::from_millis(500);
pub const FADE_STEP: Duration = Duration::from_millis(50);
pub const FADE_SILENCE_EPSILON: f32 = 0.01; // fraction of the fade's starting gain
pub const DEFAULT_NOMINAL_GAIN: f32 = 1.0;

// Mesh
pub const LATHE_SEGMENTS: usize = 80;

// HUD
pub const METERS_TO_CM: f32 = 100.0;
