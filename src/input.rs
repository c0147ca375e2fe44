use crate::constants::*;
use glam::Vec3;
use vortex_core::ShapeField;

// ---------------- Movement ----------------
#[inline]
pub fn movement_for_key(key: &str) -> Option<Vec3> {
    match key {
        "w" | "W" | "ArrowUp" => Some(Vec3::new(0.0, 0.0, -MOVE_STEP)),
        "s" | "S" | "ArrowDown" => Some(Vec3::new(0.0, 0.0, MOVE_STEP)),
        "a" | "A" | "ArrowLeft" => Some(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
        "d" | "D" | "ArrowRight" => Some(Vec3::new(MOVE_STEP, 0.0, 0.0)),
        "e" | "E" => Some(Vec3::new(0.0, RISE_STEP, 0.0)),
        "q" | "Q" => Some(Vec3::new(0.0, -RISE_STEP, 0.0)),
        _ => None,
    }
}

#[inline]
pub fn step_observer(position: Vec3, delta: Vec3) -> Vec3 {
    let mut next = position + delta;
    next.y = next.y.clamp(OBSERVER_MIN_Y, OBSERVER_MAX_Y);
    next
}

// ---------------- Live tuning ----------------
#[inline]
pub fn tuning_field_for_digit(key: &str) -> Option<ShapeField> {
    match key {
        "1" | "!" => Some(ShapeField::BaseWidth),
        "2" | "@" => Some(ShapeField::StemPinch),
        "3" | "#" => Some(ShapeField::BulbWidth),
        "4" | "$" => Some(ShapeField::BulbHeight),
        "5" | "%" => Some(ShapeField::TotalHeight),
        "6" | "^" => Some(ShapeField::PoolSize),
        _ => None,
    }
}

/// Next value for `field` after one key press; shift lowers instead of raising.
#[inline]
pub fn nudged_value(field: ShapeField, current: f32, lower: bool) -> f32 {
    let range = field.range();
    let step = (range.end() - range.start()) * TUNE_STEP_FRACTION;
    let next = if lower { current - step } else { current + step };
    next.clamp(*range.start(), *range.end())
}
