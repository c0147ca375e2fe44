// Host-side tests for the radial profile table.

use rand::prelude::*;
use vortex_core::*;

const EPS: f32 = 1e-5;

fn default_table() -> ProfileTable {
    ProfileTable::build(&ShapeParameters::default()).expect("default shape is valid")
}

#[test]
fn control_points_follow_shape_parameters() {
    let p = ShapeParameters::default().control_points();
    let expected = [
        (4.0, 0.0),
        (2.0, 0.5),
        (0.3808, 3.0),
        (0.5712, 5.0),
        (1.0, 8.0),
        (0.6, 9.5),
        (0.0, 12.0),
    ];
    for (point, (r, h)) in p.iter().zip(expected) {
        assert!((point.radius - r).abs() < EPS, "{point:?}");
        assert!((point.height - h).abs() < EPS, "{point:?}");
    }
}

#[test]
fn table_has_dense_samples_from_base_to_tip() {
    let table = default_table();
    let samples = table.samples();
    assert_eq!(samples.len(), PROFILE_SUBDIVISIONS + 1);
    assert_eq!(samples[0], table.control_points()[0]);
    let tip = samples[PROFILE_SUBDIVISIONS];
    assert!((tip.height - 12.0).abs() < EPS);
    assert!(tip.radius.abs() < EPS);
}

#[test]
fn radius_below_base_is_base_radius() {
    let table = default_table();
    for h in [-0.001, -1.0, -100.0] {
        assert_eq!(table.radius_at(h), 4.0);
    }
}

#[test]
fn radius_above_tip_is_zero() {
    let table = default_table();
    for h in [12.0001, 13.0, 1e6] {
        assert_eq!(table.radius_at(h), 0.0);
    }
}

#[test]
fn radius_at_control_heights_is_exact() {
    let table = default_table();
    for point in table.control_points() {
        let r = table.radius_at(point.height);
        assert!(
            (r - point.radius).abs() < EPS,
            "radius at {} was {r}, expected {}",
            point.height,
            point.radius
        );
    }
}

#[test]
fn radius_is_continuous_inside_the_domain() {
    let table = default_table();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let h = rng.gen_range(0.0..12.0_f32);
        let a = table.radius_at(h);
        let b = table.radius_at(h + 1e-4);
        assert!(a >= -EPS, "negative radius {a} at {h}");
        assert!((a - b).abs() < 0.01, "jump between {h} and {}", h + 1e-4);
    }
}

#[test]
fn shell_radius_is_scaled_core_radius() {
    let table = default_table();
    let expected = table.radius_at(6.0 / 1.02) * 1.05;
    assert!((table.shell_radius_at(6.0) - expected).abs() < EPS);
    assert!(table.shell_radius_at(6.0) > table.radius_at(6.0));
}

#[test]
fn linear_curve_matches_control_polygon() {
    let table = ProfileTable::build_with(&ShapeParameters::default(), ProfileCurve::Linear)
        .expect("valid");
    // halfway between P0 (4, 0) and P1 (2, 0.5)
    assert!((table.radius_at(0.25) - 3.0).abs() < 1e-3);
    // halfway between P4 (1, 8) and P5 (0.6, 9.5)
    assert!((table.radius_at(8.75) - 0.8).abs() < 1e-3);
}

#[test]
fn negative_parameter_is_rejected() {
    let shape = ShapeParameters {
        bulb_width: -1.0,
        ..ShapeParameters::default()
    };
    assert_eq!(
        ProfileTable::build(&shape).unwrap_err(),
        ShapeError::Negative {
            field: "bulb_width",
            value: -1.0
        }
    );
}

#[test]
fn non_finite_parameter_is_rejected() {
    let shape = ShapeParameters {
        total_height: f32::NAN,
        ..ShapeParameters::default()
    };
    assert!(matches!(
        ProfileTable::build(&shape),
        Err(ShapeError::NonFinite {
            field: "total_height",
            ..
        })
    ));
}

#[test]
fn tip_below_bulb_shoulder_is_non_monotonic() {
    let shape = ShapeParameters {
        total_height: 4.0,
        ..ShapeParameters::default()
    };
    match ProfileTable::build(&shape) {
        Err(ShapeError::NonMonotonicHeights { index, .. }) => assert_eq!(index, 6),
        other => panic!("expected non-monotonic error, got {other:?}"),
    }
}

#[test]
fn short_bulb_puts_pinch_below_stem() {
    let shape = ShapeParameters {
        bulb_height: 1.0,
        ..ShapeParameters::default()
    };
    match shape.validate() {
        Err(ShapeError::NonMonotonicHeights { index, .. }) => assert_eq!(index, 2),
        other => panic!("expected non-monotonic error, got {other:?}"),
    }
}

#[test]
fn rejected_rebuild_keeps_previous_table() {
    let mut table = default_table();
    let before = table.radius_at(5.0);
    let bad = ShapeParameters {
        base_width: -2.0,
        ..ShapeParameters::default()
    };
    assert!(table.rebuild(&bad).is_err());
    assert_eq!(table.params(), &ShapeParameters::default());
    assert_eq!(table.radius_at(5.0), before);

    let wider = ShapeParameters {
        bulb_width: 2.0,
        ..ShapeParameters::default()
    };
    table.rebuild(&wider).expect("valid");
    assert!((table.radius_at(8.0) - 2.0).abs() < EPS);
}

#[test]
fn with_field_clamps_into_tuning_range() {
    let shape = ShapeParameters::default();
    let wide = shape.with_field(ShapeField::BaseWidth, 50.0).expect("valid");
    assert_eq!(wide.base_width, 4.0);
    let none = shape.with_field(ShapeField::PoolSize, -3.0).expect("valid");
    assert_eq!(none.pool_size, 0.0);
    assert_eq!(none.proximity_threshold(), 0.0);
    assert!(shape.with_field(ShapeField::StemPinch, f32::INFINITY).is_err());
}

#[test]
fn proximity_threshold_scales_pool_size() {
    let shape = ShapeParameters::default();
    assert!((shape.proximity_threshold() - 8.25).abs() < EPS);
}

#[test]
fn random_valid_shapes_hit_their_control_radii() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let mut shape = ShapeParameters::default();
        for field in ShapeField::ALL {
            let range = field.range();
            let v = rng.gen_range(*range.start()..=*range.end());
            if let Ok(next) = shape.with_field(field, v) {
                shape = next;
            }
        }
        let table = ProfileTable::build(&shape).expect("with_field only yields valid shapes");
        for point in table.control_points() {
            let r = table.radius_at(point.height);
            assert!(
                (r - point.radius).abs() < 1e-4,
                "{shape:?}: radius at {} was {r}, expected {}",
                point.height,
                point.radius
            );
        }
    }
}

#[test]
fn table_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProfileTable>();
    assert_send_sync::<ShapeParameters>();
}

fn assert_point(p: ProfilePoint, radius: f32, height: f32) {
    assert!(
        (p.radius - radius).abs() < 1e-4 && (p.height - height).abs() < 1e-4,
        "{p:?} vs ({radius}, {height})"
    );
}

// Reference values: uniform Catmull-Rom, tension 0.5, end points duplicated,
// evaluated at t = d / 100 over the default control polygon.
#[test]
fn dense_samples_follow_the_catmull_rom_curve() {
    let table = default_table();
    let samples = table.samples();
    assert_point(samples[17], 1.963604, 0.530890);
    assert_point(samples[33], 0.395730, 2.954410);
    assert_point(samples[83], 0.610083, 9.460690);
}

#[test]
fn radius_between_samples_interpolates_the_curve() {
    let shape = ShapeParameters {
        stem_pinch: 0.38,
        ..ShapeParameters::default()
    };
    let table = ProfileTable::build(&shape).expect("valid shape");
    assert!((table.radius_at(1.0) - 1.523175).abs() < 1e-4);
    assert!((table.radius_at(1.0 / 1.02) - 1.539441).abs() < 1e-4);
    assert!((table.shell_radius_at(1.0) - 1.616413).abs() < 1e-4);
    assert!((table.radius_at(6.0) - 0.729563).abs() < 1e-4);
    assert!((table.shell_radius_at(6.0) - 0.744458).abs() < 1e-4);
}

#[test]
fn radius_just_below_a_knot_uses_the_samples() {
    // 0.45 lies between samples 16 and 17, short of the knot at 0.5
    let table = default_table();
    assert!((table.radius_at(0.45) - 2.065396).abs() < 1e-4);
}
