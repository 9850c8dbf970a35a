use compass_heading::{
    AccuracyLevel, FilterState, HeadingFilter, OrientationSample, RotationMatrixExt,
    normalize_degrees,
};
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f64::consts::PI;

const SEED: u64 = 0x00C0_FFEE;
const ITERATIONS: usize = 10_000;

/// Uniformly distributed random rotation
fn random_rotation(rng: &mut Pcg64) -> UnitQuaternion<f64> {
    // Shoemake's method
    let (u1, u2, u3): (f64, f64, f64) = (rng.random(), rng.random(), rng.random());
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
        b * (2.0 * PI * u3).cos(),
        a * (2.0 * PI * u2).sin(),
        a * (2.0 * PI * u2).cos(),
        b * (2.0 * PI * u3).sin(),
    ))
}

fn in_range(angle: f64) -> bool {
    (0.0..360.0).contains(&angle)
}

#[test]
fn test_readings_always_in_range() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        // Zero threshold so every sample emits
        let mut filter = HeadingFilter::with_threshold(0.0);
        let rotation = random_rotation(&mut rng);
        let reading = filter
            .on_sample(&OrientationSample::from(rotation))
            .expect("first sample always emits");

        assert!(in_range(reading.azimuth), "azimuth {}", reading.azimuth);
        assert!(
            in_range(reading.camera_azimuth),
            "camera azimuth {}",
            reading.camera_azimuth
        );
        assert!([45.0, 30.0, 15.0, -1.0].contains(&reading.accuracy_degrees));
    }
}

#[test]
fn test_rotation_vectors_in_range() {
    let mut rng = Pcg64::seed_from_u64(SEED + 1);

    for _ in 0..ITERATIONS {
        let q = random_rotation(&mut rng);
        let values = [q.i as f32, q.j as f32, q.k as f32, q.w as f32];
        let sample = OrientationSample::from_rotation_vector(&values).unwrap();
        assert!(in_range(sample.azimuth_degrees()));
    }
}

#[test]
fn test_emit_invariant_holds_over_random_walk() {
    let mut rng = Pcg64::seed_from_u64(SEED + 2);
    let mut filter = HeadingFilter::new();
    let mut heading: f64 = 0.0;
    let mut last_emitted: Option<f64> = None;

    for _ in 0..ITERATIONS {
        heading = (heading + rng.random_range(-0.3..0.3)).rem_euclid(360.0);
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), -heading.to_radians());
        let azimuth = rotation.matrix().azimuth_degrees();

        let reading = filter.update(rotation.matrix(), Some(AccuracyLevel::Medium));

        match last_emitted {
            None => assert!(reading.is_some()),
            Some(last) if (last - azimuth).abs() >= filter.threshold() => {
                assert!(reading.is_some(), "change {} should emit", (last - azimuth).abs());
            }
            Some(last) => {
                assert!(reading.is_none(), "change {} should be suppressed", (last - azimuth).abs());
            }
        }

        if let Some(reading) = reading {
            assert_eq!(reading.azimuth, azimuth);
            last_emitted = Some(azimuth);
        }
        assert_eq!(filter.state().last_azimuth(), last_emitted);
    }
}

#[test]
fn test_heading_unaffected_by_small_tilt() {
    let mut rng = Pcg64::seed_from_u64(SEED + 3);

    for _ in 0..1_000 {
        let heading: f64 = rng.random_range(0.0..360.0);
        let pitch: f64 = rng.random_range(-30.0..30.0);
        let roll: f64 = rng.random_range(-30.0..30.0);

        // Tilting about device X changes pitch only, the azimuth stays put
        let yaw = Rotation3::from_axis_angle(&Vector3::z_axis(), -heading.to_radians());
        let tilted = yaw * Rotation3::from_axis_angle(&Vector3::x_axis(), pitch.to_radians());
        let azimuth = tilted.matrix().azimuth_degrees();
        let difference = (azimuth - heading + 540.0).rem_euclid(360.0) - 180.0;
        assert!(difference.abs() < 1e-9, "heading {} pitch {} -> {}", heading, pitch, azimuth);

        // Roll on top of pitch still yields an in-range azimuth
        let rolled = tilted * Rotation3::from_axis_angle(&Vector3::y_axis(), roll.to_radians());
        assert!(in_range(rolled.matrix().azimuth_degrees()));
    }
}

#[test]
fn test_negative_yaw_normalizes() {
    // Raw yaw of -30° comes from a counter-clockwise rotation
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), 30f64.to_radians());
    assert!((rotation.matrix().azimuth_degrees() - 330.0).abs() < 1e-9);
    assert!((normalize_degrees(-30.0) - 330.0).abs() < 1e-12);
}

#[test]
fn test_state_transitions() {
    let mut filter = HeadingFilter::new();
    assert_eq!(filter.state(), FilterState::Unseeded);

    filter.update(&Matrix3::identity(), None);
    assert_eq!(filter.state(), FilterState::Seeded { last_azimuth: 0.0 });

    // Suppressed: state unchanged
    filter.update(&Matrix3::identity(), None);
    assert_eq!(filter.state(), FilterState::Seeded { last_azimuth: 0.0 });
}
