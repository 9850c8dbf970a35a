//! Heading filter: azimuth conversion and change-threshold suppression

use crate::math::RotationMatrixExt;
use crate::remap::Remap;
use crate::sample::OrientationSample;
use crate::types::{AccuracyLevel, CompassSettings, HeadingReading};
use nalgebra::Matrix3;

/// Accuracy reported when the sensor gave none, or an unreliable one
pub const UNKNOWN_ACCURACY: f64 = -1.0;

/// Map an accuracy classification to a coarse accuracy in degrees
///
/// High → 15, Medium → 30, Low → 45, anything else → -1 (unknown).
///
/// # Example
/// ```
/// use compass_heading::{AccuracyLevel, accuracy_degrees};
///
/// assert_eq!(accuracy_degrees(Some(AccuracyLevel::High)), 15.0);
/// assert_eq!(accuracy_degrees(None), -1.0);
/// ```
pub fn accuracy_degrees(accuracy: Option<AccuracyLevel>) -> f64 {
    match accuracy {
        Some(AccuracyLevel::High) => 15.0,
        Some(AccuracyLevel::Medium) => 30.0,
        Some(AccuracyLevel::Low) => 45.0,
        Some(AccuracyLevel::Unreliable) | None => UNKNOWN_ACCURACY,
    }
}

/// Suppression state of a [`HeadingFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterState {
    /// Nothing emitted yet; the next sample always emits
    #[default]
    Unseeded,
    /// Holds the azimuth of the last emitted reading
    Seeded { last_azimuth: f64 },
}

impl FilterState {
    /// Azimuth of the last emitted reading
    pub fn last_azimuth(&self) -> Option<f64> {
        match self {
            FilterState::Unseeded => None,
            FilterState::Seeded { last_azimuth } => Some(*last_azimuth),
        }
    }
}

/// Converts rotation samples into compass readings
///
/// A reading is emitted for the first sample and then only when the device
/// azimuth moved by at least the threshold since the last emitted reading.
/// The camera azimuth is recomputed for every emitted reading and never
/// filtered on its own.
///
/// One filter serves one subscription. It is not shared: calls are expected
/// in sequence from a single delivery context.
///
/// # Example
/// ```
/// use nalgebra::{Rotation3, Vector3};
/// use compass_heading::{AccuracyLevel, HeadingFilter, OrientationSample};
///
/// let mut filter = HeadingFilter::new();
/// filter.on_accuracy_changed(Some(AccuracyLevel::Medium));
///
/// // Flat device turned 90° clockwise
/// let east = Rotation3::from_axis_angle(&Vector3::z_axis(), -90f64.to_radians());
/// let reading = filter.on_sample(&OrientationSample::from(east)).unwrap();
/// assert!((reading.azimuth - 90.0).abs() < 1e-9);
/// assert_eq!(reading.accuracy_degrees, 30.0);
///
/// // Same orientation again is suppressed
/// assert!(filter.on_sample(&OrientationSample::from(east)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HeadingFilter {
    threshold: f64,
    state: FilterState,
    accuracy: Option<AccuracyLevel>,
}

impl HeadingFilter {
    /// Default minimum azimuth change in degrees
    pub const DEFAULT_THRESHOLD: f64 = 0.1;

    /// Create a filter with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD)
    }

    /// Create a filter with the threshold from `settings`
    pub fn with_settings(settings: &CompassSettings) -> Self {
        Self::with_threshold(settings.threshold)
    }

    /// Create a filter with an explicit threshold in degrees
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            state: FilterState::Unseeded,
            accuracy: None,
        }
    }

    /// Record the latest accuracy notification
    ///
    /// The value is reused for every following sample until it changes.
    pub fn on_accuracy_changed(&mut self, accuracy: Option<AccuracyLevel>) {
        self.accuracy = accuracy;
    }

    /// Process a sample with the cached accuracy
    pub fn on_sample(&mut self, sample: &OrientationSample) -> Option<HeadingReading> {
        self.update(sample.rotation(), self.accuracy)
    }

    /// Process a rotation matrix with an explicit accuracy
    ///
    /// Returns `None` when the azimuth change since the last emitted reading
    /// is below the threshold.
    pub fn update(
        &mut self,
        rotation: &Matrix3<f64>,
        accuracy: Option<AccuracyLevel>,
    ) -> Option<HeadingReading> {
        let azimuth = rotation.azimuth_degrees();

        if let FilterState::Seeded { last_azimuth } = self.state {
            let change = (last_azimuth - azimuth).abs();
            if change < self.threshold {
                tracing::trace!(azimuth, last_azimuth, change, "heading change below threshold");
                return None;
            }
        }
        self.state = FilterState::Seeded {
            last_azimuth: azimuth,
        };

        let camera_azimuth = Remap::CAMERA.apply(rotation).azimuth_degrees();

        Some(HeadingReading {
            azimuth,
            camera_azimuth,
            accuracy_degrees: accuracy_degrees(accuracy),
        })
    }

    /// Current suppression state
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Cached accuracy classification
    pub fn accuracy(&self) -> Option<AccuracyLevel> {
        self.accuracy
    }

    /// Minimum azimuth change in degrees
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new()
    }
}
