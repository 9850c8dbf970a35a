//! Core types and settings for the compass heading library

use core::time::Duration;

/// Accuracy classification reported by the sensor subsystem
///
/// Accuracy notifications arrive independently of rotation samples. The
/// latest value is cached by the filter and reused until it changes.
///
/// # Example
/// ```
/// use compass_heading::AccuracyLevel;
///
/// assert_eq!(AccuracyLevel::from_status(3), Some(AccuracyLevel::High));
/// assert_eq!(AccuracyLevel::from_status(-1), None); // no contact
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccuracyLevel {
    /// Readings cannot be trusted, the sensor needs calibration
    Unreliable,
    /// Low accuracy
    Low,
    /// Average accuracy
    Medium,
    /// Maximum accuracy
    High,
}

impl AccuracyLevel {
    /// Convert a platform status code (`0..=3`) into an accuracy level
    ///
    /// Codes outside that range (for example `-1`, "no contact") carry no
    /// accuracy information and map to `None`.
    pub fn from_status(status: i32) -> Option<Self> {
        match status {
            0 => Some(AccuracyLevel::Unreliable),
            1 => Some(AccuracyLevel::Low),
            2 => Some(AccuracyLevel::Medium),
            3 => Some(AccuracyLevel::High),
            _ => None,
        }
    }

    /// Platform status code for this level
    pub fn status(self) -> i32 {
        match self {
            AccuracyLevel::Unreliable => 0,
            AccuracyLevel::Low => 1,
            AccuracyLevel::Medium => 2,
            AccuracyLevel::High => 3,
        }
    }
}

/// A filtered compass reading
///
/// Both azimuths are in degrees within `[0, 360)`, measured clockwise from
/// north. `accuracy_degrees` is one of `45`, `30`, `15` or `-1` (unknown).
/// These accuracy figures are coarse indications, not real error bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingReading {
    /// Heading of the device's top edge (+Y axis)
    pub azimuth: f64,
    /// Heading of the device's rear camera (-Z axis)
    pub camera_azimuth: f64,
    /// Estimated accuracy in degrees, `-1` when unknown
    pub accuracy_degrees: f64,
}

impl HeadingReading {
    /// Three-element payload `[azimuth, camera_azimuth, accuracy_degrees]`
    ///
    /// # Example
    /// ```
    /// use compass_heading::HeadingReading;
    ///
    /// let reading = HeadingReading { azimuth: 90.0, camera_azimuth: 180.0, accuracy_degrees: 15.0 };
    /// assert_eq!(reading.to_array(), [90.0, 180.0, 15.0]);
    /// ```
    pub fn to_array(&self) -> [f64; 3] {
        [self.azimuth, self.camera_azimuth, self.accuracy_degrees]
    }
}

/// Rotation sensor types a compass can be driven by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    /// Fused accelerometer, gyroscope and magnetometer rotation vector
    RotationVector,
    /// Accelerometer and magnetometer only, no gyroscope
    GeomagneticRotationVector,
    /// Accelerometer and gyroscope only; its heading is not referenced to north
    GameRotationVector,
}

/// Requested sample delivery period
///
/// The named periods match the usual platform presets. The subsystem is
/// free to deliver faster or slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorDelay {
    /// As fast as the hardware allows
    Fastest,
    /// Suitable for games (20 ms)
    Game,
    /// Suitable for user interface updates (~66.7 ms)
    #[default]
    Ui,
    /// Suitable for screen orientation changes (200 ms)
    Normal,
    /// Explicit sampling period
    Custom(Duration),
}

impl SensorDelay {
    /// Sampling period requested from the sensor subsystem
    pub fn period(&self) -> Duration {
        match self {
            SensorDelay::Fastest => Duration::ZERO,
            SensorDelay::Game => Duration::from_micros(20_000),
            SensorDelay::Ui => Duration::from_micros(66_667),
            SensorDelay::Normal => Duration::from_micros(200_000),
            SensorDelay::Custom(period) => *period,
        }
    }
}

/// Compass settings
///
/// # Example
/// ```
/// use compass_heading::{CompassSettings, SensorDelay, SensorKind};
///
/// let settings = CompassSettings {
///     threshold: 0.5,             // Emit only on half-degree changes
///     fallback: None,             // No geomagnetic fallback
///     delay: SensorDelay::Game,
///     ..Default::default()
/// };
/// assert_eq!(settings.candidates().collect::<Vec<_>>(), [SensorKind::RotationVector]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompassSettings {
    /// Minimum azimuth change in degrees before a new reading is emitted
    pub threshold: f64,
    /// Preferred sensor
    pub primary: SensorKind,
    /// Sensor used when the primary one is missing
    pub fallback: Option<SensorKind>,
    /// Requested delivery period
    pub delay: SensorDelay,
}

impl CompassSettings {
    /// Sensor kinds in order of preference
    pub fn candidates(&self) -> impl Iterator<Item = SensorKind> + '_ {
        core::iter::once(self.primary).chain(self.fallback)
    }
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            primary: SensorKind::RotationVector,
            fallback: Some(SensorKind::GeomagneticRotationVector),
            delay: SensorDelay::Ui,
        }
    }
}
