//! Sensor subsystem collaborator interface
//!
//! The platform sensor service is not part of this crate. Hosts adapt it by
//! implementing [`SensorSubsystem`]; the compass registers a
//! [`SensorListener`] with it and receives rotation samples and accuracy
//! notifications through that listener.

use crate::types::{AccuracyLevel, SensorDelay, SensorKind};

/// Identifies one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Receives sensor callbacks
///
/// The subsystem must deliver callbacks for one listener sequentially, never
/// overlapping, typically from its own delivery thread.
pub trait SensorListener: Send {
    /// A new raw sample: rotation vector components and a timestamp in nanoseconds
    fn on_sensor_changed(&mut self, values: &[f32], timestamp_ns: u64);

    /// The sensor's accuracy classification changed
    ///
    /// `None` when the platform reported a status with no accuracy meaning.
    fn on_accuracy_changed(&mut self, accuracy: Option<AccuracyLevel>);
}

/// Platform sensor service
pub trait SensorSubsystem: Send + Sync {
    /// Handle to a physical or virtual sensor
    type Sensor: Clone + Send + 'static;

    /// Default sensor of the given kind, `None` when the device has none
    fn default_sensor(&self, kind: SensorKind) -> Option<Self::Sensor>;

    /// Start delivering callbacks for `sensor` to `listener`
    fn register_listener(
        &self,
        sensor: &Self::Sensor,
        delay: SensorDelay,
        listener: Box<dyn SensorListener>,
    ) -> ListenerId;

    /// Stop delivering callbacks to a listener
    ///
    /// Unknown or already unregistered ids are ignored.
    fn unregister_listener(&self, id: ListenerId);
}

/// Resolve the first available sensor in order of preference
///
/// # Example
/// ```
/// use compass_heading::{CompassSettings, SensorKind, resolve_sensor};
/// use compass_heading::simulated::SimulatedSensors;
///
/// let sensors = SimulatedSensors::new([SensorKind::GeomagneticRotationVector]);
/// let settings = CompassSettings::default();
///
/// let (kind, _sensor) = resolve_sensor(&sensors, settings.candidates()).unwrap();
/// assert_eq!(kind, SensorKind::GeomagneticRotationVector);
/// ```
pub fn resolve_sensor<S: SensorSubsystem + ?Sized>(
    subsystem: &S,
    candidates: impl IntoIterator<Item = SensorKind>,
) -> Option<(SensorKind, S::Sensor)> {
    candidates
        .into_iter()
        .find_map(|kind| subsystem.default_sensor(kind).map(|sensor| (kind, sensor)))
}
