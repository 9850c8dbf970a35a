//! In-process sensor subsystem
//!
//! [`SimulatedSensors`] stands in for a platform sensor service on hosts
//! without hardware. Samples pushed with
//! [`emit_rotation_vector`](SimulatedSensors::emit_rotation_vector) are
//! delivered synchronously to every registered listener, in order.

use crate::sensor::{ListenerId, SensorListener, SensorSubsystem};
use crate::types::{AccuracyLevel, SensorDelay, SensorKind};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

struct Registration {
    id: ListenerId,
    kind: SensorKind,
    delay: SensorDelay,
    listener: Box<dyn SensorListener>,
}

/// Thread-safe simulated sensor service
pub struct SimulatedSensors {
    available: HashSet<SensorKind>,
    registrations: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl SimulatedSensors {
    /// Create a service that has the given sensor kinds
    pub fn new(available: impl IntoIterator<Item = SensorKind>) -> Self {
        Self {
            available: available.into_iter().collect(),
            registrations: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Deliver a rotation vector sample to every listener
    ///
    /// Returns the number of listeners that received it.
    pub fn emit_rotation_vector(&self, values: &[f32], timestamp_ns: u64) -> usize {
        let mut registrations = self.lock();
        for registration in registrations.iter_mut() {
            registration.listener.on_sensor_changed(values, timestamp_ns);
        }
        registrations.len()
    }

    /// Deliver an accuracy notification to every listener
    pub fn emit_accuracy(&self, accuracy: Option<AccuracyLevel>) -> usize {
        let mut registrations = self.lock();
        for registration in registrations.iter_mut() {
            registration.listener.on_accuracy_changed(accuracy);
        }
        registrations.len()
    }

    /// Number of active registrations
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    /// Delivery period requested by the most recent registration
    pub fn last_delay(&self) -> Option<SensorDelay> {
        self.lock().last().map(|registration| registration.delay)
    }

    /// Sensor kinds of the active registrations
    pub fn registered_kinds(&self) -> Vec<SensorKind> {
        self.lock().iter().map(|registration| registration.kind).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        // A panicking listener must not take the whole service down
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SensorSubsystem for SimulatedSensors {
    type Sensor = SensorKind;

    fn default_sensor(&self, kind: SensorKind) -> Option<SensorKind> {
        self.available.contains(&kind).then_some(kind)
    }

    fn register_listener(
        &self,
        sensor: &SensorKind,
        delay: SensorDelay,
        listener: Box<dyn SensorListener>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Registration {
            id,
            kind: *sensor,
            delay,
            listener,
        });
        tracing::debug!(?id, kind = ?sensor, ?delay, "simulated listener registered");
        id
    }

    fn unregister_listener(&self, id: ListenerId) {
        let mut registrations = self.lock();
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        if registrations.len() != before {
            tracing::debug!(?id, "simulated listener unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorded {
        samples: Vec<(Vec<f32>, u64)>,
        accuracy: Vec<Option<AccuracyLevel>>,
    }

    struct Recorder(Arc<Mutex<Recorded>>);

    impl SensorListener for Recorder {
        fn on_sensor_changed(&mut self, values: &[f32], timestamp_ns: u64) {
            self.0.lock().unwrap().samples.push((values.to_vec(), timestamp_ns));
        }

        fn on_accuracy_changed(&mut self, accuracy: Option<AccuracyLevel>) {
            self.0.lock().unwrap().accuracy.push(accuracy);
        }
    }

    #[test]
    fn test_availability() {
        let sensors = SimulatedSensors::new([SensorKind::RotationVector]);
        assert_eq!(
            sensors.default_sensor(SensorKind::RotationVector),
            Some(SensorKind::RotationVector)
        );
        assert_eq!(sensors.default_sensor(SensorKind::GameRotationVector), None);
    }

    #[test]
    fn test_delivery_and_unregister() {
        let sensors = SimulatedSensors::new([SensorKind::RotationVector]);
        let recorded = Arc::new(Mutex::new(Recorded::default()));

        let id = sensors.register_listener(
            &SensorKind::RotationVector,
            SensorDelay::Game,
            Box::new(Recorder(recorded.clone())),
        );
        assert_eq!(sensors.listener_count(), 1);
        assert_eq!(sensors.last_delay(), Some(SensorDelay::Game));
        assert_eq!(sensors.registered_kinds(), [SensorKind::RotationVector]);

        assert_eq!(sensors.emit_accuracy(Some(AccuracyLevel::High)), 1);
        assert_eq!(sensors.emit_rotation_vector(&[0.0, 0.0, 0.0, 1.0], 42), 1);

        sensors.unregister_listener(id);
        sensors.unregister_listener(id);
        assert_eq!(sensors.listener_count(), 0);
        assert_eq!(sensors.emit_rotation_vector(&[0.0, 0.0, 0.0, 1.0], 43), 0);

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.samples, [(vec![0.0, 0.0, 0.0, 1.0], 42)]);
        assert_eq!(recorded.accuracy, [Some(AccuracyLevel::High)]);
    }
}
