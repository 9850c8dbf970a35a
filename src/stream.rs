//! Compass subscriptions and the heading stream
//!
//! [`Compass`] resolves a rotation sensor once, then hands out one
//! [`HeadingStream`] at a time. Each subscription owns a fresh
//! [`HeadingFilter`] that lives inside the listener registered with the
//! sensor subsystem, so the filter state is only ever touched from the
//! subsystem's delivery context and needs no lock.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use compass_heading::{Compass, CompassSettings, HeadingEvent, SensorKind};
//! use compass_heading::simulated::SimulatedSensors;
//!
//! let sensors = Arc::new(SimulatedSensors::new([SensorKind::RotationVector]));
//! let mut compass = Compass::new(sensors.clone(), CompassSettings::default());
//!
//! let stream = compass.listen();
//! sensors.emit_rotation_vector(&[0.0, 0.0, 0.0, 1.0], 0);
//!
//! match stream.try_recv() {
//!     Ok(HeadingEvent::Reading(reading)) => assert_eq!(reading.azimuth, 0.0),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! compass.cancel();
//! ```

use crate::filter::HeadingFilter;
use crate::sample::OrientationSample;
use crate::sensor::{ListenerId, SensorListener, SensorSubsystem, resolve_sensor};
use crate::types::{AccuracyLevel, CompassSettings, HeadingReading, SensorKind};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

pub use crossbeam_channel::{RecvError, RecvTimeoutError, TryRecvError};

/// One item of a heading stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingEvent {
    /// A filtered reading
    Reading(HeadingReading),
    /// The device has no usable rotation sensor; nothing else will follow
    NoSensor,
}

impl HeadingEvent {
    /// Host payload: `Some([azimuth, camera_azimuth, accuracy])`, or `None` for no data
    pub fn to_payload(&self) -> Option<[f64; 3]> {
        match self {
            HeadingEvent::Reading(reading) => Some(reading.to_array()),
            HeadingEvent::NoSensor => None,
        }
    }

    /// The reading, if this event carries one
    pub fn reading(&self) -> Option<&HeadingReading> {
        match self {
            HeadingEvent::Reading(reading) => Some(reading),
            HeadingEvent::NoSensor => None,
        }
    }
}

/// Receiving end of a compass subscription
///
/// Unbounded and single-consumer. Once the subscription is cancelled the
/// stream drains whatever is buffered and then reports disconnection.
#[derive(Debug)]
pub struct HeadingStream {
    events: Receiver<HeadingEvent>,
}

impl HeadingStream {
    /// Block until the next event
    pub fn recv(&self) -> Result<HeadingEvent, RecvError> {
        self.events.recv()
    }

    /// Next event if one is buffered
    pub fn try_recv(&self) -> Result<HeadingEvent, TryRecvError> {
        self.events.try_recv()
    }

    /// Block for at most `timeout` waiting for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Result<HeadingEvent, RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }

    /// Drain buffered events without blocking
    pub fn try_iter(&self) -> impl Iterator<Item = HeadingEvent> + '_ {
        self.events.try_iter()
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are buffered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl IntoIterator for HeadingStream {
    type Item = HeadingEvent;
    type IntoIter = crossbeam_channel::IntoIter<HeadingEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a HeadingStream {
    type Item = HeadingEvent;
    type IntoIter = crossbeam_channel::Iter<'a, HeadingEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Listener registered with the sensor subsystem for one subscription
struct FilterListener {
    filter: HeadingFilter,
    events: Sender<HeadingEvent>,
}

impl SensorListener for FilterListener {
    fn on_sensor_changed(&mut self, values: &[f32], timestamp_ns: u64) {
        let sample = match OrientationSample::from_rotation_vector(values) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(%e, timestamp_ns, "dropping invalid rotation sample");
                return;
            }
        };

        if let Some(reading) = self.filter.on_sample(&sample) {
            if self.events.send(HeadingEvent::Reading(reading)).is_err() {
                tracing::trace!(timestamp_ns, "heading stream dropped, reading discarded");
            }
        }
    }

    fn on_accuracy_changed(&mut self, accuracy: Option<AccuracyLevel>) {
        self.filter.on_accuracy_changed(accuracy);
    }
}

enum Subscription {
    /// Listener registered with the subsystem
    Active(ListenerId),
    /// No sensor: keeps the stream open and silent after its single event
    NoSensor(Sender<HeadingEvent>),
}

/// Compass heading source
///
/// Exactly one subscription is active at a time. Calling
/// [`listen`](Compass::listen) again cancels the previous one, and every new
/// subscription starts with a fresh filter.
pub struct Compass<S: SensorSubsystem> {
    subsystem: Arc<S>,
    settings: CompassSettings,
    sensor: Option<(SensorKind, S::Sensor)>,
    subscription: Option<Subscription>,
}

impl<S: SensorSubsystem> Compass<S> {
    /// Create a compass, resolving the primary or fallback sensor once
    pub fn new(subsystem: Arc<S>, settings: CompassSettings) -> Self {
        let sensor = resolve_sensor(subsystem.as_ref(), settings.candidates());
        match &sensor {
            Some((kind, _)) => tracing::info!(?kind, "compass sensor resolved"),
            None => tracing::warn!(
                primary = ?settings.primary,
                fallback = ?settings.fallback,
                "no rotation sensor available, compass will report no data"
            ),
        }

        Self {
            subsystem,
            settings,
            sensor,
            subscription: None,
        }
    }

    /// Start a subscription and return its stream
    ///
    /// Without a sensor the stream yields a single [`HeadingEvent::NoSensor`]
    /// and then stays silent until the subscription is cancelled.
    pub fn listen(&mut self) -> HeadingStream {
        self.cancel();

        let (events, receiver) = crossbeam_channel::unbounded();

        let subscription = match &self.sensor {
            Some((kind, sensor)) => {
                let listener = FilterListener {
                    filter: HeadingFilter::with_settings(&self.settings),
                    events,
                };
                let id = self.subsystem.register_listener(
                    sensor,
                    self.settings.delay,
                    Box::new(listener),
                );
                tracing::info!(?id, ?kind, delay = ?self.settings.delay, "compass subscription started");
                Subscription::Active(id)
            }
            None => {
                // The receiver is alive, so this send cannot fail
                let _ = events.send(HeadingEvent::NoSensor);
                Subscription::NoSensor(events)
            }
        };

        self.subscription = Some(subscription);
        HeadingStream { events: receiver }
    }

    /// Cancel the active subscription, if any
    pub fn cancel(&mut self) {
        match self.subscription.take() {
            Some(Subscription::Active(id)) => {
                self.subsystem.unregister_listener(id);
                tracing::debug!(?id, "compass subscription cancelled");
            }
            Some(Subscription::NoSensor(events)) => {
                drop(events);
                tracing::debug!("compass no-data subscription cancelled");
            }
            None => {}
        }
    }

    /// Whether a subscription is active
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Kind of the resolved sensor, `None` when the device has none
    pub fn sensor_kind(&self) -> Option<SensorKind> {
        self.sensor.as_ref().map(|(kind, _)| *kind)
    }

    /// Compass settings
    pub fn settings(&self) -> &CompassSettings {
        &self.settings
    }
}

impl<S: SensorSubsystem> Drop for Compass<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
