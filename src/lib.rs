#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! Compass Heading - compass readings from rotation-vector sensors
//!
//! This library turns the rotation samples of a device's orientation sensor
//! into compass readings. Each reading carries the heading of the device's
//! top edge, the heading its rear camera looks along, and a coarse accuracy
//! figure. A change threshold suppresses readings that only differ by noise.
//!
//! # Features
//!
//! - Rotation vector, rotation matrix and quaternion input
//! - Azimuth normalized to `[0, 360)` degrees, clockwise from north
//! - Camera azimuth through a coordinate system remap
//! - Change-threshold filtering with per-subscription state
//! - Primary/fallback sensor resolution and a push stream of readings (`std`)
//! - `#![no_std]` compatible core with the `std` feature disabled
//!
//! # Quick Start
//!
//! ```rust
//! use compass_heading::{AccuracyLevel, HeadingFilter, OrientationSample};
//!
//! let mut filter = HeadingFilter::new();
//! filter.on_accuracy_changed(Some(AccuracyLevel::High));
//!
//! // Raw rotation vector from the sensor: [x, y, z, w]
//! let sample = OrientationSample::from_rotation_vector(&[0.0, 0.0, 0.0, 1.0]).unwrap();
//!
//! if let Some(reading) = filter.on_sample(&sample) {
//!     let [azimuth, camera_azimuth, accuracy] = reading.to_array();
//!     assert_eq!(azimuth, 0.0);
//!     assert_eq!(accuracy, 15.0);
//!     # let _ = camera_azimuth;
//! }
//! ```
//!
//! With the `std` feature, [`Compass`] drives a filter from any
//! [`SensorSubsystem`] and delivers readings through a [`HeadingStream`].

pub mod error;
pub mod filter;
mod math;
pub mod remap;
mod sample;
mod types;

#[cfg(feature = "std")]
pub mod sensor;
#[cfg(feature = "std")]
pub mod simulated;
#[cfg(feature = "std")]
pub mod stream;

// Re-export all public types and functions
pub use error::{Error, SampleError};
pub use filter::{FilterState, HeadingFilter, UNKNOWN_ACCURACY, accuracy_degrees};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, RotationMatrixExt, normalize_degrees};
pub use remap::{Axis, Remap};
pub use sample::OrientationSample;
pub use types::*;

#[cfg(feature = "std")]
pub use sensor::{ListenerId, SensorListener, SensorSubsystem, resolve_sensor};
#[cfg(feature = "std")]
pub use stream::{Compass, HeadingEvent, HeadingStream};
