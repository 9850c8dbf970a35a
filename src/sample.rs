//! Orientation samples delivered by rotation sensors

use crate::error::{Error, SampleError};
use crate::math::RotationMatrixExt;
use nalgebra::{ComplexField, Matrix3, Rotation3, UnitQuaternion};

/// Device orientation at one instant
///
/// Wraps a rotation matrix mapping device coordinates into the world frame
/// (X east, Y north, Z up). Samples built from raw sensor data are checked
/// for finite values; degenerate but finite input is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    rotation: Matrix3<f64>,
    heading_accuracy: Option<f64>,
}

impl OrientationSample {
    /// Build a sample from a raw rotation vector `[x, y, z, (w), (heading accuracy)]`
    ///
    /// `x`, `y`, `z` are the vector part of the unit quaternion. When `w` is
    /// missing it is recovered from the unit norm. A fifth component, the
    /// estimated heading accuracy in radians, is kept as metadata.
    ///
    /// # Errors
    /// [`SampleError::ComponentCount`] for fewer than 3 or more than 5
    /// components, [`SampleError::NonFinite`] for NaN or infinite values.
    ///
    /// # Example
    /// ```
    /// use compass_heading::OrientationSample;
    ///
    /// // Device lying flat, top edge pointing north
    /// let sample = OrientationSample::from_rotation_vector(&[0.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(sample.azimuth_degrees(), 0.0);
    /// ```
    pub fn from_rotation_vector(values: &[f32]) -> Result<Self, Error> {
        if !(3..=5).contains(&values.len()) {
            return Err(SampleError::ComponentCount { len: values.len() }.into());
        }
        check_finite(values.iter().map(|&v| f64::from(v)))?;

        let x = f64::from(values[0]);
        let y = f64::from(values[1]);
        let z = f64::from(values[2]);
        let w = match values.get(3) {
            Some(&w) => f64::from(w),
            None => {
                let w_squared = 1.0 - x * x - y * y - z * z;
                if w_squared > 0.0 { ComplexField::sqrt(w_squared) } else { 0.0 }
            }
        };

        // Quaternion is not renormalized, matching the platform conversion
        let (xx, yy, zz) = (2.0 * x * x, 2.0 * y * y, 2.0 * z * z);
        let (xy, xz, yz) = (2.0 * x * y, 2.0 * x * z, 2.0 * y * z);
        let (xw, yw, zw) = (2.0 * x * w, 2.0 * y * w, 2.0 * z * w);

        #[rustfmt::skip]
        let rotation = Matrix3::new(
            1.0 - yy - zz, xy - zw, xz + yw,
            xy + zw, 1.0 - xx - zz, yz - xw,
            xz - yw, yz + xw, 1.0 - xx - yy,
        );

        Ok(Self {
            rotation,
            heading_accuracy: values.get(4).map(|&a| f64::from(a)),
        })
    }

    /// Build a sample from 9 row-major rotation matrix elements
    ///
    /// # Errors
    /// [`SampleError::MatrixLength`] unless exactly 9 values are given,
    /// [`SampleError::NonFinite`] for NaN or infinite values.
    pub fn from_row_slice(values: &[f64]) -> Result<Self, Error> {
        if values.len() != 9 {
            return Err(SampleError::MatrixLength { len: values.len() }.into());
        }
        check_finite(values.iter().copied())?;
        Ok(Self::from_matrix(Matrix3::from_row_slice(values)))
    }

    /// Wrap a rotation matrix without validation
    pub fn from_matrix(rotation: Matrix3<f64>) -> Self {
        Self {
            rotation,
            heading_accuracy: None,
        }
    }

    /// Rotation matrix mapping device coordinates into the world frame
    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// Estimated heading accuracy in radians, when the sensor reports one
    pub fn heading_accuracy(&self) -> Option<f64> {
        self.heading_accuracy
    }

    /// Unfiltered device azimuth in degrees within `[0, 360)`
    pub fn azimuth_degrees(&self) -> f64 {
        self.rotation.azimuth_degrees()
    }
}

impl From<Matrix3<f64>> for OrientationSample {
    fn from(rotation: Matrix3<f64>) -> Self {
        Self::from_matrix(rotation)
    }
}

impl From<Rotation3<f64>> for OrientationSample {
    fn from(rotation: Rotation3<f64>) -> Self {
        Self::from_matrix(rotation.into_inner())
    }
}

impl From<UnitQuaternion<f64>> for OrientationSample {
    fn from(quaternion: UnitQuaternion<f64>) -> Self {
        Self::from_matrix(quaternion.to_rotation_matrix().into_inner())
    }
}

fn check_finite(values: impl Iterator<Item = f64>) -> Result<(), SampleError> {
    for (index, value) in values.enumerate() {
        if !value.is_finite() {
            return Err(SampleError::NonFinite { index });
        }
    }
    Ok(())
}
