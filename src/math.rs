//! Angle utilities and nalgebra extensions for the compass heading library

use nalgebra::{ComplexField, Matrix3, RealField, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Normalize an angle in degrees into `[0, 360)`
///
/// Accepts angles produced by `atan2`, i.e. within `[-180, 180]`.
///
/// # Example
/// ```
/// use compass_heading::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-30.0), 330.0);
/// assert_eq!(normalize_degrees(180.0), 180.0);
/// ```
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = (degrees + 360.0) % 360.0;
    // -0.0 stays -0.0 through the modulo
    if normalized == 0.0 { 0.0 } else { normalized }
}

/// Extension trait for rotation matrices
///
/// The matrix maps device coordinates into the world frame (X east,
/// Y north, Z up): its columns are the device axes expressed in world
/// coordinates.
pub trait RotationMatrixExt {
    /// Orientation angles `(azimuth, pitch, roll)` in radians
    ///
    /// Azimuth is the rotation about -Z, so it grows clockwise when viewed
    /// from above, with zero when the device's +Y axis points north.
    fn orientation_angles(&self) -> Vector3<f64>;

    /// Azimuth in degrees within `[0, 360)`
    fn azimuth_degrees(&self) -> f64;
}

impl RotationMatrixExt for Matrix3<f64> {
    fn orientation_angles(&self) -> Vector3<f64> {
        let azimuth = RealField::atan2(self[(0, 1)], self[(1, 1)]);
        // Rounding can push the element just outside [-1, 1]
        let pitch = ComplexField::asin((-self[(2, 1)]).clamp(-1.0, 1.0));
        let roll = RealField::atan2(-self[(2, 0)], self[(2, 2)]);
        Vector3::new(azimuth, pitch, roll)
    }

    fn azimuth_degrees(&self) -> f64 {
        normalize_degrees(self.orientation_angles().x * RAD_TO_DEG)
    }
}
