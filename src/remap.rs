//! Coordinate system remapping for rotation matrices
//!
//! A rotation matrix describes the device axes relative to the world. When
//! the device is used in a different posture (upright, camera facing out),
//! the axes that matter for a heading change. Remapping rewrites the matrix
//! as if the device's axes had been relabelled.
//!
//! # Example
//! ```
//! use nalgebra::Matrix3;
//! use compass_heading::{Axis, Remap};
//!
//! // New X = device X, new Y = device Z
//! let remap = Remap::new(Axis::X, Axis::Z).unwrap();
//! assert_eq!(remap, Remap::CAMERA);
//!
//! // Each row (a, b, c) becomes (a, -c, b)
//! let remapped = remap.apply(&Matrix3::identity());
//! assert_eq!(remapped, Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0));
//! ```

use crate::error::Error;
use nalgebra::Matrix3;

/// A signed device axis
///
/// The `Minus` variants select the same axis pointing the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// +X (towards the right edge)
    X,
    /// +Y (towards the top edge)
    Y,
    /// +Z (out of the screen)
    Z,
    /// -X
    MinusX,
    /// -Y
    MinusY,
    /// -Z (out of the back, where the camera looks)
    MinusZ,
}

impl Axis {
    /// Column index of the axis (0 = X, 1 = Y, 2 = Z)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X | Axis::MinusX => 0,
            Axis::Y | Axis::MinusY => 1,
            Axis::Z | Axis::MinusZ => 2,
        }
    }

    /// Whether the axis is inverted
    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, Axis::MinusX | Axis::MinusY | Axis::MinusZ)
    }
}

/// Axis relabelling applied to rotation matrices
///
/// `sources[i]` holds the input column and the sign written to output column `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remap {
    sources: [(usize, f64); 3],
}

impl Remap {
    /// No remapping: (X, Y)
    pub const IDENTITY: Remap = Remap {
        sources: [(0, 1.0), (1, 1.0), (2, 1.0)],
    };

    /// Camera posture: (X, Z)
    ///
    /// Azimuth taken from the remapped matrix is the heading the rear camera
    /// looks along.
    pub const CAMERA: Remap = Remap {
        sources: [(0, 1.0), (2, -1.0), (1, 1.0)],
    };

    /// Build a remap where the device axis `x` becomes the new X axis and the
    /// device axis `y` becomes the new Y axis
    ///
    /// The new Z axis is the remaining device axis, signed so the remapped
    /// matrix is still a proper rotation.
    ///
    /// # Errors
    /// [`Error::InvalidRemap`] when `x` and `y` share a device axis.
    pub fn new(x: Axis, y: Axis) -> Result<Self, Error> {
        let xi = x.index();
        let yi = y.index();
        if xi == yi {
            return Err(Error::InvalidRemap { x, y });
        }

        let zi = 3 - xi - yi;
        // (x, y, z) in cyclic order keeps handedness, anything else flips Z
        let cyclic = xi == (zi + 1) % 3 && yi == (zi + 2) % 3;
        let z_negative = x.is_negative() ^ y.is_negative() ^ !cyclic;

        let sign = |negative: bool| if negative { -1.0 } else { 1.0 };
        let mut sources = [(0, 1.0); 3];
        sources[xi] = (0, sign(x.is_negative()));
        sources[yi] = (1, sign(y.is_negative()));
        sources[zi] = (2, sign(z_negative));

        Ok(Self { sources })
    }

    /// Remap a rotation matrix
    #[inline]
    pub fn apply(&self, rotation: &Matrix3<f64>) -> Matrix3<f64> {
        Matrix3::from_fn(|row, column| {
            let (source, sign) = self.sources[column];
            sign * rotation[(row, source)]
        })
    }
}

impl Default for Remap {
    fn default() -> Self {
        Self::IDENTITY
    }
}
