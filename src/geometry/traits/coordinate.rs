//! Scalar trait bounds for d-dimensional coordinates.
//!
//! The meshing pipeline is generic over the coordinate scalar so that the
//! same relaxation code runs on `f32` and `f64` point sets. All requirements
//! are consolidated into a single trait alias, [`CoordinateScalar`], which is
//! blanket-implemented for every type satisfying the bounds.

use std::fmt::Debug;

use num_traits::{Float, NumCast};
use serde::{Serialize, de::DeserializeOwned};

/// Trait alias consolidating every requirement placed on a coordinate scalar.
///
/// The bounds cover:
///
/// - `Float` + `NumCast`: generic floating-point arithmetic, machine epsilon,
///   infinities, and checked conversion from the `f64` tuning constants.
/// - `Default` + `Copy` + `Debug`: value semantics and diagnostics.
/// - `Serialize` + `DeserializeOwned`: meshes and settings round-trip through
///   serde.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::traits::coordinate::CoordinateScalar;
///
/// fn midpoint<T: CoordinateScalar>(a: T, b: T) -> T {
///     (a + b) / (T::one() + T::one())
/// }
///
/// assert_eq!(midpoint(1.0_f64, 3.0), 2.0);
/// assert_eq!(midpoint(1.0_f32, 3.0), 2.0);
/// ```
pub trait CoordinateScalar:
    Float + NumCast + Default + Copy + Debug + Serialize + DeserializeOwned + 'static
{
}

impl<T> CoordinateScalar for T where
    T: Float + NumCast + Default + Copy + Debug + Serialize + DeserializeOwned + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coordinate_scalar<T: CoordinateScalar>() {}

    #[test]
    fn standard_floats_satisfy_the_alias() {
        assert_coordinate_scalar::<f32>();
        assert_coordinate_scalar::<f64>();
    }

    #[test]
    fn float_operations_are_available_through_the_alias() {
        fn hypotenuse<T: CoordinateScalar>(a: T, b: T) -> T {
            (a * a + b * b).sqrt()
        }

        assert!((hypotenuse(3.0_f64, 4.0) - 5.0).abs() < 1e-12);
    }
}
