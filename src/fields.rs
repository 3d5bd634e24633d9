//! User-supplied scalar field contracts.
//!
//! The mesh generator consumes two external fields: a signed-distance field
//! (negative inside the region, zero on the boundary, positive outside) and
//! an element-size field (strictly positive, only relative magnitudes
//! matter). Both are batch evaluations over point slices so implementations
//! are free to vectorize or parallelize internally; the pipeline only relies
//! on them being pure.
//!
//! Any closure `Fn(&Point<T, D>) -> T` is a [`ScalarField`] through the
//! blanket implementation, evaluated point by point.

use thiserror::Error;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Faults detected in the values returned by a user-supplied field.
///
/// These are fatal: there is no meaningful way to continue relaxation with
/// invalid geometry, so the faults propagate straight out of the meshing
/// entry points.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A field returned NaN or an infinity.
    #[error("{field} field returned a non-finite value {value} for point {index}")]
    NonFiniteValue {
        /// Which field misbehaved (`"distance"` or `"element size"`).
        field: &'static str,
        /// Index of the evaluated point within the batch.
        index: usize,
        /// String rendering of the offending value.
        value: String,
    },
    /// The element-size field returned a value that is not strictly positive.
    #[error("element size field returned non-positive value {value} for point {index}")]
    NonPositiveSize {
        /// Index of the evaluated point within the batch.
        index: usize,
        /// String rendering of the offending value.
        value: String,
    },
}

/// A scalar field evaluated over a batch of points.
///
/// Implementations must be pure: the relaxation loop re-evaluates fields at
/// perturbed and interpolated points every iteration and assumes two calls
/// with the same input agree.
///
/// # Examples
///
/// ```
/// use distmesh::fields::ScalarField;
/// use distmesh::geometry::point::Point;
/// use distmesh::geometry::util::hypot;
///
/// // Signed distance to the unit circle, as a plain closure.
/// let disk = |p: &Point<f64, 2>| hypot(p.coords()) - 1.0;
///
/// let values = disk.values(&[Point::new([0.0, 0.0]), Point::new([2.0, 0.0])]);
/// assert_eq!(values, vec![-1.0, 1.0]);
/// ```
pub trait ScalarField<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// Evaluate the field at every point of the batch, in order.
    fn values(&self, points: &[Point<T, D>]) -> Vec<T>;
}

impl<T, const D: usize, F> ScalarField<T, D> for F
where
    T: CoordinateScalar,
    F: Fn(&Point<T, D>) -> T,
{
    fn values(&self, points: &[Point<T, D>]) -> Vec<T> {
        points.iter().map(self).collect()
    }
}

/// Reject NaN/infinite field output, attributing the fault to `field`.
pub(crate) fn ensure_finite<T>(field: &'static str, values: &[T]) -> Result<(), FieldError>
where
    T: CoordinateScalar,
{
    for (index, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(FieldError::NonFiniteValue {
                field,
                index,
                value: format!("{value:?}"),
            });
        }
    }
    Ok(())
}

/// Reject element sizes that are non-finite or not strictly positive.
pub(crate) fn ensure_positive_sizes<T>(values: &[T]) -> Result<(), FieldError>
where
    T: CoordinateScalar,
{
    ensure_finite("element size", values)?;
    for (index, value) in values.iter().enumerate() {
        if *value <= T::zero() {
            return Err(FieldError::NonPositiveSize {
                index,
                value: format!("{value:?}"),
            });
        }
    }
    Ok(())
}
