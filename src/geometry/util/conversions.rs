//! Checked conversions between `f64` tuning constants and generic scalars.
//!
//! The relaxation thresholds and force-model constants are specified as
//! `f64` values in [`MeshingSettings`](crate::meshing::settings::MeshingSettings)
//! but the pipeline runs in a generic scalar `T`. Conversion happens once per
//! meshing run through these helpers, which surface an error instead of
//! silently truncating.

use num_traits::cast;
use thiserror::Error;

use crate::geometry::traits::coordinate::CoordinateScalar;

/// Errors that can occur when converting tuning constants to the coordinate
/// scalar type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoordinateConversionError {
    /// The `f64` value has no representation in the target scalar type.
    #[error("failed to convert {value} from f64 to {target}")]
    ConversionFailed {
        /// String rendering of the value that failed to convert.
        value: String,
        /// Target type name.
        target: &'static str,
    },
}

/// Convert an `f64` constant to the coordinate scalar type `T`.
///
/// # Errors
///
/// Returns [`CoordinateConversionError::ConversionFailed`] if `NumCast`
/// cannot represent `value` in `T` (e.g. an out-of-range `f64` cast to a
/// narrower float type).
///
/// # Examples
///
/// ```
/// use distmesh::geometry::util::scalar_from_f64;
///
/// let x: f32 = scalar_from_f64(0.25).unwrap();
/// assert_eq!(x, 0.25_f32);
/// ```
pub fn scalar_from_f64<T>(value: f64) -> Result<T, CoordinateConversionError>
where
    T: CoordinateScalar,
{
    cast::<f64, T>(value).ok_or_else(|| CoordinateConversionError::ConversionFailed {
        value: format!("{value}"),
        target: std::any::type_name::<T>(),
    })
}

/// Convert a `usize` count (typically the dimension `D`) to the scalar type.
///
/// # Errors
///
/// Returns [`CoordinateConversionError::ConversionFailed`] if the count is
/// not exactly representable in `T`. Dimensions are tiny, so this only fires
/// for exotic scalar types.
pub fn scalar_from_usize<T>(value: usize) -> Result<T, CoordinateConversionError>
where
    T: CoordinateScalar,
{
    cast::<usize, T>(value).ok_or_else(|| CoordinateConversionError::ConversionFailed {
        value: format!("{value}"),
        target: std::any::type_name::<T>(),
    })
}
