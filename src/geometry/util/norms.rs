//! Vector norm and distance computations.
//!
//! Numerically stable norms for d-dimensional coordinate arrays. The hypot
//! implementation scales by the largest component magnitude before squaring,
//! avoiding overflow and underflow for extreme coordinates.

use num_traits::Float;

use crate::geometry::traits::coordinate::CoordinateScalar;

/// Compute the squared Euclidean norm of a coordinate array.
///
/// The sum of squares is accumulated in the scalar type `T` itself, with no
/// intermediate conversion to `f64`.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::util::squared_norm;
///
/// assert_eq!(squared_norm(&[3.0, 4.0]), 25.0);
/// assert_eq!(squared_norm(&[1.0, 2.0, 2.0]), 9.0);
/// ```
#[must_use]
pub fn squared_norm<T, const D: usize>(coords: &[T; D]) -> T
where
    T: CoordinateScalar,
{
    coords.iter().fold(T::zero(), |acc, &x| acc + x * x)
}

/// Compute the d-dimensional Euclidean norm of a coordinate array.
///
/// All components are scaled by the maximum absolute component before the
/// sum of squares is formed, so `hypot(&[1e200, 1e200])` stays finite where
/// a naive `sqrt(x² + y²)` would overflow.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::util::hypot;
///
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// assert_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0);
/// assert_eq!(hypot(&[1.0, 1.0, 1.0, 1.0]), 2.0);
/// ```
#[must_use]
pub fn hypot<T, const D: usize>(coords: &[T; D]) -> T
where
    T: CoordinateScalar,
{
    match D {
        0 => T::zero(),
        1 => Float::abs(coords[0]),
        _ => {
            let max_abs = coords
                .iter()
                .map(|&x| Float::abs(x))
                .fold(T::zero(), T::max);
            if max_abs == T::zero() {
                return T::zero();
            }
            // An infinite component dominates; scaling by it would turn the
            // norm into NaN.
            if max_abs.is_infinite() {
                return max_abs;
            }

            let sum_of_scaled_squares = coords
                .iter()
                .map(|&x| {
                    let scaled = x / max_abs;
                    scaled * scaled
                })
                .fold(T::zero(), |acc, x| acc + x);

            max_abs * Float::sqrt(sum_of_scaled_squares)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hypot_2d() {
        assert_relative_eq!(hypot(&[3.0, 4.0]), 5.0, epsilon = 1e-12);
        assert_relative_eq!(hypot(&[-3.0, 4.0]), 5.0, epsilon = 1e-12);
        assert_relative_eq!(hypot(&[0.0, 0.0]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn hypot_higher_dimensions() {
        assert_relative_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0, epsilon = 1e-12);
        assert_relative_eq!(hypot(&[1.0, 1.0, 1.0, 1.0]), 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            hypot(&[1.0, 1.0, 1.0]),
            3.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn hypot_degenerate_dimensions() {
        assert_relative_eq!(hypot::<f64, 0>(&[]), 0.0, epsilon = 1e-12);
        assert_relative_eq!(hypot(&[-5.0]), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn hypot_survives_extreme_magnitudes() {
        let large = hypot(&[1e200, 1e200]);
        assert!(large.is_finite());
        assert!(large > 1e200);

        let small = hypot(&[1e-200, 1e-200]);
        assert!(small > 0.0);
    }

    #[test]
    fn hypot_with_infinite_component_is_infinite() {
        assert!(hypot(&[f64::INFINITY, 1.0]).is_infinite());
        assert!(hypot(&[1.0, f64::NEG_INFINITY, 2.0]).is_infinite());
    }

    #[test]
    fn squared_norm_matches_hypot() {
        let coords = [1.5, -2.5, 3.5];
        assert_relative_eq!(
            squared_norm(&coords).sqrt(),
            hypot(&coords),
            epsilon = 1e-12
        );
    }
}
