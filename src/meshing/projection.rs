//! Boundary re-projection of points that drifted outside the region.
//!
//! After each force step, any point with positive distance-field value is
//! pulled back toward the zero level set: the gradient is estimated by
//! forward finite differences with step `sqrt(machine-eps) * h0`, and the
//! point takes a single Newton step `p -= d·∇d / |∇d|²`. One step is an
//! approximation, not an iterated solve; points may remain slightly outside
//! and are corrected further on subsequent iterations.

use num_traits::Float;

use crate::fields::{ScalarField, ensure_finite};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::norms::squared_norm;
use crate::meshing::mesher::MeshingError;

/// Project every outside point one Newton step toward the boundary.
///
/// Points with `distance <= 0` are untouched. Points whose estimated
/// gradient is degenerate (`|∇d|² = 0`) are left in place rather than
/// divided by zero.
///
/// # Errors
///
/// Returns [`MeshingError`] if the distance field evaluates to a non-finite
/// value at a point or at one of its finite-difference perturbations.
pub fn project_to_boundary<T, const D: usize, Fd>(
    distance: &Fd,
    spacing: T,
    points: &mut [Point<T, D>],
) -> Result<(), MeshingError>
where
    T: CoordinateScalar,
    Fd: ScalarField<T, D>,
{
    if points.is_empty() {
        return Ok(());
    }

    let distances = distance.values(points);
    ensure_finite("distance", &distances)?;

    let step = Float::sqrt(T::epsilon()) * spacing;
    for (index, d) in distances.into_iter().enumerate() {
        if d <= T::zero() {
            continue;
        }

        // Forward-difference gradient estimate, one perturbed evaluation
        // per axis.
        let point = points[index];
        let mut perturbed = [point; D];
        for (axis, sample) in perturbed.iter_mut().enumerate() {
            let mut delta = [T::zero(); D];
            delta[axis] = step;
            *sample = point.translated(&delta, T::one());
        }
        let perturbed_distances = distance.values(&perturbed);
        ensure_finite("distance", &perturbed_distances)?;

        let mut gradient = [T::zero(); D];
        for (axis, slot) in gradient.iter_mut().enumerate() {
            *slot = (perturbed_distances[axis] - d) / step;
        }

        let gradient_norm_sq = squared_norm(&gradient);
        if gradient_norm_sq <= T::zero() {
            continue;
        }

        points[index] = point.translated(&gradient, -d / gradient_norm_sq);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::hypot;
    use approx::assert_relative_eq;

    fn unit_disk(p: &Point<f64, 2>) -> f64 {
        hypot(p.coords()) - 1.0
    }

    #[test]
    fn outside_point_lands_near_the_circle() {
        let mut points = vec![Point::new([2.0, 0.0])];
        project_to_boundary(&unit_disk, 0.1, &mut points).unwrap();
        assert_relative_eq!(points[0].coords()[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(points[0].coords()[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn inside_and_boundary_points_are_untouched() {
        let inside = Point::new([0.3, 0.4]);
        let on_boundary = Point::new([1.0, 0.0]);
        let mut points = vec![inside, on_boundary];
        project_to_boundary(&unit_disk, 0.1, &mut points).unwrap();
        assert_eq!(points[0], inside);
        assert_eq!(points[1], on_boundary);
    }

    #[test]
    fn projection_improves_distance_monotonically() {
        for start in [[1.5, 0.5], [1.1, -0.3], [0.9, 0.9], [3.0, 4.0]] {
            let before = unit_disk(&Point::new(start));
            assert!(before > 0.0);
            let mut points = vec![Point::new(start)];
            project_to_boundary(&unit_disk, 0.1, &mut points).unwrap();
            let after = unit_disk(&points[0]);
            assert!(
                after.abs() < before,
                "distance {after} should be closer to zero than {before}"
            );
        }
    }

    #[test]
    fn degenerate_gradient_leaves_the_point_in_place() {
        // Constant positive field: every point is "outside" but the gradient
        // vanishes, so the Newton step is skipped instead of dividing by zero.
        let flat = |_: &Point<f64, 2>| 1.0;
        let start = Point::new([0.5, 0.5]);
        let mut points = vec![start];
        project_to_boundary(&flat, 0.1, &mut points).unwrap();
        assert_eq!(points[0], start);
    }

    #[test]
    fn empty_point_set_is_tolerated() {
        let mut points: Vec<Point<f64, 2>> = Vec::new();
        project_to_boundary(&unit_disk, 0.1, &mut points).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn non_finite_distance_is_fatal() {
        let broken = |_: &Point<f64, 2>| f64::NAN;
        let mut points = vec![Point::new([0.0, 0.0])];
        let err = project_to_boundary(&broken, 0.1, &mut points).unwrap_err();
        assert!(matches!(err, MeshingError::Field(_)));
    }
}
