//! Initial candidate point seeding.
//!
//! Seeding builds a regular lattice with spacing `h0` inside the bounding
//! box, keeps the lattice points strictly inside the region (with a small
//! margin), then probabilistically thins them so the local point density
//! tracks the inverse of the sizing field. Fixed points are prepended
//! unfiltered and stay the first rows of the point set for the rest of the
//! algorithm.
//!
//! The thinning draw comes from a caller-provided RNG, so seeding is
//! reproducible from a seed.

use num_traits::Float;
use rand::Rng;

use crate::fields::{ScalarField, ensure_finite, ensure_positive_sizes};
use crate::geometry::bounding_box::BoundingBox;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::conversions::{
    CoordinateConversionError, scalar_from_f64, scalar_from_usize,
};
use crate::meshing::mesher::MeshingError;

/// Build the initial point set for the relaxation loop.
///
/// 1. Lay a regular lattice with spacing `spacing` over the bounding box
///    (`1 + floor(extent / spacing)` points per axis).
/// 2. Keep lattice points with `distance < -general_precision * spacing`
///    (strictly inside, with margin).
/// 3. For each survivor, accept it with probability
///    `(min_size / size(point))^D` against a uniform draw, thinning regions
///    that want large elements.
/// 4. Prepend `fixed_points` unconditionally.
///
/// An empty result is a legal degenerate output, not an error: callers see
/// a zero-row point set and must tolerate it.
///
/// # Errors
///
/// Returns [`MeshingError`] if a field evaluates to a non-finite value, the
/// size field returns a non-positive value, or a lattice count cannot be
/// represented in `T`.
pub fn seed_points<T, const D: usize, Fd, Fs, R>(
    distance: &Fd,
    element_size: &Fs,
    spacing: T,
    bounds: &BoundingBox<T, D>,
    fixed_points: &[Point<T, D>],
    general_precision: T,
    rng: &mut R,
) -> Result<Vec<Point<T, D>>, MeshingError>
where
    T: CoordinateScalar,
    Fd: ScalarField<T, D>,
    Fs: ScalarField<T, D>,
    R: Rng + ?Sized,
{
    let lattice = lattice_points(bounds, spacing)?;

    // Keep lattice points strictly inside the region, with margin.
    let distances = distance.values(&lattice);
    ensure_finite("distance", &distances)?;
    let cutoff = -general_precision * spacing;
    let inside: Vec<Point<T, D>> = lattice
        .into_iter()
        .zip(distances)
        .filter(|&(_, d)| d < cutoff)
        .map(|(point, _)| point)
        .collect();

    let mut points = Vec::with_capacity(fixed_points.len() + inside.len());
    points.extend_from_slice(fixed_points);

    if inside.is_empty() {
        return Ok(points);
    }

    // Thin dense lattice regions where large elements are desired: accept
    // with probability (min_size / size)^D.
    let sizes = element_size.values(&inside);
    ensure_positive_sizes(&sizes)?;
    let min_size = sizes.iter().copied().fold(T::infinity(), T::min);

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let dimension_power = D as i32;
    for (point, size) in inside.into_iter().zip(sizes) {
        let acceptance = Float::powi(min_size / size, dimension_power);
        let draw: T = scalar_from_f64(rng.random::<f64>())?;
        if draw < acceptance {
            points.push(point);
        }
    }

    Ok(points)
}

/// Enumerate the regular lattice of candidate points inside `bounds`.
fn lattice_points<T, const D: usize>(
    bounds: &BoundingBox<T, D>,
    spacing: T,
) -> Result<Vec<Point<T, D>>, MeshingError>
where
    T: CoordinateScalar,
{
    let mut counts = [0usize; D];
    for (axis, count) in counts.iter_mut().enumerate() {
        let steps = Float::floor(bounds.extent(axis) / spacing);
        *count = 1 + num_traits::cast::<T, usize>(steps).ok_or_else(|| {
            CoordinateConversionError::ConversionFailed {
                value: format!("{steps:?}"),
                target: "usize",
            }
        })?;
    }

    let total: usize = counts.iter().product();
    let mut lattice = Vec::with_capacity(total);
    let mut index = [0usize; D];
    'odometer: loop {
        let mut coords = [T::zero(); D];
        for axis in 0..D {
            let step: T = scalar_from_usize(index[axis])?;
            coords[axis] = bounds.min().coords()[axis] + spacing * step;
        }
        lattice.push(Point::new(coords));

        for axis in 0..D {
            index[axis] += 1;
            if index[axis] < counts[axis] {
                continue 'odometer;
            }
            index[axis] = 0;
        }
        break;
    }

    Ok(lattice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::hypot;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_disk(p: &Point<f64, 2>) -> f64 {
        hypot(p.coords()) - 1.0
    }

    fn uniform(_: &Point<f64, 2>) -> f64 {
        1.0
    }

    #[test]
    fn lattice_counts_match_the_spacing() {
        let bounds = BoundingBox::new([0.0, 0.0], [1.0, 0.5]).unwrap();
        let lattice = lattice_points(&bounds, 0.5).unwrap();
        // 3 points along x (0, 0.5, 1.0), 2 along y (0, 0.5).
        assert_eq!(lattice.len(), 6);
        assert!(lattice.contains(&Point::new([1.0, 0.5])));
    }

    #[test]
    fn seeded_points_lie_inside_the_region() {
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let points =
            seed_points(&unit_disk, &uniform, 0.2, &bounds, &[], 0.001, &mut rng).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(unit_disk(p) < 0.0);
        }
    }

    #[test]
    fn uniform_size_field_keeps_every_inside_point() {
        // With a constant size field the acceptance probability is exactly 1.
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(999);
        let a = seed_points(&unit_disk, &uniform, 0.3, &bounds, &[], 0.001, &mut rng_a).unwrap();
        let b = seed_points(&unit_disk, &uniform, 0.3, &bounds, &[], 0.001, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_points_come_first_and_are_unfiltered() {
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        // A fixed point far outside the disk must survive seeding untouched.
        let fixed = [Point::new([10.0, 10.0]), Point::new([0.0, 0.0])];
        let points =
            seed_points(&unit_disk, &uniform, 0.4, &bounds, &fixed, 0.001, &mut rng).unwrap();
        assert_eq!(points[0], fixed[0]);
        assert_eq!(points[1], fixed[1]);
    }

    #[test]
    fn empty_region_yields_a_degenerate_point_set() {
        // Distance field strictly positive everywhere: nothing is inside.
        let outside = |_: &Point<f64, 2>| 1.0;
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let points =
            seed_points(&outside, &uniform, 0.4, &bounds, &[], 0.001, &mut rng).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn seeding_is_deterministic_for_a_seed() {
        // Non-uniform sizing so the RNG actually participates.
        let graded = |p: &Point<f64, 2>| 0.2 + hypot(p.coords());
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        let a = seed_points(&unit_disk, &graded, 0.1, &bounds, &[], 0.001, &mut rng_a).unwrap();
        let b = seed_points(&unit_disk, &graded, 0.1, &bounds, &[], 0.001, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_distance_is_fatal() {
        let broken = |p: &Point<f64, 2>| {
            if p.coords()[0] > 0.0 {
                f64::NAN
            } else {
                -1.0
            }
        };
        let bounds = BoundingBox::symmetric(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let err =
            seed_points(&broken, &uniform, 0.5, &bounds, &[], 0.001, &mut rng).unwrap_err();
        assert!(matches!(err, MeshingError::Field(_)));
    }
}
