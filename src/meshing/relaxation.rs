//! Edge spring-force relaxation.
//!
//! Each unique edge acts as a repulsion-only spring: edges shorter than
//! their locally desired length push their endpoints apart, edges at or
//! above it exert nothing. The desired length combines the sizing field at
//! the edge midpoint, a global scale factor conserving total "material"
//! volume, and an empirical overshoot that produces well-proportioned
//! simplices. Positions advance by one explicit Euler step per call; fixed
//! points (indices below `fixed_count`) never move.

use num_traits::Float;

use crate::fields::{ScalarField, ensure_positive_sizes};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::conversions::{scalar_from_f64, scalar_from_usize};
use crate::geometry::util::norms::hypot;
use crate::meshing::edges::Edge;
use crate::meshing::mesher::MeshingError;

/// Advance the point set by one spring-force Euler step.
///
/// For every edge `(i, j)` with edge vector `v = p_i - p_j` and length `l`:
///
/// - the desired length is `size(midpoint) * overshoot * scale`, where
///   `scale = (Σ l^D / Σ size^D)^(1/D)` over all edges and
///   `overshoot = 1 + 0.4 / 2^(D-1)`;
/// - the scalar force is `max(desired - l, 0)`;
/// - `p_i` moves by `+Δt·(force/l)·v` and `p_j` by the opposite, each only
///   when its index is `>= fixed_count`.
///
/// Zero-length edges (coincident endpoints) carry no force. An empty edge
/// list is a no-op.
///
/// # Errors
///
/// Returns [`MeshingError`] if an edge references a point index outside
/// `points`, the sizing field returns a non-finite or non-positive value at
/// an edge midpoint, or a force-model constant cannot be represented in `T`.
pub fn apply_spring_forces<T, const D: usize, Fs>(
    points: &mut [Point<T, D>],
    edges: &[Edge],
    element_size: &Fs,
    fixed_count: usize,
    delta_t: T,
) -> Result<(), MeshingError>
where
    T: CoordinateScalar,
    Fs: ScalarField<T, D>,
{
    if edges.is_empty() {
        return Ok(());
    }

    // Edges store the larger endpoint in `b`, so one comparison per edge
    // covers both.
    if let Some(edge) = edges.iter().find(|edge| edge.b() >= points.len()) {
        return Err(MeshingError::EdgeOutOfBounds {
            a: edge.a(),
            b: edge.b(),
            point_count: points.len(),
        });
    }

    let midpoints: Vec<Point<T, D>> = edges
        .iter()
        .map(|edge| points[edge.a()].midpoint(&points[edge.b()]))
        .collect();
    let sizes = element_size.values(&midpoints);
    ensure_positive_sizes(&sizes)?;

    let vectors: Vec<[T; D]> = edges
        .iter()
        .map(|edge| points[edge.a()].delta(&points[edge.b()]))
        .collect();
    let lengths: Vec<T> = vectors.iter().map(hypot).collect();

    // Global scale conserving Σ length^D across the mesh, so the sizing
    // field only has to be correct up to a constant factor.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let dimension_power = D as i32;
    let length_volume = lengths
        .iter()
        .fold(T::zero(), |acc, &l| acc + Float::powi(l, dimension_power));
    let size_volume = sizes
        .iter()
        .fold(T::zero(), |acc, &s| acc + Float::powi(s, dimension_power));
    let dimension: T = scalar_from_usize(D)?;
    let scale = Float::powf(length_volume / size_volume, T::one() / dimension);

    let overshoot: T = scalar_from_f64(1.0 + 0.4 / f64::powi(2.0, dimension_power - 1))?;

    for ((edge, vector), (&length, &size)) in edges
        .iter()
        .zip(&vectors)
        .zip(lengths.iter().zip(&sizes))
    {
        if length <= T::zero() {
            continue;
        }
        let desired = size * overshoot * scale;
        let force = T::max(desired - length, T::zero());
        if force <= T::zero() {
            continue;
        }
        let step = delta_t * force / length;
        if edge.a() >= fixed_count {
            points[edge.a()] = points[edge.a()].translated(vector, step);
        }
        if edge.b() >= fixed_count {
            points[edge.b()] = points[edge.b()].translated(vector, -step);
        }
    }

    Ok(())
}
