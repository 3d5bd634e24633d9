//! The Delaunay collaborator seam and the interior-simplex filter.
//!
//! The core algorithm treats Delaunay triangulation as a pure external
//! function: hand it the current point set, get back a simplex connectivity
//! table. The [`Triangulator`] trait is that seam. On top of it sits
//! [`interior_simplices`], which discards simplices whose centroid falls
//! outside the region. That filtering step carves concavities out of the
//! convex Delaunay hull.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::fields::{FieldError, ScalarField, ensure_finite};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::conversions::{CoordinateConversionError, scalar_from_usize};

/// Errors produced by a [`Triangulator`] or by the interior filter.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationError {
    /// The triangulator refused an input point (e.g. a NaN coordinate).
    #[error("triangulator rejected point {index}: {message}")]
    PointRejected {
        /// Index of the rejected point in the input slice.
        index: usize,
        /// Triangulator-specific diagnostic.
        message: String,
    },
    /// A simplex references a vertex index outside the input point set.
    #[error("simplex {simplex} references vertex {vertex}, but only {point_count} points exist")]
    VertexOutOfBounds {
        /// Row of the offending simplex in the connectivity table.
        simplex: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of points in the triangulated set.
        point_count: usize,
    },
    /// A simplex does not have exactly D+1 vertices.
    #[error("simplex {simplex} has {found} vertices, expected {expected}")]
    WrongSimplexSize {
        /// Row of the offending simplex in the connectivity table.
        simplex: usize,
        /// Expected vertex count (D+1).
        expected: usize,
        /// Actual vertex count.
        found: usize,
    },
    /// The distance field misbehaved while evaluating simplex centroids.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// A constant could not be represented in the scalar type.
    #[error(transparent)]
    Conversion(#[from] CoordinateConversionError),
}

/// One row of a simplex connectivity table: D+1 indices into a point set.
///
/// Indices are positional and become stale as soon as the point set is
/// regenerated or reordered; connectivity is always recomputed fresh from
/// the current points, never patched incrementally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Simplex {
    vertices: SmallVec<[usize; 8]>,
}

impl Simplex {
    /// Create a simplex from its vertex indices.
    #[must_use]
    pub fn new(vertices: &[usize]) -> Self {
        Self {
            vertices: SmallVec::from_slice(vertices),
        }
    }

    /// The vertex indices, in the order the triangulator reported them.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of vertices (D+1 for a valid D-dimensional simplex).
    #[inline]
    #[must_use]
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Whether any vertex index repeats (a collapsed simplex).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.vertices[i] == self.vertices[j] {
                    return true;
                }
            }
        }
        false
    }

    /// Iterate the vertex cycle as adjacent index pairs.
    ///
    /// A simplex with vertices `[a, b, c]` yields `(a, b)`, `(b, c)`,
    /// `(c, a)`. This is the edge enumeration the unique-edge extraction is
    /// built on; it covers all simplex sides in 2D and the canonical subset
    /// used by the classical algorithm in higher dimensions.
    pub fn vertex_cycle(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// The vertex-average centroid of this simplex within `points`.
    ///
    /// Returns `None` if any vertex index is out of bounds. The vertex
    /// average stands in for the circumcenter in the interior test, as in
    /// the classical algorithm.
    #[must_use]
    pub fn centroid<T, const D: usize>(&self, points: &[Point<T, D>]) -> Option<Point<T, D>>
    where
        T: CoordinateScalar,
    {
        let count = scalar_from_usize::<T>(self.vertices.len()).ok()?;
        let mut coords = [T::zero(); D];
        for &vertex in &self.vertices {
            let point = points.get(vertex)?;
            for (axis, slot) in coords.iter_mut().enumerate() {
                *slot = *slot + point.coords()[axis];
            }
        }
        for slot in &mut coords {
            *slot = *slot / count;
        }
        Some(Point::new(coords))
    }
}

/// The external Delaunay triangulation collaborator.
///
/// Implementations must produce a simplicial tessellation of the convex hull
/// of the input points. Behavior on degenerate or coincident points is
/// implementation-defined, but must be graceful: collapsed simplices are
/// filtered downstream rather than treated as fatal.
pub trait Triangulator<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// Triangulate `points`, returning one [`Simplex`] per tessellation cell.
    ///
    /// # Errors
    ///
    /// Returns a [`TriangulationError`] if the point set cannot be
    /// tessellated at all (e.g. non-finite coordinates).
    fn triangulate(&self, points: &[Point<T, D>]) -> Result<Vec<Simplex>, TriangulationError>;
}

impl<T, const D: usize, Tr> Triangulator<T, D> for &Tr
where
    T: CoordinateScalar,
    Tr: Triangulator<T, D> + ?Sized,
{
    fn triangulate(&self, points: &[Point<T, D>]) -> Result<Vec<Simplex>, TriangulationError> {
        (**self).triangulate(points)
    }
}

/// Filter a raw connectivity table down to simplices inside the region.
///
/// Each simplex's vertex-average centroid is evaluated against the distance
/// field; the simplex survives only when the centroid lies strictly inside
/// with margin: `d(centroid) < -geometry_evaluation_threshold * spacing`.
/// Degenerate simplices (repeated vertices) are dropped silently first.
///
/// # Errors
///
/// - [`TriangulationError::WrongSimplexSize`] if a simplex does not have
///   D+1 vertices.
/// - [`TriangulationError::VertexOutOfBounds`] if a simplex references a
///   missing point.
/// - [`TriangulationError::Field`] if the distance field returns a
///   non-finite value at a centroid.
pub fn interior_simplices<T, const D: usize, Fd>(
    points: &[Point<T, D>],
    simplices: Vec<Simplex>,
    distance: &Fd,
    spacing: T,
    geometry_evaluation_threshold: T,
) -> Result<Vec<Simplex>, TriangulationError>
where
    T: CoordinateScalar,
    Fd: ScalarField<T, D>,
{
    let mut candidates = Vec::with_capacity(simplices.len());
    for (row, simplex) in simplices.into_iter().enumerate() {
        if simplex.order() != D + 1 {
            return Err(TriangulationError::WrongSimplexSize {
                simplex: row,
                expected: D + 1,
                found: simplex.order(),
            });
        }
        if simplex.is_degenerate() {
            continue;
        }
        if let Some(&vertex) = simplex.vertices().iter().find(|&&v| v >= points.len()) {
            return Err(TriangulationError::VertexOutOfBounds {
                simplex: row,
                vertex,
                point_count: points.len(),
            });
        }
        candidates.push(simplex);
    }

    let mut centroids = Vec::with_capacity(candidates.len());
    for simplex in &candidates {
        // Vertex indices and simplex order were validated above, so the only
        // remaining failure is the D+1 count not converting into T.
        let centroid = simplex
            .centroid(points)
            .ok_or_else(|| CoordinateConversionError::ConversionFailed {
                value: format!("{}", D + 1),
                target: std::any::type_name::<T>(),
            })?;
        centroids.push(centroid);
    }
    let distances = distance.values(&centroids);
    ensure_finite("distance", &distances)?;

    let cutoff = -geometry_evaluation_threshold * spacing;
    Ok(candidates
        .into_iter()
        .zip(distances)
        .filter(|&(_, d)| d < cutoff)
        .map(|(simplex, _)| simplex)
        .collect())
}
