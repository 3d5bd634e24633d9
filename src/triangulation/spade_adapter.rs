//! Built-in 2D Delaunay collaborator backed by [spade](https://docs.rs/spade).
//!
//! Only the 2D case has a bundled triangulator; higher-dimensional meshing
//! requires a caller-supplied [`Triangulator`] implementation.

use spade::{DelaunayTriangulation, Point2, Triangulation as _};

use crate::geometry::point::Point;
use crate::triangulation::adapter::{Simplex, TriangulationError, Triangulator};

/// A [`Triangulator`] for `f64` points in the plane, backed by spade's
/// incremental Delaunay triangulation.
///
/// Coincident input points are tolerated: spade collapses them onto a single
/// vertex, and every resulting simplex refers back to the *first* input index
/// that landed on that vertex.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::point::Point;
/// use distmesh::triangulation::{SpadeTriangulator, Triangulator};
///
/// let points = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
///     Point::new([1.0, 1.0]),
/// ];
/// let simplices = SpadeTriangulator::new().triangulate(&points)?;
/// assert_eq!(simplices.len(), 2); // the square splits into two triangles
/// # Ok::<(), distmesh::triangulation::TriangulationError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SpadeTriangulator;

impl SpadeTriangulator {
    /// Create a new spade-backed triangulator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Triangulator<f64, 2> for SpadeTriangulator {
    fn triangulate(&self, points: &[Point<f64, 2>]) -> Result<Vec<Simplex>, TriangulationError> {
        let mut delaunay: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();

        // spade assigns vertex slots in insertion order for fresh points and
        // returns the existing slot for coincident ones; record the first
        // input index that produced each slot.
        let mut input_index: Vec<usize> = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            let [x, y] = *point.coords();
            let handle = delaunay.insert(Point2::new(x, y)).map_err(|source| {
                TriangulationError::PointRejected {
                    index,
                    message: source.to_string(),
                }
            })?;
            if handle.index() == input_index.len() {
                input_index.push(index);
            }
        }

        let mut simplices = Vec::with_capacity(delaunay.num_inner_faces());
        for face in delaunay.inner_faces() {
            let [a, b, c] = face.vertices();
            simplices.push(Simplex::new(&[
                input_index[a.fix().index()],
                input_index[b.fix().index()],
                input_index[c.fix().index()],
            ]));
        }
        Ok(simplices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangulates_a_single_triangle() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.5, 1.0]),
        ];
        let simplices = SpadeTriangulator::new().triangulate(&points).unwrap();
        assert_eq!(simplices.len(), 1);
        let mut vertices = simplices[0].vertices().to_vec();
        vertices.sort_unstable();
        assert_eq!(vertices, vec![0, 1, 2]);
    }

    #[test]
    fn too_few_points_give_an_empty_table() {
        let points = vec![Point::new([0.0, 0.0]), Point::new([1.0, 0.0])];
        let simplices = SpadeTriangulator::new().triangulate(&points).unwrap();
        assert!(simplices.is_empty());

        let simplices = SpadeTriangulator::new().triangulate(&[]).unwrap();
        assert!(simplices.is_empty());
    }

    #[test]
    fn coincident_points_collapse_to_the_first_index() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([0.0, 0.0]), // duplicate of point 0
            Point::new([1.0, 0.0]),
            Point::new([0.5, 1.0]),
        ];
        let simplices = SpadeTriangulator::new().triangulate(&points).unwrap();
        assert_eq!(simplices.len(), 1);
        assert!(!simplices[0].vertices().contains(&1));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([f64::NAN, 0.0]),
            Point::new([1.0, 1.0]),
        ];
        let err = SpadeTriangulator::new().triangulate(&points).unwrap_err();
        assert!(matches!(
            err,
            TriangulationError::PointRejected { index: 1, .. }
        ));
    }

    #[test]
    fn convex_hull_is_fully_tessellated() {
        // A 3x3 grid: 8 triangles tile the unit square.
        let mut points = Vec::new();
        for i in 0..3 {
            for j in 0..3 {
                points.push(Point::new([f64::from(i) * 0.5, f64::from(j) * 0.5]));
            }
        }
        let simplices = SpadeTriangulator::new().triangulate(&points).unwrap();
        assert_eq!(simplices.len(), 8);
    }
}
