//! Boundary edge extraction from a final triangulation.
//!
//! An edge belonging to exactly one simplex lies on the mesh boundary.
//! Detection runs on global edge indices: every simplex maps its vertex
//! cycle onto the unique edge list, occurrences are counted in
//! first-encounter order, and edges seen exactly once survive. In 2D each
//! boundary edge is additionally oriented against the interior of its one
//! containing simplex, and a reversed edge is flagged by negating its
//! stored index.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::meshing::edges::{Edge, unique_edges};
use crate::triangulation::adapter::Simplex;

/// Errors raised during boundary edge extraction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoundaryError {
    /// A simplex side is missing from the supplied edge list.
    #[error("edge ({a}, {b}) of simplex {simplex} is not in the supplied edge list")]
    UnknownEdge {
        /// Row of the simplex whose side could not be resolved.
        simplex: usize,
        /// Smaller endpoint of the unresolved edge.
        a: usize,
        /// Larger endpoint of the unresolved edge.
        b: usize,
    },
    /// A simplex references a node index outside the node table.
    #[error("vertex {vertex} is out of bounds for {node_count} nodes")]
    NodeOutOfBounds {
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of nodes supplied.
        node_count: usize,
    },
    /// An edge index is too large to sign-encode.
    #[error("edge index {index} cannot be sign-encoded as isize")]
    IndexOverflow {
        /// The unencodable edge index.
        index: usize,
    },
}

/// Extract the signed boundary edge indices of a triangulation.
///
/// Returns indices into the unique edge list (the supplied `edges`, or the
/// list re-derived via [`unique_edges`] when `None`), in first-occurrence
/// order. An edge qualifies when it belongs to exactly one simplex; edges
/// shared by two or more simplices are interior.
///
/// In 2D the node order of each boundary edge is checked against the
/// outward orientation of its containing simplex: if the cross product of
/// the edge vector with the vector to the simplex's remaining vertex is
/// negative, the edge is flagged as reversed by negating its index. Higher
/// dimensions carry no orientation information.
///
/// Note: an edge stored at index 0 cannot encode reversal (`-0 == 0`); this
/// sign convention is inherited from the classical algorithm.
///
/// # Errors
///
/// - [`BoundaryError::UnknownEdge`] if a supplied edge list does not cover
///   every simplex side.
/// - [`BoundaryError::NodeOutOfBounds`] if the triangulation references a
///   node missing from `nodes` (2D orientation only).
///
/// # Examples
///
/// ```
/// use distmesh::meshing::boundary::boundary_edges;
/// use distmesh::geometry::point::Point;
/// use distmesh::triangulation::Simplex;
///
/// // A single counter-clockwise triangle: all three edges are boundary.
/// let nodes = vec![
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let simplices = vec![Simplex::new(&[0, 1, 2])];
/// let boundary = boundary_edges(&nodes, &simplices, None)?;
/// assert_eq!(boundary.len(), 3);
/// # Ok::<(), distmesh::meshing::boundary::BoundaryError>(())
/// ```
pub fn boundary_edges<T, const D: usize>(
    nodes: &[Point<T, D>],
    simplices: &[Simplex],
    edges: Option<&[Edge]>,
) -> Result<Vec<isize>, BoundaryError>
where
    T: CoordinateScalar,
{
    let derived;
    let edges: &[Edge] = match edges {
        Some(list) => list,
        None => {
            derived = unique_edges(simplices);
            &derived
        }
    };

    let index_of: FxHashMap<Edge, usize> = edges
        .iter()
        .enumerate()
        .map(|(index, &edge)| (edge, index))
        .collect();

    // Resolve every simplex side to its global edge index, counting
    // occurrences in first-encounter order.
    let mut slot_table: Vec<SmallVec<[usize; 8]>> = Vec::with_capacity(simplices.len());
    let mut occurrences: FxHashMap<usize, usize> = FxHashMap::default();
    let mut first_seen: Vec<usize> = Vec::new();
    for (row, simplex) in simplices.iter().enumerate() {
        let mut slots = SmallVec::new();
        for (i, j) in simplex.vertex_cycle() {
            let edge = Edge::new(i, j);
            let index = *index_of.get(&edge).ok_or(BoundaryError::UnknownEdge {
                simplex: row,
                a: edge.a(),
                b: edge.b(),
            })?;
            let count = occurrences.entry(index).or_insert(0);
            if *count == 0 {
                first_seen.push(index);
            }
            *count += 1;
            slots.push(index);
        }
        slot_table.push(slots);
    }

    let mut boundary = Vec::new();
    for index in first_seen {
        if occurrences[&index] != 1 {
            continue;
        }
        let signed =
            isize::try_from(index).map_err(|_| BoundaryError::IndexOverflow { index })?;
        boundary.push(signed);
    }

    // 2D-only orientation fix; higher dimensions keep raw indices.
    if D == 2 {
        for signed in &mut boundary {
            #[allow(clippy::cast_sign_loss)]
            let index = *signed as usize;
            let edge = edges[index];

            // Exactly one simplex contains a boundary edge.
            let row = slot_table
                .iter()
                .position(|slots| slots.contains(&index))
                .ok_or(BoundaryError::UnknownEdge {
                    simplex: 0,
                    a: edge.a(),
                    b: edge.b(),
                })?;
            let opposite = simplices[row]
                .vertices()
                .iter()
                .copied()
                .find(|&v| !edge.contains(v))
                .ok_or(BoundaryError::UnknownEdge {
                    simplex: row,
                    a: edge.a(),
                    b: edge.b(),
                })?;

            let fetch = |vertex: usize| {
                nodes.get(vertex).ok_or(BoundaryError::NodeOutOfBounds {
                    vertex,
                    node_count: nodes.len(),
                })
            };
            let first = fetch(edge.a())?;
            let second = fetch(edge.b())?;
            let third = fetch(opposite)?;

            let v1 = second.delta(first);
            let v2 = third.delta(second);
            let cross = v1[0] * v2[1] - v1[1] * v2[0];
            if cross < T::zero() {
                *signed = -*signed;
            }
        }
    }

    Ok(boundary)
}
