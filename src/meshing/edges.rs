//! Unique undirected edge ("bar") extraction from a simplex table.
//!
//! Edges are canonically stored smaller-index-first and deduplicated through
//! a total lexicographic order, so extraction is a pure function: the same
//! simplex table always yields the same sorted edge list, independent of row
//! order or within-simplex vertex order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::triangulation::adapter::Simplex;

/// An unordered pair of point indices, stored with the smaller index first.
///
/// # Examples
///
/// ```
/// use distmesh::meshing::edges::Edge;
///
/// assert_eq!(Edge::new(7, 2), Edge::new(2, 7));
/// assert_eq!(Edge::new(7, 2).endpoints(), (2, 7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    a: usize,
    b: usize,
}

impl Edge {
    /// Create a canonical edge from two point indices, in either order.
    #[must_use]
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }

    /// The smaller endpoint index.
    #[inline]
    #[must_use]
    pub const fn a(&self) -> usize {
        self.a
    }

    /// The larger endpoint index.
    #[inline]
    #[must_use]
    pub const fn b(&self) -> usize {
        self.b
    }

    /// Both endpoints as `(smaller, larger)`.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Whether `vertex` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn contains(&self, vertex: usize) -> bool {
        self.a == vertex || self.b == vertex
    }
}

/// Extract the sorted, unique edge list of a simplex table.
///
/// Every simplex contributes the adjacent pairs of its vertex cycle
/// (`D+1` edges per simplex); duplicates across simplices collapse to a
/// single entry. The result is sorted lexicographically by
/// `(smaller, larger)` endpoint.
///
/// # Examples
///
/// ```
/// use distmesh::meshing::edges::{Edge, unique_edges};
/// use distmesh::triangulation::Simplex;
///
/// // Two triangles sharing the edge (1, 2).
/// let simplices = vec![Simplex::new(&[0, 1, 2]), Simplex::new(&[2, 1, 3])];
/// let edges = unique_edges(&simplices);
/// assert_eq!(
///     edges,
///     vec![
///         Edge::new(0, 1),
///         Edge::new(0, 2),
///         Edge::new(1, 2),
///         Edge::new(1, 3),
///         Edge::new(2, 3),
///     ]
/// );
/// ```
#[must_use]
pub fn unique_edges(simplices: &[Simplex]) -> Vec<Edge> {
    let set: BTreeSet<Edge> = simplices
        .iter()
        .flat_map(|simplex| simplex.vertex_cycle().map(|(i, j)| Edge::new(i, j)))
        .collect();
    set.into_iter().collect()
}
