//! # distmesh
//!
//! Unstructured simplex mesh generation (triangles in 2D, tetrahedra and
//! higher simplices in d dimensions) over geometry described implicitly by a
//! signed-distance field, with element sizes governed by a user-supplied
//! sizing field. The algorithm is the iterative point relaxation of
//! Persson & Strang's DistMesh: seed candidate points, maintain Delaunay
//! connectivity, relax the points under edge spring forces, and project
//! stray points back onto the zero level set of the distance field.
//!
//! # Design
//!
//! - **Dimension-generic**: all core routines are parameterized over a
//!   compile-time dimension `const D: usize` and a scalar type
//!   `T: CoordinateScalar` (`f32`, `f64`, ...). The 2D-only boundary edge
//!   orientation fix is an explicit `D == 2` branch.
//! - **Delaunay as a collaborator**: the triangulation routine itself is
//!   behind the [`Triangulator`](triangulation::Triangulator) trait. A
//!   built-in 2D implementation backed by [spade](https://docs.rs/spade) is
//!   provided as [`SpadeTriangulator`](triangulation::SpadeTriangulator);
//!   higher dimensions accept any caller-supplied tessellator.
//! - **Explicit randomness**: the probabilistic thinning in the point seeder
//!   draws from a caller-provided [`rand::Rng`], so meshing runs are
//!   reproducible from a seed.
//!
//! # Basic usage
//!
//! ```rust
//! use distmesh::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Signed distance to the unit disk: negative inside, zero on the circle.
//! let disk = |p: &Point<f64, 2>| distmesh::geometry::hypot(p.coords()) - 1.0;
//! // Uniform desired element size (only relative magnitudes matter).
//! let uniform = |_: &Point<f64, 2>| 1.0;
//!
//! let bounds = BoundingBox::symmetric(1.0)?;
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let mesh = generate_mesh(
//!     &disk,
//!     0.4,
//!     &uniform,
//!     &bounds,
//!     &[],
//!     &SpadeTriangulator::new(),
//!     &mut rng,
//! )?;
//!
//! assert!(!mesh.is_empty());
//! # Ok::<(), distmesh::meshing::MeshingError>(())
//! ```
//!
//! # Boundary extraction
//!
//! After relaxation, [`boundary_edges`](meshing::boundary_edges) returns the
//! edges belonging to exactly one simplex, sign-encoded in 2D so that a
//! negative index marks an edge whose stored node order runs against the
//! outward orientation.

#![forbid(unsafe_code)]

/// Geometric foundations: points, scalar traits, norms, bounding boxes.
pub mod geometry {
    pub mod bounding_box;
    pub mod point;
    pub mod util;

    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }

    pub use bounding_box::*;
    pub use point::*;
    pub use traits::*;
    pub use util::*;
}

/// User-supplied scalar field contracts (distance and element size).
pub mod fields;

/// The Delaunay collaborator seam and the interior-simplex filter.
pub mod triangulation {
    pub mod adapter;
    pub mod spade_adapter;

    pub use adapter::*;
    pub use spade_adapter::*;
}

/// The DistMesh relaxation pipeline and its post-processing utilities.
pub mod meshing {
    pub mod boundary;
    pub mod edges;
    pub mod mesher;
    pub mod projection;
    pub mod relaxation;
    pub mod seeding;
    pub mod settings;

    pub use boundary::*;
    pub use edges::*;
    pub use mesher::*;
    pub use projection::*;
    pub use relaxation::*;
    pub use seeding::*;
    pub use settings::*;
}

/// Convenience re-exports of the public surface.
pub mod prelude {
    pub use crate::fields::{FieldError, ScalarField};
    pub use crate::geometry::bounding_box::{BoundingBox, BoundingBoxError};
    pub use crate::geometry::point::Point;
    pub use crate::geometry::traits::coordinate::CoordinateScalar;
    pub use crate::geometry::util::{hypot, squared_norm};
    pub use crate::meshing::boundary::{BoundaryError, boundary_edges};
    pub use crate::meshing::edges::{Edge, unique_edges};
    pub use crate::meshing::mesher::{Mesh, Mesher, MeshingError, generate_mesh};
    pub use crate::meshing::settings::MeshingSettings;
    pub use crate::triangulation::adapter::{Simplex, TriangulationError, Triangulator};
    pub use crate::triangulation::spade_adapter::SpadeTriangulator;
}
