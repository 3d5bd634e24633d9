//! The relaxation driver: seeding, retriangulation control, termination.
//!
//! [`Mesher`] owns the Delaunay collaborator and the tuning constants and
//! runs the main DistMesh loop:
//!
//! 1. retriangulate when accumulated point movement since the last
//!    triangulation exceeds `retriangulation_threshold * h0` (the reference
//!    starts at `+∞`, so the first iteration always triangulates);
//! 2. one spring-force Euler step followed by boundary re-projection;
//! 3. stop when the largest per-iteration movement falls below
//!    `points_movement_threshold * h0`, or after `max_steps` iterations.
//!
//! Hitting the iteration cap is not an error: the last computed point set
//! and triangulation are returned as-is.

use num_traits::Float;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{FieldError, ScalarField};
use crate::geometry::bounding_box::{BoundingBox, BoundingBoxError};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::conversions::{CoordinateConversionError, scalar_from_f64};
use crate::meshing::edges::{Edge, unique_edges};
use crate::meshing::projection::project_to_boundary;
use crate::meshing::relaxation::apply_spring_forces;
use crate::meshing::seeding::seed_points;
use crate::meshing::settings::MeshingSettings;
use crate::triangulation::adapter::{
    Simplex, TriangulationError, Triangulator, interior_simplices,
};

/// Errors raised by the meshing entry points.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MeshingError {
    /// The initial point spacing `h0` was not a positive finite number.
    #[error("initial spacing must be positive and finite, got {value}")]
    InvalidSpacing {
        /// String rendering of the offending spacing.
        value: String,
    },
    /// An edge references a point index outside the point set.
    #[error("edge ({a}, {b}) references a point outside the {point_count}-point set")]
    EdgeOutOfBounds {
        /// Smaller endpoint index of the offending edge.
        a: usize,
        /// Larger endpoint index of the offending edge.
        b: usize,
        /// Number of points supplied.
        point_count: usize,
    },
    /// The bounding box failed validation.
    #[error(transparent)]
    BoundingBox(#[from] BoundingBoxError),
    /// A user-supplied field returned an invalid value.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The Delaunay collaborator or the interior filter failed.
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),
    /// A tuning constant could not be represented in the scalar type.
    #[error(transparent)]
    Conversion(#[from] CoordinateConversionError),
}

/// A generated mesh: the relaxed point set and the final triangulation.
///
/// Simplex vertex indices refer to `points`. The first rows of `points` are
/// the caller's fixed points, bitwise-unchanged.
// The derive's own `T: Deserialize<'de>` bound would overlap with the
// `DeserializeOwned` already carried by `CoordinateScalar`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Mesh<T, const D: usize>
where
    T: CoordinateScalar,
{
    points: Vec<Point<T, D>>,
    simplices: Vec<Simplex>,
}

impl<T, const D: usize> Mesh<T, D>
where
    T: CoordinateScalar,
{
    /// The relaxed point coordinates.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point<T, D>] {
        &self.points
    }

    /// The final simplex connectivity table.
    #[inline]
    #[must_use]
    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    /// Number of points in the mesh.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of simplices in the mesh.
    #[inline]
    #[must_use]
    pub fn simplex_count(&self) -> usize {
        self.simplices.len()
    }

    /// Whether the mesh holds no points (degenerate seeding outcome).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Decompose into the point and simplex tables.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point<T, D>>, Vec<Simplex>) {
        (self.points, self.simplices)
    }
}

/// The DistMesh relaxation driver.
///
/// # Examples
///
/// ```
/// use distmesh::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let disk = |p: &Point<f64, 2>| distmesh::geometry::hypot(p.coords()) - 1.0;
/// let uniform = |_: &Point<f64, 2>| 1.0;
/// let bounds = BoundingBox::symmetric(1.0)?;
///
/// let mesher = Mesher::new(SpadeTriangulator::new()).with_settings(MeshingSettings {
///     max_steps: 100,
///     ..MeshingSettings::default()
/// });
/// let mesh = mesher.generate(&disk, 0.4, &uniform, &bounds, &[], &mut StdRng::seed_from_u64(1))?;
/// assert!(mesh.simplex_count() > 0);
/// # Ok::<(), distmesh::meshing::MeshingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Mesher<Tr> {
    triangulator: Tr,
    settings: MeshingSettings,
}

impl<Tr> Mesher<Tr> {
    /// Create a driver around a Delaunay collaborator, with default settings.
    #[must_use]
    pub fn new(triangulator: Tr) -> Self {
        Self {
            triangulator,
            settings: MeshingSettings::default(),
        }
    }

    /// Replace the tuning constants.
    #[must_use]
    pub fn with_settings(mut self, settings: MeshingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The active tuning constants.
    #[must_use]
    pub const fn settings(&self) -> &MeshingSettings {
        &self.settings
    }

    /// Run the relaxation loop and return the generated mesh.
    ///
    /// `fixed_points` are pinned: they seed the first rows of the point set
    /// and never move. The RNG drives the probabilistic seeding thinning;
    /// pass a seeded generator for reproducible meshes.
    ///
    /// # Errors
    ///
    /// See [`MeshingError`]. Non-convergence within
    /// [`max_steps`](MeshingSettings::max_steps) is *not* an error.
    pub fn generate<T, const D: usize, Fd, Fs, R>(
        &self,
        distance: &Fd,
        initial_spacing: T,
        element_size: &Fs,
        bounding_box: &BoundingBox<T, D>,
        fixed_points: &[Point<T, D>],
        rng: &mut R,
    ) -> Result<Mesh<T, D>, MeshingError>
    where
        T: CoordinateScalar,
        Tr: Triangulator<T, D>,
        Fd: ScalarField<T, D>,
        Fs: ScalarField<T, D>,
        R: Rng + ?Sized,
    {
        if !(initial_spacing.is_finite() && initial_spacing > T::zero()) {
            return Err(MeshingError::InvalidSpacing {
                value: format!("{initial_spacing:?}"),
            });
        }

        let retriangulation_threshold: T =
            scalar_from_f64(self.settings.retriangulation_threshold)?;
        let points_movement_threshold: T =
            scalar_from_f64(self.settings.points_movement_threshold)?;
        let geometry_evaluation_threshold: T =
            scalar_from_f64(self.settings.geometry_evaluation_threshold)?;
        let delta_t: T = scalar_from_f64(self.settings.delta_t)?;
        let general_precision: T = scalar_from_f64(self.settings.general_precision)?;

        let mut points = seed_points(
            distance,
            element_size,
            initial_spacing,
            bounding_box,
            fixed_points,
            general_precision,
            rng,
        )?;
        tracing::debug!(
            point_count = points.len(),
            fixed_count = fixed_points.len(),
            "seeded initial point distribution"
        );

        if points.is_empty() {
            return Ok(Mesh {
                points,
                simplices: Vec::new(),
            });
        }

        let mut simplices: Vec<Simplex> = Vec::new();
        let mut edges: Vec<Edge> = Vec::new();
        // +∞ reference guarantees a triangulation on the very first pass.
        let mut retriangulation_reference = vec![Point::splat(T::infinity()); points.len()];

        let mut converged = false;
        for step in 0..self.settings.max_steps {
            if max_displacement(&points, &retriangulation_reference)
                > retriangulation_threshold * initial_spacing
            {
                let raw = self.triangulator.triangulate(&points)?;
                simplices = interior_simplices(
                    &points,
                    raw,
                    distance,
                    initial_spacing,
                    geometry_evaluation_threshold,
                )?;
                edges = unique_edges(&simplices);
                retriangulation_reference.clone_from(&points);
                tracing::debug!(
                    step,
                    simplex_count = simplices.len(),
                    edge_count = edges.len(),
                    "retriangulated"
                );
            }

            let stop_reference = points.clone();
            apply_spring_forces(
                &mut points,
                &edges,
                element_size,
                fixed_points.len(),
                delta_t,
            )?;
            project_to_boundary(distance, initial_spacing, &mut points)?;

            if max_displacement(&points, &stop_reference)
                < points_movement_threshold * initial_spacing
            {
                tracing::debug!(step, "relaxation converged");
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::debug!(
                max_steps = self.settings.max_steps,
                "iteration cap reached before convergence"
            );
        }

        Ok(Mesh { points, simplices })
    }
}

/// Generate a mesh with default settings.
///
/// Thin convenience wrapper over [`Mesher::generate`]; see there for the
/// parameter contracts.
///
/// # Errors
///
/// See [`MeshingError`].
pub fn generate_mesh<T, const D: usize, Fd, Fs, Tr, R>(
    distance: &Fd,
    initial_spacing: T,
    element_size: &Fs,
    bounding_box: &BoundingBox<T, D>,
    fixed_points: &[Point<T, D>],
    triangulator: &Tr,
    rng: &mut R,
) -> Result<Mesh<T, D>, MeshingError>
where
    T: CoordinateScalar,
    Fd: ScalarField<T, D>,
    Fs: ScalarField<T, D>,
    Tr: Triangulator<T, D> + ?Sized,
    R: Rng + ?Sized,
{
    Mesher::new(triangulator).generate(
        distance,
        initial_spacing,
        element_size,
        bounding_box,
        fixed_points,
        rng,
    )
}

/// Largest per-point Euclidean displacement between two snapshots.
///
/// Zero for empty point sets; `+∞` against the initial retriangulation
/// reference.
fn max_displacement<T, const D: usize>(
    current: &[Point<T, D>],
    reference: &[Point<T, D>],
) -> T
where
    T: CoordinateScalar,
{
    current
        .iter()
        .zip(reference)
        .map(|(c, r)| c.distance(r))
        .fold(T::zero(), Float::max)
}
