//! Tunable constants of the relaxation loop.
//!
//! All thresholds are fractions of the initial point spacing `h0`. The
//! defaults reproduce the classical DistMesh constants. Callers with stiff
//! sizing fields typically only need to raise
//! [`max_steps`](MeshingSettings::max_steps).

use serde::{Deserialize, Serialize};

/// Configuration for a meshing run.
///
/// # Examples
///
/// ```
/// use distmesh::meshing::settings::MeshingSettings;
///
/// let settings = MeshingSettings {
///     max_steps: 200,
///     ..MeshingSettings::default()
/// };
/// assert_eq!(settings.delta_t, 0.2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshingSettings {
    /// Hard cap on relaxation iterations. Hitting the cap is not an error;
    /// the state at the final step is returned as-is.
    pub max_steps: u32,
    /// Fraction of `h0` of accumulated point movement that triggers a fresh
    /// Delaunay triangulation.
    pub retriangulation_threshold: f64,
    /// Fraction of `h0` below which the maximum per-iteration point movement
    /// counts as convergence.
    pub points_movement_threshold: f64,
    /// Fraction of `h0` used as the margin when rejecting simplices whose
    /// centroid lies outside the region (concavity carving).
    pub geometry_evaluation_threshold: f64,
    /// Explicit Euler step size for the force integration.
    pub delta_t: f64,
    /// Fraction of `h0` used as the strictly-inside margin when filtering
    /// seeded lattice points.
    pub general_precision: f64,
}

impl Default for MeshingSettings {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            retriangulation_threshold: 0.1,
            points_movement_threshold: 0.001,
            geometry_evaluation_threshold: 0.001,
            delta_t: 0.2,
            general_precision: 0.001,
        }
    }
}
