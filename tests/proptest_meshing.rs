//! Property-based tests for the meshing pipeline components.
//!
//! Covered properties:
//! - unique-edge extraction is idempotent and invariant under row order and
//!   cycle-preserving vertex permutations (rotation, reversal)
//! - one boundary-projection pass strictly improves the distance of a
//!   well-conditioned outside point (2D and 3D)
//! - spring-force relaxation never moves a fixed point
//! - fan triangulations of convex polygons produce a closed, consistently
//!   oriented boundary

use distmesh::meshing::projection::project_to_boundary;
use distmesh::meshing::relaxation::apply_spring_forces;
use distmesh::prelude::*;
use proptest::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A simplex table with `order` vertices per simplex over a 40-point index
/// space. Vertex repetitions are allowed; the extractor must tolerate them.
fn simplex_table(order: usize) -> impl Strategy<Value = Vec<Simplex>> {
    prop::collection::vec(prop::collection::vec(0..40_usize, order), 1..12)
        .prop_map(|rows| rows.iter().map(|row| Simplex::new(row)).collect())
}

// =============================================================================
// EDGE EXTRACTION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn unique_edges_is_idempotent(simplices in simplex_table(3)) {
        let first = unique_edges(&simplices);
        let second = unique_edges(&simplices);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unique_edges_output_is_sorted_and_deduplicated(simplices in simplex_table(4)) {
        let edges = unique_edges(&simplices);
        prop_assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn unique_edges_ignores_row_order_and_cycle_phase(
        simplices in simplex_table(3),
        seed in any::<u64>(),
    ) {
        let baseline = unique_edges(&simplices);

        // Rotating or reversing a vertex cycle and shuffling table rows
        // leaves the undirected edge set untouched.
        let mut rng = StdRng::seed_from_u64(seed);
        let mut permuted: Vec<Simplex> = simplices
            .iter()
            .map(|simplex| {
                let mut vertices = simplex.vertices().to_vec();
                let rotation = rng.random_range(0..vertices.len());
                vertices.rotate_left(rotation);
                if rng.random::<bool>() {
                    vertices.reverse();
                }
                Simplex::new(&vertices)
            })
            .collect();
        permuted.shuffle(&mut rng);

        prop_assert_eq!(unique_edges(&permuted), baseline);
    }
}

// =============================================================================
// PROJECTION PROPERTIES (DIMENSION MACRO)
// =============================================================================

macro_rules! projection_properties {
    ($dim:literal) => {
        pastey::paste! {
            proptest! {
                /// A point outside the unit sphere moves strictly closer to
                /// the zero level set in one Newton step.
                #[test]
                fn [<projection_improves_distance_ $dim d>](
                    coords in prop::array::[<uniform $dim>](1.1..3.0_f64),
                ) {
                    let sphere = |p: &Point<f64, $dim>| hypot(p.coords()) - 1.0;
                    let start = Point::new(coords);
                    let before = sphere(&start);
                    prop_assert!(before > 0.0);

                    let mut points = vec![start];
                    project_to_boundary(&sphere, 0.1, &mut points).unwrap();
                    let after = sphere(&points[0]);
                    prop_assert!(
                        after.abs() < before,
                        "distance {} did not improve on {}",
                        after,
                        before
                    );
                }
            }
        }
    };
}

projection_properties!(2);
projection_properties!(3);

// =============================================================================
// RELAXATION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn spring_forces_never_move_fixed_points(
        coords in prop::collection::vec(prop::array::uniform2(-5.0..5.0_f64), 3..20),
        fixed_hint in 0..20_usize,
    ) {
        let uniform = |_: &Point<f64, 2>| 1.0;
        let mut points: Vec<Point<f64, 2>> =
            coords.into_iter().map(Point::new).collect();
        let fixed_count = fixed_hint.min(points.len());
        let frozen: Vec<Point<f64, 2>> = points[..fixed_count].to_vec();

        // A complete graph stresses every endpoint combination.
        let mut edges = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                edges.push(Edge::new(i, j));
            }
        }

        apply_spring_forces(&mut points, &edges, &uniform, fixed_count, 0.2).unwrap();

        // Exact positional equality for every fixed row.
        prop_assert_eq!(&points[..fixed_count], &frozen[..]);
        // And no numerical blowup anywhere.
        prop_assert!(points.iter().all(|p| p.coords().iter().all(|c| c.is_finite())));
    }
}

// =============================================================================
// BOUNDARY EXTRACTION PROPERTIES
// =============================================================================

proptest! {
    /// A fan triangulation of a regular polygon has the polygon ring as its
    /// boundary: one edge per side, ring nodes of degree two, and exactly
    /// one edge stored against the counter-clockwise orientation (the ring
    /// closure, whose canonical smaller-first order runs backwards).
    #[test]
    fn fan_polygon_boundary_is_closed_and_oriented(sides in 3..12_usize) {
        let mut nodes = vec![Point::new([0.0, 0.0])];
        for k in 0..sides {
            #[allow(clippy::cast_precision_loss)]
            let angle = 2.0 * std::f64::consts::PI * (k as f64) / (sides as f64);
            nodes.push(Point::new([angle.cos(), angle.sin()]));
        }
        let simplices: Vec<Simplex> = (0..sides)
            .map(|k| Simplex::new(&[0, 1 + k, 1 + (k + 1) % sides]))
            .collect();

        let edges = unique_edges(&simplices);
        let boundary = boundary_edges(&nodes, &simplices, Some(&edges)).unwrap();
        prop_assert_eq!(boundary.len(), sides);

        let mut degree = vec![0_usize; nodes.len()];
        for signed in &boundary {
            let edge = edges[signed.unsigned_abs()];
            degree[edge.a()] += 1;
            degree[edge.b()] += 1;
        }
        prop_assert_eq!(degree[0], 0, "the fan center is interior");
        prop_assert!(degree[1..].iter().all(|&d| d == 2));

        let reversed = boundary.iter().filter(|signed| **signed < 0).count();
        prop_assert_eq!(reversed, 1);
    }
}
