//! Axis-aligned bounding boxes for the initial seeding region.
//!
//! The bounding box is validated at construction: every bound must be finite
//! and every axis must have strictly positive extent. A malformed box is
//! rejected before it can reach the relaxation loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Errors raised while validating a bounding box.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoundingBoxError {
    /// A bound contained a NaN or infinite coordinate.
    #[error("non-finite bound on axis {axis}: {value}")]
    NonFiniteBound {
        /// Axis index of the offending coordinate.
        axis: usize,
        /// String rendering of the offending coordinate.
        value: String,
    },
    /// `max <= min` along some axis, so the box encloses no volume.
    #[error("empty extent on axis {axis}: min {min} is not below max {max}")]
    EmptyExtent {
        /// Axis index with the degenerate extent.
        axis: usize,
        /// String rendering of the lower bound.
        min: String,
        /// String rendering of the upper bound.
        max: String,
    },
}

/// An axis-aligned box `[min, max]^D` bounding the initial point lattice.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::bounding_box::BoundingBox;
///
/// let unit = BoundingBox::new([-1.0, -0.5], [1.0, 0.5])?;
/// assert_eq!(unit.extent(0), 2.0);
/// assert_eq!(unit.extent(1), 1.0);
/// # Ok::<(), distmesh::geometry::bounding_box::BoundingBoxError>(())
/// ```
// The derive's own `T: Deserialize<'de>` bound would overlap with the
// `DeserializeOwned` already carried by `CoordinateScalar`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct BoundingBox<T, const D: usize>
where
    T: CoordinateScalar,
{
    min: Point<T, D>,
    max: Point<T, D>,
}

impl<T, const D: usize> BoundingBox<T, D>
where
    T: CoordinateScalar,
{
    /// Create a bounding box from per-axis lower and upper bounds.
    ///
    /// # Errors
    ///
    /// - [`BoundingBoxError::NonFiniteBound`] if any coordinate is NaN or
    ///   infinite.
    /// - [`BoundingBoxError::EmptyExtent`] if `max[axis] <= min[axis]` for
    ///   some axis.
    pub fn new(min: [T; D], max: [T; D]) -> Result<Self, BoundingBoxError> {
        for axis in 0..D {
            for value in [min[axis], max[axis]] {
                if !value.is_finite() {
                    return Err(BoundingBoxError::NonFiniteBound {
                        axis,
                        value: format!("{value:?}"),
                    });
                }
            }
            if max[axis] <= min[axis] {
                return Err(BoundingBoxError::EmptyExtent {
                    axis,
                    min: format!("{:?}", min[axis]),
                    max: format!("{:?}", max[axis]),
                });
            }
        }
        Ok(Self {
            min: Point::new(min),
            max: Point::new(max),
        })
    }

    /// The symmetric box `[-half_extent, half_extent]^D`.
    ///
    /// Mirrors the classical DistMesh convenience of a `[-1, 1]^D` seeding
    /// region.
    ///
    /// # Errors
    ///
    /// Returns [`BoundingBoxError::EmptyExtent`] when `half_extent` is not
    /// strictly positive, or [`BoundingBoxError::NonFiniteBound`] when it is
    /// NaN or infinite.
    pub fn symmetric(half_extent: T) -> Result<Self, BoundingBoxError> {
        Self::new([-half_extent; D], [half_extent; D])
    }

    /// Lower corner of the box.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> &Point<T, D> {
        &self.min
    }

    /// Upper corner of the box.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> &Point<T, D> {
        &self.max
    }

    /// Extent `max - min` along one axis. Strictly positive by construction.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: usize) -> T {
        self.max.coords()[axis] - self.min.coords()[axis]
    }
}
