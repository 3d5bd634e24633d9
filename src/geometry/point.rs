//! Data and operations on d-dimensional points.
//!
//! [`Point`] is an immutable coordinate array newtype. The relaxation loop
//! never mutates a point in place; moved points are rebuilt with
//! [`Point::translated`], which keeps ownership of the live point buffer
//! explicit in the code that holds it.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::norms::hypot;

/// A point in D-dimensional space with scalar coordinates of type `T`.
///
/// Points are immutable once created; the coordinate array is private and
/// only exposed by reference or by value.
///
/// # Examples
///
/// ```
/// use distmesh::geometry::point::Point;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// assert_eq!(p.dim(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// The coordinates of the point.
    coords: [T; D],
}

impl<T, const D: usize> Point<T, D>
where
    T: CoordinateScalar,
{
    /// Create a point from a coordinate array.
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    /// Create a point with every coordinate set to `value`.
    ///
    /// Used by the iteration controller to build the `+∞` retriangulation
    /// reference that forces a triangulation on the first pass.
    #[inline]
    #[must_use]
    pub fn splat(value: T) -> Self {
        Self { coords: [value; D] }
    }

    /// Returns a reference to the point's coordinates.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Returns the coordinates by value.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [T; D] {
        self.coords
    }

    /// The spatial dimension of the point.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }

    /// Component-wise difference `self - other`, as a coordinate array.
    #[must_use]
    pub fn delta(&self, other: &Self) -> [T; D] {
        let mut out = [T::zero(); D];
        for (axis, slot) in out.iter_mut().enumerate() {
            *slot = self.coords[axis] - other.coords[axis];
        }
        out
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(&self, other: &Self) -> T {
        hypot(&self.delta(other))
    }

    /// The midpoint of the segment between two points.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        let half = T::one() / (T::one() + T::one());
        let mut coords = [T::zero(); D];
        for (axis, slot) in coords.iter_mut().enumerate() {
            *slot = (self.coords[axis] + other.coords[axis]) * half;
        }
        Self { coords }
    }

    /// A new point displaced by `scale * delta`.
    #[must_use]
    pub fn translated(&self, delta: &[T; D], scale: T) -> Self {
        let mut coords = self.coords;
        for (axis, slot) in coords.iter_mut().enumerate() {
            *slot = *slot + scale * delta[axis];
        }
        Self { coords }
    }
}

impl<T, const D: usize> Default for Point<T, D>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T, const D: usize> From<[T; D]> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn from(coords: [T; D]) -> Self {
        Self::new(coords)
    }
}

impl<T, const D: usize> From<Point<T, D>> for [T; D]
where
    T: CoordinateScalar,
{
    fn from(point: Point<T, D>) -> Self {
        point.coords
    }
}

// Serde cannot derive for [T; D] with const-generic D, so the impls are
// written out as a fixed-length tuple of coordinates.
impl<T, const D: usize> Serialize for Point<T, D>
where
    T: CoordinateScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(D)?;
        for coord in &self.coords {
            tuple.serialize_element(coord)?;
        }
        tuple.end()
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn deserialize<DE>(deserializer: DE) -> Result<Self, DE::Error>
    where
        DE: serde::Deserializer<'de>,
    {
        struct ArrayVisitor<T, const D: usize>(PhantomData<T>);

        impl<'de, T, const D: usize> Visitor<'de> for ArrayVisitor<T, D>
        where
            T: CoordinateScalar,
        {
            type Value = Point<T, D>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_fmt(format_args!("an array of {D} coordinates"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut coords = [T::zero(); D];
                for (index, slot) in coords.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(index, &self))?;
                }
                Ok(Point::new(coords))
            }
        }

        deserializer.deserialize_tuple(D, ArrayVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn construction_and_access() {
        let p = Point::new([1.0, 2.0, 3.0]);
        assert_eq!(p.coords(), &[1.0, 2.0, 3.0]);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(p.dim(), 3);
    }

    #[test]
    fn splat_fills_every_axis() {
        let inf: Point<f64, 4> = Point::splat(f64::INFINITY);
        assert!(inf.coords().iter().all(|c| c.is_infinite()));
    }

    #[test]
    fn delta_and_distance() {
        let a = Point::new([0.0, 0.0]);
        let b = Point::new([3.0, 4.0]);
        assert_eq!(b.delta(&a), [3.0, 4.0]);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn midpoint_is_symmetric() {
        let a = Point::new([0.0, 2.0]);
        let b = Point::new([2.0, 0.0]);
        assert_eq!(a.midpoint(&b), b.midpoint(&a));
        assert_eq!(a.midpoint(&b), Point::new([1.0, 1.0]));
    }

    #[test]
    fn translated_scales_the_displacement() {
        let p = Point::new([1.0, 1.0]);
        let moved = p.translated(&[2.0, -4.0], 0.5);
        assert_eq!(moved, Point::new([2.0, -1.0]));
        // The original is untouched.
        assert_eq!(p, Point::new([1.0, 1.0]));
    }

    #[test]
    fn serde_round_trip() {
        let p = Point::new([1.5, -2.5]);
        let json = serde_json_round_trip(&p);
        assert_eq!(json, p);
    }

    fn serde_json_round_trip<T, const D: usize>(p: &Point<T, D>) -> Point<T, D>
    where
        T: CoordinateScalar,
    {
        let mut buffer = Vec::new();
        {
            let mut serializer = serde_json::Serializer::new(&mut buffer);
            p.serialize(&mut serializer).unwrap();
        }
        let mut deserializer = serde_json::Deserializer::from_slice(&buffer);
        Point::deserialize(&mut deserializer).unwrap()
    }
}
