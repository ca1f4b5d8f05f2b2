//! Points, vectors, and bounding boxes.
//!
//! Points and vectors are thin aliases over `nalgebra` so that dot
//! products, norms, and componentwise arithmetic come from the library.
//! The only operation wrapped here is normalization, which must fail
//! loudly on zero-length input instead of producing NaNs.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::transform::Transform;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Shorthand constructor for a [`Point3`].
pub fn point(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Shorthand constructor for a [`Vector3`].
pub fn vector(x: f64, y: f64, z: f64) -> Vector3 {
    Vector3::new(x, y, z)
}

/// Normalize `v` to unit length.
///
/// Fails with [`GeometryError::DegenerateVector`] when the length is zero
/// (or too small to divide by safely) or not finite.
pub fn normalize(v: &Vector3) -> GeometryResult<Vector3> {
    let length = v.norm();
    if !length.is_finite() || length <= f64::EPSILON {
        return Err(GeometryError::DegenerateVector {
            x: v.x,
            y: v.y,
            z: v.z,
        });
    }
    Ok(v / length)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Create a box from two opposite corners in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: point(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: point(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a box from explicit extents, `XMin, XMax, YMin, YMax, ZMin, ZMax` order.
    pub fn from_extents(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Self {
        Self::new(point(x_min, y_min, z_min), point(x_max, y_max, z_max))
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |mut bb, p| {
            bb.min = point(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z));
            bb.max = point(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z));
            bb
        }))
    }

    pub fn x_length(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn y_length(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn z_length(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Extents along X, Y and Z.
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Vertical midpoint of the box.
    pub fn mid_z(&self) -> f64 {
        (self.min.z + self.max.z) / 2.0
    }

    /// The eight corners, min corner first.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            point(lo.x, lo.y, lo.z),
            point(hi.x, lo.y, lo.z),
            point(lo.x, hi.y, lo.z),
            point(hi.x, hi.y, lo.z),
            point(lo.x, lo.y, hi.z),
            point(hi.x, lo.y, hi.z),
            point(lo.x, hi.y, hi.z),
            point(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned box around this box moved by `placement`.
    pub fn transformed(&self, placement: &Transform) -> Self {
        let moved = self.corners().map(|c| placement.apply_point(&c));
        let mut bb = Self::new(moved[0], moved[0]);
        for p in &moved[1..] {
            bb.min = point(bb.min.x.min(p.x), bb.min.y.min(p.y), bb.min.z.min(p.z));
            bb.max = point(bb.max.x.max(p.x), bb.max.y.max(p.y), bb.max.z.max(p.z));
        }
        bb
    }
}
