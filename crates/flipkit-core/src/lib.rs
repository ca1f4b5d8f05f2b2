//! # FlipKit Core
//!
//! Core geometry types shared by the FlipKit crates.
//! Provides points and vectors backed by `nalgebra`, the homogeneous
//! [`Transform`] used for body placements, axis-aligned bounding boxes,
//! and the tolerance constants used when comparing coordinates.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod transform;

pub use constants::{DEFAULT_TOLERANCE, MATRIX_TOLERANCE};
pub use error::{GeometryError, GeometryResult};
pub use geometry::{normalize, point, vector, BoundingBox, Point3, Vector3};
pub use transform::Transform;
