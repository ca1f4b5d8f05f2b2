//! Homogeneous 4x4 affine transforms.
//!
//! A [`Transform`] is a 3x3 linear part plus a translation column with the
//! bottom row fixed at `(0, 0, 0, 1)`. Composition follows matrix product
//! order: `a.compose(&b)` applies `b` first, then `a`.

use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{Point3, Vector3};

/// A 4x4 affine transform, used both for body placements and flip transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Pure translation by `offset`.
    pub fn translation(offset: &Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(offset),
        }
    }

    /// Linear transform (no translation) from a 3x3 matrix.
    pub fn from_linear(linear: &Matrix3<f64>) -> Self {
        Self {
            matrix: linear.to_homogeneous(),
        }
    }

    /// Wrap a raw matrix. The bottom row is forced to `(0, 0, 0, 1)`.
    pub fn from_matrix(mut matrix: Matrix4<f64>) -> Self {
        matrix[(3, 0)] = 0.0;
        matrix[(3, 1)] = 0.0;
        matrix[(3, 2)] = 0.0;
        matrix[(3, 3)] = 1.0;
        Self { matrix }
    }

    /// The underlying homogeneous matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The 3x3 linear part.
    pub fn linear(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column.
    pub fn translation_part(&self) -> Vector3 {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// `self * other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Inverse transform.
    ///
    /// Fails with [`GeometryError::SingularMatrix`] when the linear part is
    /// not invertible.
    pub fn inverse(&self) -> GeometryResult<Transform> {
        self.matrix
            .try_inverse()
            .map(|matrix| Transform { matrix })
            .ok_or(GeometryError::SingularMatrix {
                determinant: self.matrix.determinant(),
            })
    }

    /// Apply to a point (translation included).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }

    /// Apply to a direction (translation ignored).
    pub fn apply_vector(&self, v: &Vector3) -> Vector3 {
        self.matrix.transform_vector(v)
    }

    /// Entrywise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Transform, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.approx_eq(&Transform::identity(), tolerance)
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        self.compose(rhs)
    }
}
