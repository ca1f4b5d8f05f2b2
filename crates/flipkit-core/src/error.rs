//! Error types for the core geometry crate.
//!
//! Geometry errors indicate inputs that cannot define a direction or a
//! transform that cannot be inverted. Both are terminal for the call that
//! raised them.

use thiserror::Error;

/// Errors raised by vector and matrix operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A vector with (near) zero length cannot be normalized.
    #[error("Degenerate vector ({x}, {y}, {z}) cannot be normalized")]
    DegenerateVector {
        /// X component of the offending vector.
        x: f64,
        /// Y component of the offending vector.
        y: f64,
        /// Z component of the offending vector.
        z: f64,
    },

    /// A transform matrix has no inverse.
    #[error("Singular matrix (determinant {determinant}) cannot be inverted")]
    SingularMatrix {
        /// Determinant of the matrix that failed to invert.
        determinant: f64,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::DegenerateVector {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Degenerate vector (0, 0, 0) cannot be normalized"
        );

        let err = GeometryError::SingularMatrix { determinant: 0.0 };
        assert_eq!(
            err.to_string(),
            "Singular matrix (determinant 0) cannot be inverted"
        );
    }
}
