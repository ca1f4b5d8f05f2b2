//! Flip axis representation and candidate resolution.
//!
//! An [`Axis`] is an origin plus a unit normal. The normal is both the
//! normal of the mirror plane (reflect mode) and the rotation axis
//! direction (rotate mode). Candidates come either from a stock bounding
//! box and a flip direction, or from an explicit construction line.

use std::fmt;
use std::str::FromStr;

use flipkit_core::{normalize, point, vector, BoundingBox, Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{RegistrationError, RegistrationResult};
use crate::feature_set::ConstructionLine;

/// Horizontal direction the part is flipped along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipDirection {
    /// Flip along the X axis.
    #[default]
    AlongX,
    /// Flip along the Y axis.
    AlongY,
}

impl FlipDirection {
    /// Unit vector along the flip direction.
    pub fn unit(&self) -> Vector3 {
        match self {
            Self::AlongX => Vector3::x(),
            Self::AlongY => Vector3::y(),
        }
    }
}

impl fmt::Display for FlipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlongX => write!(f, "along_x"),
            Self::AlongY => write!(f, "along_y"),
        }
    }
}

impl FromStr for FlipDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "along_x" | "x" => Ok(Self::AlongX),
            "along_y" | "y" => Ok(Self::AlongY),
            _ => Err(format!("Unknown flip direction: {}", s)),
        }
    }
}

/// A flip axis: origin plus unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Axis {
    /// Build an axis, normalizing `direction`.
    pub fn new(origin: Point3, direction: Vector3) -> RegistrationResult<Self> {
        Ok(Self {
            origin,
            normal: normalize(&direction)?,
        })
    }

    /// Origin and normal coordinates all differ by less than `tolerance`.
    pub fn approx_eq(&self, other: &Axis, tolerance: f64) -> bool {
        (0..3).all(|i| {
            (self.origin[i] - other.origin[i]).abs() < tolerance
                && (self.normal[i] - other.normal[i]).abs() < tolerance
        })
    }

    /// The same axis with its origin moved to height `z`.
    pub fn with_origin_z(mut self, z: f64) -> Self {
        self.origin.z = z;
        self
    }

    /// Map the axis through `placement` (origin as a point, normal as a direction).
    pub fn transformed(&self, placement: &Transform) -> RegistrationResult<Self> {
        Self::new(
            placement.apply_point(&self.origin),
            placement.apply_vector(&self.normal),
        )
    }

    /// Coordinate of `p` along the normal.
    pub fn projection(&self, p: &Point3) -> f64 {
        p.coords.dot(&self.normal)
    }

    /// Component of `p - origin` orthogonal to the normal, i.e. where `p`
    /// sits within the mirror plane.
    pub fn extension(&self, p: &Point3) -> Vector3 {
        let rel = *p - self.origin;
        rel - self.normal * self.normal.dot(&rel)
    }

    /// In-plane direction orthogonal to the normal: the normal turned 90
    /// degrees about Z. Midlines are measured along this direction.
    pub fn ortho(&self) -> RegistrationResult<Vector3> {
        Ok(normalize(&vector(-self.normal.y, self.normal.x, 0.0))?)
    }
}

/// Where a candidate axis comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisSource {
    /// The stock bounding box plus a flip direction.
    BoundingBox {
        bounds: BoundingBox,
        direction: FlipDirection,
    },
    /// An explicit construction line from a registration sketch.
    ExplicitLine(ConstructionLine),
}

/// Produce a candidate axis.
///
/// Bounding-box mode puts the origin at the box minimum along the flip
/// direction, the box midpoint along the other horizontal direction, and
/// the vertical midpoint in Z. Explicit-line mode uses the line start as
/// origin and the line direction with its Z component removed as normal.
pub fn resolve_candidate_axis(source: &AxisSource) -> RegistrationResult<Axis> {
    let axis = match source {
        AxisSource::BoundingBox { bounds, direction } => {
            let origin = match direction {
                FlipDirection::AlongX => point(
                    bounds.min.x,
                    bounds.min.y + bounds.y_length() / 2.0,
                    bounds.mid_z(),
                ),
                FlipDirection::AlongY => point(
                    bounds.min.x + bounds.x_length() / 2.0,
                    bounds.min.y,
                    bounds.mid_z(),
                ),
            };
            Axis {
                origin,
                normal: direction.unit(),
            }
        }
        AxisSource::ExplicitLine(line) => {
            let mut direction = line.end - line.start;
            direction.z = 0.0;
            let normal = normalize(&direction).map_err(|_| RegistrationError::DegenerateAxis {
                start: line.start,
                end: line.end,
            })?;
            Axis {
                origin: line.start,
                normal,
            }
        }
    };
    trace!(
        "Resolved candidate axis origin={:?} normal={:?}",
        axis.origin,
        axis.normal
    );
    Ok(axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipkit_core::DEFAULT_TOLERANCE;

    #[test]
    fn test_bounding_box_along_x() {
        let bounds = BoundingBox::from_extents(0.0, 100.0, 0.0, 50.0, 0.0, 20.0);
        let axis = resolve_candidate_axis(&AxisSource::BoundingBox {
            bounds,
            direction: FlipDirection::AlongX,
        })
        .unwrap();
        assert_eq!(axis.origin, point(0.0, 25.0, 10.0));
        assert_eq!(axis.normal, vector(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounding_box_along_y() {
        let bounds = BoundingBox::from_extents(10.0, 110.0, -20.0, 30.0, -5.0, 5.0);
        let axis = resolve_candidate_axis(&AxisSource::BoundingBox {
            bounds,
            direction: FlipDirection::AlongY,
        })
        .unwrap();
        assert_eq!(axis.origin, point(60.0, -20.0, 0.0));
        assert_eq!(axis.normal, vector(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_explicit_line_drops_vertical_component() {
        let line = ConstructionLine::new(point(1.0, 1.0, 0.0), point(4.0, 5.0, 7.0));
        let axis = resolve_candidate_axis(&AxisSource::ExplicitLine(line)).unwrap();
        assert_eq!(axis.origin, point(1.0, 1.0, 0.0));
        assert!(axis.approx_eq(
            &Axis {
                origin: point(1.0, 1.0, 0.0),
                normal: vector(0.6, 0.8, 0.0),
            },
            DEFAULT_TOLERANCE
        ));
    }

    #[test]
    fn test_explicit_line_degenerate() {
        let p = point(3.0, 3.0, 0.0);
        let err = resolve_candidate_axis(&AxisSource::ExplicitLine(ConstructionLine::new(p, p)))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::DegenerateAxis { .. }));

        // a vertical line has no horizontal direction either
        let vertical = ConstructionLine::new(p, point(3.0, 3.0, 10.0));
        assert!(resolve_candidate_axis(&AxisSource::ExplicitLine(vertical)).is_err());
    }

    #[test]
    fn test_axis_new_normalizes() {
        let axis = Axis::new(Point3::origin(), vector(0.0, 2.0, 0.0)).unwrap();
        assert_eq!(axis.normal, vector(0.0, 1.0, 0.0));
        assert!(Axis::new(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = Axis::new(point(0.0, 25.0, 10.0), vector(1.0, 0.0, 0.0)).unwrap();
        let mut b = a;
        b.origin.y += 5e-8;
        assert!(a.approx_eq(&b, DEFAULT_TOLERANCE));
        b.origin.y += 1e-7;
        assert!(!a.approx_eq(&b, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_extension_and_ortho() {
        let axis = Axis::new(point(0.0, 25.0, 10.0), vector(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(axis.extension(&point(-5.0, 10.0, 0.0)), vector(0.0, -15.0, -10.0));
        assert_eq!(axis.projection(&point(-5.0, 10.0, 0.0)), -5.0);
        let ortho = axis.ortho().unwrap();
        assert!((ortho - vector(0.0, 1.0, 0.0)).norm() < 1e-12);

        let vertical = Axis::new(Point3::origin(), Vector3::z()).unwrap();
        assert!(vertical.ortho().is_err());
    }

    #[test]
    fn test_transformed_and_origin_z() {
        let axis = Axis::new(point(0.0, 25.0, 0.0), vector(1.0, 0.0, 0.0)).unwrap();
        let moved = axis
            .transformed(&Transform::translation(&vector(10.0, 0.0, 0.0)))
            .unwrap()
            .with_origin_z(4.0);
        assert_eq!(moved.origin, point(10.0, 25.0, 4.0));
        assert_eq!(moved.normal, vector(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_flip_direction_parse() {
        assert_eq!("X".parse::<FlipDirection>().unwrap(), FlipDirection::AlongX);
        assert_eq!("along_y".parse::<FlipDirection>().unwrap(), FlipDirection::AlongY);
        assert!("z".parse::<FlipDirection>().is_err());
        assert_eq!(FlipDirection::AlongY.to_string(), "along_y");
    }
}
