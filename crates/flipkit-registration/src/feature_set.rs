//! Plain data view of registration features.
//!
//! A [`FeatureSet`] is what a host adapter extracts from a registration
//! sketch: the circle centers (pins) and, optionally, the single
//! construction line marking the flip axis. Nothing here refers to any host
//! document type.

use std::fmt;

use flipkit_core::{Point3, Transform};
use serde::{Deserialize, Serialize};

/// One registration pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Center of the pin hole.
    pub center: Point3,
    /// Radius of the pin hole. Not used for matching.
    pub radius: f64,
}

impl Pin {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// The same pin moved by `placement`. Radius is unchanged.
    pub fn transformed(&self, placement: &Transform) -> Self {
        Self {
            center: placement.apply_point(&self.center),
            radius: self.radius,
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pin at ({:.6}, {:.6}, {:.6}) r={}",
            self.center.x, self.center.y, self.center.z, self.radius
        )
    }
}

/// A construction line segment, used as an explicit flip axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionLine {
    pub start: Point3,
    pub end: Point3,
}

impl ConstructionLine {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn transformed(&self, placement: &Transform) -> Self {
        Self {
            start: placement.apply_point(&self.start),
            end: placement.apply_point(&self.end),
        }
    }
}

/// Pins plus an optional construction line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub pins: Vec<Pin>,
    pub construction_line: Option<ConstructionLine>,
}

impl FeatureSet {
    pub fn new(pins: Vec<Pin>) -> Self {
        Self {
            pins,
            construction_line: None,
        }
    }

    pub fn with_construction_line(mut self, line: ConstructionLine) -> Self {
        self.construction_line = Some(line);
        self
    }

    /// Map every feature through `placement`, e.g. a sketch's own placement
    /// into document coordinates.
    pub fn transformed(&self, placement: &Transform) -> Self {
        Self {
            pins: self.pins.iter().map(|p| p.transformed(placement)).collect(),
            construction_line: self
                .construction_line
                .map(|line| line.transformed(placement)),
        }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipkit_core::{point, vector};

    #[test]
    fn test_transformed_moves_pins_and_line() {
        let features = FeatureSet::new(vec![Pin::new(point(1.0, 2.0, 0.0), 3.0)])
            .with_construction_line(ConstructionLine::new(
                point(0.0, 0.0, 0.0),
                point(0.0, 10.0, 0.0),
            ));
        let placement = Transform::translation(&vector(5.0, 0.0, 1.0));

        let moved = features.transformed(&placement);
        assert_eq!(moved.pins[0].center, point(6.0, 2.0, 1.0));
        assert_eq!(moved.pins[0].radius, 3.0);
        let line = moved.construction_line.unwrap();
        assert_eq!(line.start, point(5.0, 0.0, 1.0));
        assert_eq!(line.end, point(5.0, 10.0, 1.0));
    }

    #[test]
    fn test_pin_display() {
        let pin = Pin::new(point(-5.0, 10.0, 0.0), 2.5);
        assert_eq!(
            pin.to_string(),
            "pin at (-5.000000, 10.000000, 0.000000) r=2.5"
        );
    }
}
