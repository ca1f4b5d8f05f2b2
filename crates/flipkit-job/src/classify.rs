//! Registration sketch classification.
//!
//! A registration sketch has at least two circles (the pin holes) and
//! exactly one construction line segment (the flip line). Regular line
//! segments are ignored.

use flipkit_registration::FeatureSet;

use crate::document::{HostDocument, ObjectId, Sketch};
use crate::error::{JobError, JobResult};

/// Minimum number of circles in a registration sketch.
pub const MIN_REGISTRATION_PINS: usize = 2;

/// Why `sketch` is not a registration sketch, or `None` if it is one.
pub fn classify_sketch(sketch: &Sketch) -> Option<String> {
    let circles = sketch.pins().len();
    if circles < MIN_REGISTRATION_PINS {
        return Some(format!(
            "found {} circles, need at least {}",
            circles, MIN_REGISTRATION_PINS
        ));
    }
    let lines = sketch.construction_lines().len();
    if lines != 1 {
        return Some(format!(
            "found {} construction lines, need exactly one flip line",
            lines
        ));
    }
    None
}

pub fn is_registration_sketch(sketch: &Sketch) -> bool {
    classify_sketch(sketch).is_none()
}

/// Pins and flip line of a registration sketch, in document coordinates.
pub fn registration_features<D: HostDocument + ?Sized>(
    doc: &D,
    id: ObjectId,
) -> JobResult<FeatureSet> {
    let sketch = doc.sketch(id)?;
    if let Some(reason) = classify_sketch(sketch) {
        return Err(JobError::NotARegistrationSketch { id, reason });
    }
    Ok(sketch.feature_set())
}

/// Pins of a sketch with enough circles, ignoring any lines.
pub fn pin_features<D: HostDocument + ?Sized>(doc: &D, id: ObjectId) -> JobResult<FeatureSet> {
    let sketch = doc.sketch(id)?;
    let circles = sketch.pins().len();
    if circles < MIN_REGISTRATION_PINS {
        return Err(JobError::NotARegistrationSketch {
            id,
            reason: format!(
                "found {} circles, need at least {}",
                circles, MIN_REGISTRATION_PINS
            ),
        });
    }
    Ok(sketch.feature_set())
}
