//! Error types for the registration engine.
//!
//! Every error is terminal for the current call. A validation failure means
//! the pin layout or body collections are inconsistent, so there is nothing
//! to retry. Variants carry the coordinates, computed values, and tolerance
//! involved so a caller can report them without re-running.

use std::fmt;

use flipkit_core::{GeometryError, Point3};
use thiserror::Error;

use crate::applier::BodyId;
use crate::feature_set::Pin;

/// Errors raised while resolving an axis, matching pins, or applying a flip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// The axis direction has zero length.
    #[error("Degenerate axis: start {} and end {} do not define a horizontal direction", fmt_point(.start), fmt_point(.end))]
    DegenerateAxis {
        /// Start of the explicit line.
        start: Point3,
        /// End of the explicit line.
        end: Point3,
    },

    /// One or more off-axis pins have no mirror partner.
    #[error("Unmatched registration pins (tolerance {tolerance:e}): {}", fmt_pins(.pins))]
    UnmatchedPin {
        /// The pins without a partner, in input order.
        pins: Vec<Pin>,
        /// Tolerance used for the comparison.
        tolerance: f64,
    },

    /// Two pin pairs, or a middle pin, disagree on the midline.
    #[error("Midline mismatch: {found} disagrees with {expected} (tolerance {tolerance:e})")]
    MidlineMismatch {
        /// The midline agreed so far.
        expected: f64,
        /// The candidate that disagrees.
        found: f64,
        /// Tolerance used for the comparison.
        tolerance: f64,
    },

    /// There are no pins to derive a midline from.
    #[error("Couldn't find registration midline: no pins supplied")]
    EmptyPinSet,

    /// Source and target body collections differ in size.
    #[error("Correspondence mismatch: {sources} source bodies vs {targets} target bodies")]
    CorrespondenceMismatch {
        /// Number of source bodies.
        sources: usize,
        /// Number of target bodies.
        targets: usize,
    },

    /// The same body identity appears twice in one collection.
    #[error("Duplicate body identity {id}")]
    DuplicateBody {
        /// The repeated identity.
        id: BodyId,
    },

    /// A target body has no source body with the same identity.
    #[error("Target body {id} has no matching source body")]
    UnknownBody {
        /// The unmatched target identity.
        id: BodyId,
    },

    /// None of the candidate axes validated.
    #[error("No valid flip axis among {} candidates", .failures.len())]
    NoValidAxis {
        /// Failure of each candidate, in the order tried.
        failures: Vec<RegistrationError>,
    },

    /// A vector or matrix operation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Coarse classification of [`RegistrationError`] for adapters that map
/// failures onto their own dialogs or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DegenerateAxis,
    UnmatchedPin,
    MidlineMismatch,
    CorrespondenceMismatch,
    SingularMatrix,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAxis => write!(f, "DegenerateAxisError"),
            Self::UnmatchedPin => write!(f, "UnmatchedPinError"),
            Self::MidlineMismatch => write!(f, "MidlineMismatchError"),
            Self::CorrespondenceMismatch => write!(f, "CorrespondenceMismatchError"),
            Self::SingularMatrix => write!(f, "SingularMatrixError"),
        }
    }
}

impl RegistrationError {
    /// The taxonomy bucket this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DegenerateAxis { .. } => ErrorKind::DegenerateAxis,
            Self::Geometry(GeometryError::DegenerateVector { .. }) => ErrorKind::DegenerateAxis,
            Self::Geometry(GeometryError::SingularMatrix { .. }) => ErrorKind::SingularMatrix,
            Self::UnmatchedPin { .. } => ErrorKind::UnmatchedPin,
            Self::MidlineMismatch { .. } | Self::EmptyPinSet => ErrorKind::MidlineMismatch,
            Self::CorrespondenceMismatch { .. }
            | Self::DuplicateBody { .. }
            | Self::UnknownBody { .. } => ErrorKind::CorrespondenceMismatch,
            Self::NoValidAxis { failures } => failures
                .last()
                .map_or(ErrorKind::DegenerateAxis, |last| last.kind()),
        }
    }

    /// A singular matrix means the caller built an invalid axis.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::SingularMatrix
    }
}

/// Result type alias for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

fn fmt_point(p: &Point3) -> String {
    format!("({:.6}, {:.6}, {:.6})", p.x, p.y, p.z)
}

fn fmt_pins(pins: &[Pin]) -> String {
    pins.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
