//! Error types for the job crate.
//!
//! Host-level failures: the document does not contain the objects a
//! mirror operation needs, or contains them in a shape the workflow cannot
//! handle. Geometric failures from the engine are wrapped unchanged.

use flipkit_registration::RegistrationError;
use thiserror::Error;

use crate::document::ObjectId;

/// Errors that can occur while mirroring a job inside a host document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    /// The object exists but is not usable as a registration sketch.
    #[error("Object {id} is not a registration sketch: {reason}")]
    NotARegistrationSketch { id: ObjectId, reason: String },

    /// No object with this id exists, or it has the wrong type.
    #[error("Object {id} not found (expected {expected})")]
    ObjectNotFound { id: ObjectId, expected: &'static str },

    /// The object is not referenced by any job.
    #[error("Object {id} is not contained in any job")]
    NoOwningJob { id: ObjectId },

    /// The object is referenced by several jobs.
    #[error("Object {id} is contained in {count} jobs")]
    AmbiguousJob { id: ObjectId, count: usize },

    /// Stock lookup was given something that is not a stock object.
    #[error("Object {id} is not a stock object")]
    NotAStockObject { id: ObjectId },

    /// Only box and from-base stock can be recreated.
    #[error("Unsupported stock type '{kind}': only box and from-base stock can be mirrored")]
    UnsupportedStockType { kind: String },

    /// The job has no stock.
    #[error("Job {job} has no stock")]
    MissingStock { job: ObjectId },

    /// The sketch has no construction line to flip about.
    #[error("Sketch {sketch} has no flip line")]
    MissingFlipLine { sketch: ObjectId },

    /// Source and target are the same job.
    #[error("Job {job} cannot be mirrored onto itself")]
    SameJob { job: ObjectId },

    /// The matching tolerance is not a positive finite number.
    #[error("Invalid tolerance {tolerance}: must be finite and greater than zero")]
    InvalidTolerance { tolerance: f64 },

    /// A registration engine failure.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Result type alias for job operations.
pub type JobResult<T> = Result<T, JobError>;
