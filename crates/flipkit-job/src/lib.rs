//! # FlipKit Job
//!
//! Host adapter layer between a CAD document and the registration engine.
//!
//! The document is reached only through [`HostDocument`], passed explicitly
//! to every call. On top of it this crate provides registration sketch
//! classification, owning-job lookup, stock recreation, and [`mirror_job`],
//! which runs the whole second-side setup in one all-or-nothing step.
//! [`MemoryDocument`] is a self-contained implementation of the trait.

pub mod classify;
pub mod document;
pub mod error;
pub mod memory;
pub mod mirror;
pub mod owner;
pub mod stock;

pub use classify::{
    classify_sketch, is_registration_sketch, pin_features, registration_features,
    MIN_REGISTRATION_PINS,
};
pub use document::{
    Body, DocumentObject, HostDocument, Job, ObjectId, Sketch, SketchGeometry, Stock, StockKind,
};
pub use error::{JobError, JobResult};
pub use memory::MemoryDocument;
pub use mirror::{
    mirror_job, resolve_mirror_axis, AxisSelection, MirrorOutcome, MirrorRequest,
    DEFAULT_TARGET_PREFIX,
};
pub use owner::{find_job_from_stock, find_owning_job};
pub use stock::{install_stock, rebuild_stock, recreate_stock};
