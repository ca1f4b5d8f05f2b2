//! # FlipKit
//!
//! Pin registration and flip transforms for two-sided CNC machining.
//!
//! A part is machined, turned over on the fixture, and machined again. Pin
//! holes straddling the flip axis tie the two setups together. FlipKit
//! checks that the pins are symmetric about the axis, builds the mirror
//! (or half-turn) transform, and places the second-side job with it.
//!
//! ## Architecture
//!
//! FlipKit is organized as a workspace with multiple crates:
//!
//! 1. **flipkit-core** - Points, vectors, transforms, bounding boxes, tolerances
//! 2. **flipkit-registration** - Axis resolution, pin matching, flip transforms, mirror application
//! 3. **flipkit-job** - Host document interface and the job mirroring workflow
//! 4. **flipkit-settings** - Configuration files
//! 5. **flipkit** - Re-exports and logging setup

use std::path::Path;

use anyhow::Context;

pub use flipkit_core::{
    normalize, point, vector, BoundingBox, GeometryError, GeometryResult, Point3, Transform,
    Vector3, DEFAULT_TOLERANCE, MATRIX_TOLERANCE,
};

pub use flipkit_registration::{
    apply_transform, build_flip_transform, match_pins, pair_pins, resolve_candidate_axis,
    resolve_midline, search_axis, Axis, AxisSource, BodyCorrespondence, BodyId, ConstructionLine,
    ErrorKind, FeatureSet, FlipDirection, FlipMode, MirrorReport, Pin, PinMatch, PinPair,
    PinPairing, PlacedBody, RegistrationError, RegistrationResult,
};

pub use flipkit_job::{
    find_owning_job, is_registration_sketch, mirror_job, recreate_stock, AxisSelection, Body,
    DocumentObject, HostDocument, Job, JobError, JobResult, MemoryDocument, MirrorOutcome,
    MirrorRequest, ObjectId, Sketch, SketchGeometry, Stock, StockKind,
};

pub use flipkit_settings::{
    Config, ConfigError, LoggingSettings, RegistrationSettings, SettingsError, SettingsResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(&LoggingSettings::default())
}

/// Initialize logging from settings.
///
/// `RUST_LOG` wins over `settings.level` when set. Fails if a global
/// subscriber is already installed.
pub fn init_logging_with(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .with_context(|| format!("Invalid log level '{}'", settings.level))?,
    };

    let (pretty, json) = if settings.json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_current_span(true);
        (None, Some(layer))
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .pretty();
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

/// Load the config at `path`, or from the platform location when `None`.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
