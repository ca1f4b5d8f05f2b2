//! Tolerance constants.

/// Default distance tolerance used when comparing pin coordinates and axes.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Tolerance used when comparing matrix entries (involution and inverse checks).
pub const MATRIX_TOLERANCE: f64 = 1e-9;
