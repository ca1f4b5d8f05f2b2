//! Flip transform construction.
//!
//! Both modes build `Ti * R * T`, where `T` moves the axis origin to the
//! coordinate origin and `Ti` is its inverse. `R` depends on the mode:
//!
//! - [`FlipMode::Reflect`]: the Householder reflection `I - 2 n nᵀ`, which
//!   mirrors geometry across the plane through the origin perpendicular to
//!   the normal.
//! - [`FlipMode::Rotate180`]: `2 n nᵀ - I`, a half turn about the axis
//!   direction. For a normal along X or Y this is exactly the 180° rotation
//!   matrix about that axis. Use it when the part is physically turned over
//!   rather than mirrored.

use std::fmt;
use std::str::FromStr;

use flipkit_core::{Transform, Vector3};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::Axis;
use crate::error::RegistrationResult;

/// How the second setup relates to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipMode {
    /// Mirror the geometry across the plane.
    #[default]
    Reflect,
    /// Turn the part over about the axis.
    Rotate180,
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reflect => write!(f, "reflect"),
            Self::Rotate180 => write!(f, "rotate180"),
        }
    }
}

impl FromStr for FlipMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reflect" | "mirror" => Ok(Self::Reflect),
            "rotate180" | "rotate" => Ok(Self::Rotate180),
            _ => Err(format!("Unknown flip mode: {}", s)),
        }
    }
}

/// The 3x3 linear part of the flip for a unit `normal`.
pub fn flip_linear(normal: &Vector3, mode: FlipMode) -> Matrix3<f64> {
    let outer = normal * normal.transpose();
    match mode {
        FlipMode::Reflect => Matrix3::identity() - outer * 2.0,
        FlipMode::Rotate180 => outer * 2.0 - Matrix3::identity(),
    }
}

/// Build the flip transform for a validated axis.
pub fn build_flip_transform(axis: &Axis, mode: FlipMode) -> RegistrationResult<Transform> {
    let to_origin = Transform::translation(&(-axis.origin.coords));
    let back = to_origin.inverse()?;
    let flip = Transform::from_linear(&flip_linear(&axis.normal, mode));
    debug!(
        "Built {} transform about origin={:?} normal={:?}",
        mode, axis.origin, axis.normal
    );
    Ok(back * flip * to_origin)
}
