//! Pin-pair matching.
//!
//! Each pin is reduced to its extension: the part of `center - origin`
//! orthogonal to the axis normal. Pins whose extension is shorter than the
//! tolerance lie on the axis and pair with themselves. Every other pin must
//! find a partner with the same extension, i.e. its reflection across the
//! plane through the origin perpendicular to the normal.
//!
//! Partners are chosen greedily: pins are visited in input order and each
//! takes the first later, still unpaired pin within tolerance. This is a
//! "first found wins" rule, not a nearest-match or globally optimal
//! assignment, so the result depends on input order when two candidates
//! are both within tolerance.

use flipkit_core::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::Axis;
use crate::error::{RegistrationError, RegistrationResult};
use crate::feature_set::Pin;
use crate::midline::resolve_midline;

/// Two pins that mirror each other across the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinPair {
    /// The pin visited first.
    pub first: Pin,
    /// Its partner.
    pub second: Pin,
}

/// Result of pairing: every input pin appears exactly once, either in a
/// pair or as a self-paired pin lying on the axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinPairing {
    pub pairs: Vec<PinPair>,
    pub self_paired: Vec<Pin>,
}

impl PinPairing {
    /// Number of pins covered by the pairing.
    pub fn pin_count(&self) -> usize {
        self.pairs.len() * 2 + self.self_paired.len()
    }
}

/// A validated pairing together with the resolved midline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinMatch {
    pub pairing: PinPairing,
    pub midline: f64,
}

/// Pair every pin with its mirror partner across `axis`.
///
/// Fails with [`RegistrationError::UnmatchedPin`] naming every off-axis pin
/// left without a partner.
pub fn pair_pins(pins: &[Pin], axis: &Axis, tolerance: f64) -> RegistrationResult<PinPairing> {
    let extensions: Vec<Vector3> = pins.iter().map(|p| axis.extension(&p.center)).collect();
    let on_axis = |i: usize| extensions[i].norm() < tolerance;

    let mut paired = vec![false; pins.len()];
    let mut pairing = PinPairing::default();
    let mut unmatched = Vec::new();

    for i in 0..pins.len() {
        if paired[i] {
            continue;
        }
        if on_axis(i) {
            paired[i] = true;
            pairing.self_paired.push(pins[i]);
            continue;
        }

        let partner = (i + 1..pins.len()).find(|&j| {
            !paired[j] && !on_axis(j) && (extensions[i] - extensions[j]).norm() < tolerance
        });
        match partner {
            Some(j) => {
                paired[i] = true;
                paired[j] = true;
                pairing.pairs.push(PinPair {
                    first: pins[i],
                    second: pins[j],
                });
            }
            None => unmatched.push(pins[i]),
        }
    }

    if !unmatched.is_empty() {
        return Err(RegistrationError::UnmatchedPin {
            pins: unmatched,
            tolerance,
        });
    }

    debug!(
        "Paired {} pins: {} pairs, {} on axis",
        pins.len(),
        pairing.pairs.len(),
        pairing.self_paired.len()
    );
    Ok(pairing)
}

/// Validate `pins` against `axis` and resolve the midline.
pub fn match_pins(pins: &[Pin], axis: &Axis, tolerance: f64) -> RegistrationResult<PinMatch> {
    if pins.is_empty() {
        return Err(RegistrationError::EmptyPinSet);
    }
    let pairing = pair_pins(pins, axis, tolerance)?;
    let midline = resolve_midline(pins, axis, tolerance)?;
    Ok(PinMatch { pairing, midline })
}

/// Try each candidate axis in order and return the first that validates.
///
/// Fails with [`RegistrationError::NoValidAxis`] carrying each candidate's
/// failure when none does.
pub fn search_axis(
    pins: &[Pin],
    candidates: &[Axis],
    tolerance: f64,
) -> RegistrationResult<(Axis, PinMatch)> {
    let mut failures = Vec::with_capacity(candidates.len());
    for axis in candidates {
        match match_pins(pins, axis, tolerance) {
            Ok(found) => return Ok((*axis, found)),
            Err(e) => {
                debug!("Candidate axis {:?} rejected: {}", axis.origin, e);
                failures.push(e);
            }
        }
    }
    Err(RegistrationError::NoValidAxis { failures })
}
