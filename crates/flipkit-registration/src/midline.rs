//! Midline resolution.
//!
//! Pins are binned by their coordinate along the flip normal: pins whose
//! projections lie within tolerance of a bin's first member share a
//! station. Within a bin, pins are sorted by their offset along the
//! in-plane orthogonal direction and the symmetric index pairs
//! `(k, n - 1 - k)` are averaged. Every average, and the middle pin of an
//! odd-sized bin, must agree on a single midline.

use flipkit_core::Vector3;
use tracing::debug;

use crate::axis::Axis;
use crate::error::{RegistrationError, RegistrationResult};
use crate::feature_set::Pin;

/// A pin located by its projection along the normal and its offset along
/// the orthogonal direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub proj: f64,
    pub off: f64,
    pub pin: Pin,
}

/// Group pins into bins of (near) equal projection along the normal.
///
/// Bins are returned in increasing projection order, each sorted by offset.
pub fn bin_stations(pins: &[Pin], axis: &Axis, tolerance: f64) -> RegistrationResult<Vec<Vec<Station>>> {
    let ortho = axis.ortho()?;
    let mut stations: Vec<Station> = pins
        .iter()
        .map(|pin| locate(pin, &axis.normal, &ortho))
        .collect();
    stations.sort_by(|a, b| a.proj.total_cmp(&b.proj));

    let mut bins: Vec<Vec<Station>> = Vec::new();
    for station in stations {
        match bins.last_mut() {
            Some(bin) if (station.proj - bin[0].proj).abs() < tolerance => bin.push(station),
            _ => bins.push(vec![station]),
        }
    }
    for bin in &mut bins {
        bin.sort_by(|a, b| a.off.total_cmp(&b.off));
    }
    Ok(bins)
}

/// Resolve the midline: the coordinate along the orthogonal direction at
/// which the pins are symmetric.
pub fn resolve_midline(pins: &[Pin], axis: &Axis, tolerance: f64) -> RegistrationResult<f64> {
    if pins.is_empty() {
        return Err(RegistrationError::EmptyPinSet);
    }

    let bins = bin_stations(pins, axis, tolerance)?;
    debug!("Found {} pins in {} bins", pins.len(), bins.len());

    let mut midline: Option<f64> = None;
    for bin in &bins {
        let n = bin.len();
        for k in 0..n / 2 {
            let m = (bin[k].off + bin[n - 1 - k].off) / 2.0;
            agree(&mut midline, m, tolerance)?;
        }
        if n % 2 == 1 {
            agree(&mut midline, bin[n / 2].off, tolerance)?;
        }
    }

    midline.ok_or(RegistrationError::EmptyPinSet)
}

fn locate(pin: &Pin, normal: &Vector3, ortho: &Vector3) -> Station {
    Station {
        proj: pin.center.coords.dot(normal),
        off: pin.center.coords.dot(ortho),
        pin: *pin,
    }
}

fn agree(midline: &mut Option<f64>, candidate: f64, tolerance: f64) -> RegistrationResult<()> {
    match *midline {
        None => {
            *midline = Some(candidate);
            Ok(())
        }
        Some(expected) if (expected - candidate).abs() < tolerance => Ok(()),
        Some(expected) => Err(RegistrationError::MidlineMismatch {
            expected,
            found: candidate,
            tolerance,
        }),
    }
}
