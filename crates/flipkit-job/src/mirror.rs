//! End-to-end job mirroring.
//!
//! [`mirror_job`] turns a target job into the second-side counterpart of a
//! source job: it resolves the flip axis (from the source stock or from a
//! registration sketch), builds the flip transform, gives the target a
//! fresh copy of the source stock, relabels the target and its models, and
//! writes `transform * source placement` into every target model and the
//! new stock. Every check runs before the document is touched.

use flipkit_core::{Transform, DEFAULT_TOLERANCE};
use flipkit_registration::{
    apply_transform, build_flip_transform, match_pins, resolve_candidate_axis, search_axis, Axis,
    AxisSource, BodyCorrespondence, BodyId, FlipDirection, FlipMode, MirrorReport, PinMatch,
    PlacedBody, RegistrationError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{pin_features, registration_features};
use crate::document::{HostDocument, ObjectId, Stock};
use crate::error::{JobError, JobResult};
use crate::stock::{install_stock, rebuild_stock};

/// Default prefix for the target job label.
pub const DEFAULT_TARGET_PREFIX: &str = "Reverse";

/// Where the flip axis comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSelection {
    /// Bounding box of the source stock along a flip direction.
    Stock { direction: FlipDirection },
    /// The flip line of a registration sketch; its pins are validated.
    Sketch { sketch: ObjectId },
    /// Pins of a sketch, tried against the stock axes along X then Y.
    PinSearch { sketch: ObjectId },
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self::Stock {
            direction: FlipDirection::default(),
        }
    }
}

/// Parameters of one mirror operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorRequest {
    pub axis_source: AxisSelection,
    pub mode: FlipMode,
    pub tolerance: f64,
    /// Move the flip origin to the vertical middle of the source stock.
    pub center_on_stock_z: bool,
    pub target_label_prefix: String,
}

impl Default for MirrorRequest {
    fn default() -> Self {
        Self {
            axis_source: AxisSelection::default(),
            mode: FlipMode::default(),
            tolerance: DEFAULT_TOLERANCE,
            center_on_stock_z: true,
            target_label_prefix: DEFAULT_TARGET_PREFIX.to_string(),
        }
    }
}

impl MirrorRequest {
    pub fn new(axis_source: AxisSelection) -> Self {
        Self {
            axis_source,
            ..Self::default()
        }
    }

    pub fn with_sketch(mut self, sketch: ObjectId) -> Self {
        self.axis_source = AxisSelection::Sketch { sketch };
        self
    }

    pub fn with_mode(mut self, mode: FlipMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Reject a tolerance that is not finite and positive.
    pub fn validate(&self) -> JobResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(JobError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}

/// What a successful [`mirror_job`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorOutcome {
    pub axis: Axis,
    pub transform: Transform,
    /// Pin validation result, when the axis came from a sketch.
    pub pins: Option<PinMatch>,
    pub report: MirrorReport,
    pub target_stock: ObjectId,
    pub target_label: String,
}

/// Resolve and validate the flip axis for `source_job`.
pub fn resolve_mirror_axis<D: HostDocument + ?Sized>(
    doc: &D,
    source_job: ObjectId,
    request: &MirrorRequest,
) -> JobResult<(Axis, Option<PinMatch>)> {
    request.validate()?;
    let (_, stock) = doc.job_stock(source_job)?;
    let bounds = stock.bounds();

    let (axis, pins) = match request.axis_source {
        AxisSelection::Stock { direction } => {
            let axis = resolve_candidate_axis(&AxisSource::BoundingBox { bounds, direction })?;
            (axis, None)
        }
        AxisSelection::Sketch { sketch } => {
            let features = registration_features(doc, sketch)?;
            let line = features
                .construction_line
                .ok_or(JobError::MissingFlipLine { sketch })?;
            let axis = resolve_candidate_axis(&AxisSource::ExplicitLine(line))?;
            let found = match_pins(&features.pins, &axis, request.tolerance)?;
            (axis, Some(found))
        }
        AxisSelection::PinSearch { sketch } => {
            let features = pin_features(doc, sketch)?;
            let candidates = [FlipDirection::AlongX, FlipDirection::AlongY]
                .into_iter()
                .map(|direction| {
                    resolve_candidate_axis(&AxisSource::BoundingBox { bounds, direction })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let (axis, found) = search_axis(&features.pins, &candidates, request.tolerance)?;
            (axis, Some(found))
        }
    };

    let axis = if request.center_on_stock_z {
        debug!("Flip origin z moved to stock middle {}", bounds.mid_z());
        axis.with_origin_z(bounds.mid_z())
    } else {
        axis
    };
    Ok((axis, pins))
}

fn placed_models<D: HostDocument + ?Sized>(
    doc: &D,
    models: &[ObjectId],
) -> JobResult<Vec<PlacedBody>> {
    // index is the identity: model i of the source pairs with model i of the target
    models
        .iter()
        .enumerate()
        .map(|(index, id)| Ok(PlacedBody::new(BodyId(index as u64), doc.body(*id)?.placement)))
        .collect()
}

/// Make `target_job` the flipped counterpart of `source_job`.
///
/// Source and target must be different jobs. On error the document is
/// unchanged.
pub fn mirror_job<D: HostDocument + ?Sized>(
    doc: &mut D,
    source_job: ObjectId,
    target_job: ObjectId,
    request: &MirrorRequest,
) -> JobResult<MirrorOutcome> {
    if source_job == target_job {
        return Err(JobError::SameJob { job: source_job });
    }
    request.validate()?;
    let source = doc.job(source_job)?.clone();
    let target = doc.job(target_job)?.clone();

    if source.models.len() != target.models.len() {
        return Err(RegistrationError::CorrespondenceMismatch {
            sources: source.models.len(),
            targets: target.models.len(),
        }
        .into());
    }
    let sources = placed_models(&*doc, &source.models)?;
    let mut targets = placed_models(&*doc, &target.models)?;
    let labels: Vec<String> = source
        .models
        .iter()
        .map(|id| Ok(doc.body(*id)?.label.clone()))
        .collect::<JobResult<_>>()?;

    let (axis, pins) = resolve_mirror_axis(&*doc, source_job, request)?;
    let transform = build_flip_transform(&axis, request.mode)?;

    let (_, source_stock) = doc.job_stock(source_job)?;
    let stock_placement = source_stock.placement;
    let mut new_stock: Stock = rebuild_stock(source_stock, source.placement)?;

    let report = apply_transform(
        &transform,
        BodyCorrespondence::new(&sources, &mut targets)
            .with_stock(&stock_placement, &mut new_stock.placement),
    )?;

    // nothing below can fail on a document that passed the lookups above
    let target_stock = install_stock(&mut *doc, target_job, new_stock)?;
    for ((id, label), placed) in target.models.iter().zip(labels).zip(&targets) {
        doc.set_label(*id, label)?;
        doc.set_placement(*id, placed.placement)?;
    }
    let target_label = format!("{}{}", request.target_label_prefix, source.label);
    doc.set_label(target_job, target_label.clone())?;

    debug!(
        "Mirrored job {} onto {} ({}, {} bodies)",
        source_job,
        target_job,
        request.mode,
        report.bodies_written()
    );
    Ok(MirrorOutcome {
        axis,
        transform,
        pins,
        report,
        target_stock,
        target_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = MirrorRequest::default();
        assert_eq!(
            request.axis_source,
            AxisSelection::Stock {
                direction: FlipDirection::AlongX
            }
        );
        assert_eq!(request.mode, FlipMode::Reflect);
        assert_eq!(request.tolerance, DEFAULT_TOLERANCE);
        assert!(request.center_on_stock_z);
        assert_eq!(request.target_label_prefix, "Reverse");
    }

    #[test]
    fn test_request_builders() {
        let request = MirrorRequest::default()
            .with_sketch(ObjectId(3))
            .with_mode(FlipMode::Rotate180)
            .with_tolerance(1e-4);
        assert_eq!(request.axis_source, AxisSelection::Sketch { sketch: ObjectId(3) });
        assert_eq!(request.mode, FlipMode::Rotate180);
        assert_eq!(request.tolerance, 1e-4);
    }

    #[test]
    fn test_request_tolerance_validation() {
        assert!(MirrorRequest::default().validate().is_ok());
        for bad in [0.0, -1e-7, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                MirrorRequest::default().with_tolerance(bad).validate(),
                Err(JobError::InvalidTolerance { .. })
            ));
        }
    }
}
