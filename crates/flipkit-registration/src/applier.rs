//! Job mirror application.
//!
//! Writes `transform * source.placement` into each target body whose
//! identity matches a source body, plus the designated stock body. The
//! whole correspondence is validated before the first write, so a failed
//! call leaves every target slot untouched.

use std::collections::{HashMap, HashSet};
use std::fmt;

use flipkit_core::Transform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistrationError, RegistrationResult};

/// Stable, opaque identity of a placed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A body identity with its placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBody {
    pub id: BodyId,
    pub placement: Transform,
}

impl PlacedBody {
    pub fn new(id: BodyId, placement: Transform) -> Self {
        Self { id, placement }
    }
}

/// The stock body of the source job and the slot it maps to in the target job.
#[derive(Debug)]
pub struct StockPair<'a> {
    pub source: &'a Transform,
    pub target: &'a mut Transform,
}

/// Source bodies (read) and target bodies (written), matched by identity.
///
/// The borrows end when the correspondence is dropped; nothing is retained.
#[derive(Debug)]
pub struct BodyCorrespondence<'a> {
    sources: &'a [PlacedBody],
    targets: &'a mut [PlacedBody],
    stock: Option<StockPair<'a>>,
}

impl<'a> BodyCorrespondence<'a> {
    pub fn new(sources: &'a [PlacedBody], targets: &'a mut [PlacedBody]) -> Self {
        Self {
            sources,
            targets,
            stock: None,
        }
    }

    /// Also write the stock placement.
    pub fn with_stock(mut self, source: &'a Transform, target: &'a mut Transform) -> Self {
        self.stock = Some(StockPair { source, target });
        self
    }

    /// Check cardinality and identities, returning for each target the index
    /// of its source.
    fn resolve(&self) -> RegistrationResult<Vec<usize>> {
        if self.sources.len() != self.targets.len() {
            return Err(RegistrationError::CorrespondenceMismatch {
                sources: self.sources.len(),
                targets: self.targets.len(),
            });
        }

        let mut by_id = HashMap::with_capacity(self.sources.len());
        for (index, body) in self.sources.iter().enumerate() {
            if by_id.insert(body.id, index).is_some() {
                return Err(RegistrationError::DuplicateBody { id: body.id });
            }
        }

        let mut seen = HashSet::with_capacity(self.targets.len());
        self.targets
            .iter()
            .map(|body| {
                if !seen.insert(body.id) {
                    return Err(RegistrationError::DuplicateBody { id: body.id });
                }
                by_id
                    .get(&body.id)
                    .copied()
                    .ok_or(RegistrationError::UnknownBody { id: body.id })
            })
            .collect()
    }
}

/// What [`apply_transform`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MirrorReport {
    /// Identities of the target bodies written, in target order.
    pub written: Vec<BodyId>,
    /// Whether the stock placement was written.
    pub stock_written: bool,
}

impl MirrorReport {
    pub fn bodies_written(&self) -> usize {
        self.written.len()
    }
}

/// Write `transform * source.placement` into every target slot.
///
/// Fails with [`RegistrationError::CorrespondenceMismatch`] (or
/// `DuplicateBody` / `UnknownBody`) before any slot is written.
pub fn apply_transform(
    transform: &Transform,
    correspondence: BodyCorrespondence<'_>,
) -> RegistrationResult<MirrorReport> {
    let source_index = correspondence.resolve()?;
    let BodyCorrespondence {
        sources,
        targets,
        stock,
    } = correspondence;

    let mut report = MirrorReport::default();
    for (target, &index) in targets.iter_mut().zip(source_index.iter()) {
        target.placement = transform.compose(&sources[index].placement);
        report.written.push(target.id);
    }

    if let Some(StockPair { source, target }) = stock {
        *target = transform.compose(source);
        report.stock_written = true;
    }

    debug!(
        "Applied flip to {} bodies (stock: {})",
        report.bodies_written(),
        report.stock_written
    );
    Ok(report)
}
