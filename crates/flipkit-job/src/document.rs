//! The host document seen through a narrow interface.
//!
//! A CAD host owns an object graph of sketches, jobs, stocks and model
//! bodies. The mirror workflow only needs to read those objects, follow
//! backlinks from an object to the jobs that reference it, and replace a
//! job's stock. [`HostDocument`] is that interface; every workflow function
//! takes the document as an explicit argument.

use std::fmt;

use flipkit_core::{BoundingBox, Point3, Transform, Vector3};
use flipkit_registration::{ConstructionLine, FeatureSet, Pin};
use serde::{Deserialize, Serialize};

use crate::error::{JobError, JobResult};

/// Identity of an object in a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One geometry element of a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SketchGeometry {
    Circle { center: Point3, radius: f64 },
    Line { start: Point3, end: Point3, construction: bool },
}

/// A sketch with its geometry in sketch coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    pub label: String,
    pub placement: Transform,
    pub geometry: Vec<SketchGeometry>,
}

impl Sketch {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placement: Transform::identity(),
            geometry: Vec::new(),
        }
    }

    pub fn with_placement(mut self, placement: Transform) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_circle(mut self, center: Point3, radius: f64) -> Self {
        self.geometry.push(SketchGeometry::Circle { center, radius });
        self
    }

    pub fn with_line(mut self, start: Point3, end: Point3, construction: bool) -> Self {
        self.geometry.push(SketchGeometry::Line {
            start,
            end,
            construction,
        });
        self
    }

    /// Circles as pins, in sketch coordinates.
    pub fn pins(&self) -> Vec<Pin> {
        self.geometry
            .iter()
            .filter_map(|g| match *g {
                SketchGeometry::Circle { center, radius } => Some(Pin::new(center, radius)),
                SketchGeometry::Line { .. } => None,
            })
            .collect()
    }

    /// Construction line segments, in sketch coordinates.
    pub fn construction_lines(&self) -> Vec<ConstructionLine> {
        self.geometry
            .iter()
            .filter_map(|g| match *g {
                SketchGeometry::Line {
                    start,
                    end,
                    construction: true,
                } => Some(ConstructionLine::new(start, end)),
                _ => None,
            })
            .collect()
    }

    /// Pins and the first construction line, moved into document coordinates.
    pub fn feature_set(&self) -> FeatureSet {
        let mut features = FeatureSet::new(self.pins());
        if let Some(line) = self.construction_lines().first() {
            features = features.with_construction_line(*line);
        }
        features.transformed(&self.placement)
    }
}

/// A model body placed in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub label: String,
    pub placement: Transform,
}

impl Body {
    pub fn new(label: impl Into<String>, placement: Transform) -> Self {
        Self {
            label: label.into(),
            placement,
        }
    }
}

/// How a stock solid was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockKind {
    /// A plain box of the given size.
    Box { extent: Vector3 },
    /// The model bounding box grown by per-axis extensions.
    FromBase { neg: Vector3, pos: Vector3 },
    /// Any other host stock type, by name.
    Other(String),
}

impl StockKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Box { .. } => "box",
            Self::FromBase { .. } => "from_base",
            Self::Other(name) => name,
        }
    }
}

/// Stock material with its shape bounds in local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub label: String,
    pub kind: StockKind,
    pub shape: BoundingBox,
    pub placement: Transform,
}

impl Stock {
    pub fn new(label: impl Into<String>, kind: StockKind, shape: BoundingBox) -> Self {
        Self {
            label: label.into(),
            kind,
            shape,
            placement: Transform::identity(),
        }
    }

    pub fn with_placement(mut self, placement: Transform) -> Self {
        self.placement = placement;
        self
    }

    /// Bounding box in document coordinates.
    pub fn bounds(&self) -> BoundingBox {
        self.shape.transformed(&self.placement)
    }
}

/// A job: ordered model bodies plus an optional stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub label: String,
    pub placement: Transform,
    pub models: Vec<ObjectId>,
    pub stock: Option<ObjectId>,
}

impl Job {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placement: Transform::identity(),
            models: Vec::new(),
            stock: None,
        }
    }

    pub fn with_models(mut self, models: Vec<ObjectId>) -> Self {
        self.models = models;
        self
    }

    pub fn with_stock(mut self, stock: ObjectId) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Whether this job references `id` as a model or as its stock.
    pub fn references(&self, id: ObjectId) -> bool {
        self.stock == Some(id) || self.models.contains(&id)
    }
}

/// Any object the workflow cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentObject {
    Sketch(Sketch),
    Body(Body),
    Stock(Stock),
    Job(Job),
}

impl DocumentObject {
    pub fn label(&self) -> &str {
        match self {
            Self::Sketch(s) => &s.label,
            Self::Body(b) => &b.label,
            Self::Stock(s) => &s.label,
            Self::Job(j) => &j.label,
        }
    }

    pub fn set_label(&mut self, label: String) {
        match self {
            Self::Sketch(s) => s.label = label,
            Self::Body(b) => b.label = label,
            Self::Stock(s) => s.label = label,
            Self::Job(j) => j.label = label,
        }
    }

    /// Placement of the object. Jobs carry one too.
    pub fn placement(&self) -> &Transform {
        match self {
            Self::Sketch(s) => &s.placement,
            Self::Body(b) => &b.placement,
            Self::Stock(s) => &s.placement,
            Self::Job(j) => &j.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut Transform {
        match self {
            Self::Sketch(s) => &mut s.placement,
            Self::Body(b) => &mut b.placement,
            Self::Stock(s) => &mut s.placement,
            Self::Job(j) => &mut j.placement,
        }
    }
}

/// Access to a host document.
///
/// Implementors provide object lookup, backlinks and insertion/removal;
/// the typed accessors are derived from those.
pub trait HostDocument {
    /// Look up an object.
    fn object(&self, id: ObjectId) -> Option<&DocumentObject>;

    /// Look up an object for modification.
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut DocumentObject>;

    /// Jobs referencing `id`, in document order.
    fn in_list(&self, id: ObjectId) -> Vec<ObjectId>;

    /// Insert a new object and return its id.
    fn add_object(&mut self, object: DocumentObject) -> ObjectId;

    /// Remove an object, returning it if it existed.
    fn remove_object(&mut self, id: ObjectId) -> Option<DocumentObject>;

    fn sketch(&self, id: ObjectId) -> JobResult<&Sketch> {
        match self.object(id) {
            Some(DocumentObject::Sketch(s)) => Ok(s),
            _ => Err(JobError::ObjectNotFound {
                id,
                expected: "sketch",
            }),
        }
    }

    fn body(&self, id: ObjectId) -> JobResult<&Body> {
        match self.object(id) {
            Some(DocumentObject::Body(b)) => Ok(b),
            _ => Err(JobError::ObjectNotFound {
                id,
                expected: "body",
            }),
        }
    }

    fn job(&self, id: ObjectId) -> JobResult<&Job> {
        match self.object(id) {
            Some(DocumentObject::Job(j)) => Ok(j),
            _ => Err(JobError::ObjectNotFound { id, expected: "job" }),
        }
    }

    fn job_mut(&mut self, id: ObjectId) -> JobResult<&mut Job> {
        match self.object_mut(id) {
            Some(DocumentObject::Job(j)) => Ok(j),
            _ => Err(JobError::ObjectNotFound { id, expected: "job" }),
        }
    }

    /// A stock object. Existing non-stock objects give `NotAStockObject`.
    fn stock(&self, id: ObjectId) -> JobResult<&Stock> {
        match self.object(id) {
            Some(DocumentObject::Stock(s)) => Ok(s),
            Some(_) => Err(JobError::NotAStockObject { id }),
            None => Err(JobError::ObjectNotFound {
                id,
                expected: "stock",
            }),
        }
    }

    /// The stock of a job.
    fn job_stock(&self, job: ObjectId) -> JobResult<(ObjectId, &Stock)> {
        let stock_id = self.job(job)?.stock.ok_or(JobError::MissingStock { job })?;
        Ok((stock_id, self.stock(stock_id)?))
    }

    fn set_label(&mut self, id: ObjectId, label: String) -> JobResult<()> {
        let object = self.object_mut(id).ok_or(JobError::ObjectNotFound {
            id,
            expected: "object",
        })?;
        object.set_label(label);
        Ok(())
    }

    fn set_placement(&mut self, id: ObjectId, placement: Transform) -> JobResult<()> {
        let object = self.object_mut(id).ok_or(JobError::ObjectNotFound {
            id,
            expected: "object",
        })?;
        *object.placement_mut() = placement;
        Ok(())
    }
}
