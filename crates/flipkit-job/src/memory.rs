//! In-memory host document.
//!
//! Keeps objects in id order and derives backlinks by scanning jobs. Used
//! by tests and by embedders that assemble a document without a CAD host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{Body, DocumentObject, HostDocument, Job, ObjectId, Sketch, Stock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    objects: BTreeMap<ObjectId, DocumentObject>,
    next_id: u64,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn add_sketch(&mut self, sketch: Sketch) -> ObjectId {
        self.add_object(DocumentObject::Sketch(sketch))
    }

    pub fn add_body(&mut self, body: Body) -> ObjectId {
        self.add_object(DocumentObject::Body(body))
    }

    pub fn add_stock(&mut self, stock: Stock) -> ObjectId {
        self.add_object(DocumentObject::Stock(stock))
    }

    pub fn add_job(&mut self, job: Job) -> ObjectId {
        self.add_object(DocumentObject::Job(job))
    }

    /// First object with the given label.
    pub fn find_by_label(&self, label: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.label() == label)
            .map(|(id, _)| *id)
    }
}

impl HostDocument for MemoryDocument {
    fn object(&self, id: ObjectId) -> Option<&DocumentObject> {
        self.objects.get(&id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut DocumentObject> {
        self.objects.get_mut(&id)
    }

    fn in_list(&self, id: ObjectId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter_map(|(job_id, object)| match object {
                DocumentObject::Job(job) if job.references(id) => Some(*job_id),
                _ => None,
            })
            .collect()
    }

    fn add_object(&mut self, object: DocumentObject) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.insert(id, object);
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<DocumentObject> {
        self.objects.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipkit_core::Transform;

    #[test]
    fn test_ids_are_not_reused() {
        let mut doc = MemoryDocument::new();
        let a = doc.add_body(Body::new("a", Transform::identity()));
        doc.remove_object(a);
        let b = doc.add_body(Body::new("b", Transform::identity()));
        assert_ne!(a, b);
        assert_eq!(doc.len(), 1);
        assert!(!doc.contains(a));
    }

    #[test]
    fn test_in_list_finds_referencing_jobs() {
        let mut doc = MemoryDocument::new();
        let body = doc.add_body(Body::new("Part", Transform::identity()));
        let other = doc.add_body(Body::new("Other", Transform::identity()));
        let job = doc.add_job(Job::new("Job").with_models(vec![body]));

        assert_eq!(doc.in_list(body), vec![job]);
        assert!(doc.in_list(other).is_empty());
        assert_eq!(doc.find_by_label("Job"), Some(job));
    }

    #[test]
    fn test_typed_lookup_errors() {
        let mut doc = MemoryDocument::new();
        let body = doc.add_body(Body::new("Part", Transform::identity()));

        assert!(doc.body(body).is_ok());
        assert!(matches!(
            doc.stock(body),
            Err(crate::JobError::NotAStockObject { .. })
        ));
        assert!(matches!(
            doc.job(ObjectId(99)),
            Err(crate::JobError::ObjectNotFound { expected: "job", .. })
        ));
    }
}
