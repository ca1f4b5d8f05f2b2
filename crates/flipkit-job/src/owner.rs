//! Owning-job lookup through document backlinks.

use tracing::debug;

use crate::document::{DocumentObject, HostDocument, ObjectId};
use crate::error::{JobError, JobResult};

/// The job that contains `id`.
///
/// A stock object belongs to the first job referencing it. Any other object
/// must be referenced by exactly one job.
pub fn find_owning_job<D: HostDocument + ?Sized>(doc: &D, id: ObjectId) -> JobResult<ObjectId> {
    let object = doc.object(id).ok_or(JobError::ObjectNotFound {
        id,
        expected: "object",
    })?;
    let jobs = doc.in_list(id);
    debug!("Object {} referenced by {} jobs", id, jobs.len());

    match (object, jobs.as_slice()) {
        (_, []) => Err(JobError::NoOwningJob { id }),
        (DocumentObject::Stock(_), [first, ..]) => Ok(*first),
        (_, [only]) => Ok(*only),
        (_, several) => Err(JobError::AmbiguousJob {
            id,
            count: several.len(),
        }),
    }
}

/// The job owning a stock object; fails if `id` is not a stock.
pub fn find_job_from_stock<D: HostDocument + ?Sized>(doc: &D, id: ObjectId) -> JobResult<ObjectId> {
    doc.stock(id)?;
    find_owning_job(doc, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Body, Job, Stock, StockKind};
    use crate::memory::MemoryDocument;
    use flipkit_core::{vector, BoundingBox, Transform};

    fn stock() -> Stock {
        Stock::new(
            "Stock",
            StockKind::Box {
                extent: vector(10.0, 10.0, 10.0),
            },
            BoundingBox::from_extents(0.0, 10.0, 0.0, 10.0, 0.0, 10.0),
        )
    }

    #[test]
    fn test_model_owned_by_single_job() {
        let mut doc = MemoryDocument::new();
        let body = doc.add_body(Body::new("Part", Transform::identity()));
        let job = doc.add_job(Job::new("Job").with_models(vec![body]));
        assert_eq!(find_owning_job(&doc, body).unwrap(), job);
    }

    #[test]
    fn test_model_in_two_jobs_is_ambiguous() {
        let mut doc = MemoryDocument::new();
        let body = doc.add_body(Body::new("Part", Transform::identity()));
        doc.add_job(Job::new("A").with_models(vec![body]));
        doc.add_job(Job::new("B").with_models(vec![body]));
        assert_eq!(
            find_owning_job(&doc, body).unwrap_err(),
            JobError::AmbiguousJob { id: body, count: 2 }
        );
    }

    #[test]
    fn test_stock_takes_first_job() {
        let mut doc = MemoryDocument::new();
        let stock = doc.add_stock(stock());
        let first = doc.add_job(Job::new("A").with_stock(stock));
        doc.add_job(Job::new("B").with_stock(stock));
        assert_eq!(find_job_from_stock(&doc, stock).unwrap(), first);
    }

    #[test]
    fn test_orphans_and_wrong_types() {
        let mut doc = MemoryDocument::new();
        let stock = doc.add_stock(stock());
        let body = doc.add_body(Body::new("Part", Transform::identity()));

        assert_eq!(
            find_owning_job(&doc, stock).unwrap_err(),
            JobError::NoOwningJob { id: stock }
        );
        assert_eq!(
            find_job_from_stock(&doc, body).unwrap_err(),
            JobError::NotAStockObject { id: body }
        );
    }
}
