//! Target stock recreation.
//!
//! The second setup machines from the same blank as the first. Before the
//! flip transform is applied, the target job gets a fresh stock of the same
//! kind and size as the source stock, placed like the source job, and its
//! old stock is removed from the document.

use flipkit_core::{BoundingBox, Transform};
use tracing::debug;

use crate::document::{DocumentObject, HostDocument, ObjectId, Stock, StockKind};
use crate::error::{JobError, JobResult};

/// A copy of `source` for the target job, placed at `placement`.
///
/// Box stock keeps its extents, from-base stock keeps its extensions. Any
/// other kind fails with [`JobError::UnsupportedStockType`].
pub fn rebuild_stock(source: &Stock, placement: Transform) -> JobResult<Stock> {
    let (kind, shape) = match &source.kind {
        StockKind::Box { .. } => {
            let extent = source.bounds().extent();
            (
                StockKind::Box { extent },
                BoundingBox::from_extents(0.0, extent.x, 0.0, extent.y, 0.0, extent.z),
            )
        }
        StockKind::FromBase { neg, pos } => (
            StockKind::FromBase {
                neg: *neg,
                pos: *pos,
            },
            source.shape,
        ),
        StockKind::Other(name) => {
            return Err(JobError::UnsupportedStockType { kind: name.clone() })
        }
    };
    Ok(Stock::new(source.label.clone(), kind, shape).with_placement(placement))
}

/// Swap `stock` in as the stock of `target_job`.
///
/// The old stock is removed only if it is a stock object and no other job
/// still references it.
pub fn install_stock<D: HostDocument + ?Sized>(
    doc: &mut D,
    target_job: ObjectId,
    mut stock: Stock,
) -> JobResult<ObjectId> {
    let old = doc.job(target_job)?.stock;
    let old_stock = old.filter(|old_id| doc.stock(*old_id).is_ok());
    if let Some(old_id) = old_stock {
        stock.label = doc.stock(old_id)?.label.clone();
    }

    let id = doc.add_object(DocumentObject::Stock(stock));
    doc.job_mut(target_job)?.stock = Some(id);
    if let Some(old_id) = old_stock {
        if doc.in_list(old_id).is_empty() {
            doc.remove_object(old_id);
        } else {
            debug!("Kept stock {}, still used by another job", old_id);
        }
    }
    debug!("Installed stock {} in job {} (replaced {:?})", id, target_job, old);
    Ok(id)
}

/// Give `target_job` a new stock matching the stock of `source_job`.
pub fn recreate_stock<D: HostDocument + ?Sized>(
    doc: &mut D,
    source_job: ObjectId,
    target_job: ObjectId,
) -> JobResult<ObjectId> {
    let placement = doc.job(source_job)?.placement;
    let (_, source) = doc.job_stock(source_job)?;
    let stock = rebuild_stock(source, placement)?;
    doc.job(target_job)?;
    install_stock(doc, target_job, stock)
}
