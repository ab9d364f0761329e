// Rule-violation counts over derived batches
//
// Five independent rules, counted for observability only. The partition
// module reuses the same predicates, so the logged counts and the rejection
// filter cannot drift apart.

use arrow::array::{Array, RecordBatch};

use crate::columns::DerivedColumns;
use crate::error::Result;

/// Per-rule violation counts over one derived batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub null_order_id: usize,
    pub null_order_date: usize,
    pub invalid_price_each: usize,
    pub invalid_quantity_ordered: usize,
    pub null_product: usize,
}

impl ValidationReport {
    /// Rule name / count pairs, in a stable order for logging.
    pub fn counts(&self) -> [(&'static str, usize); 5] {
        [
            ("null_order_id", self.null_order_id),
            ("null_order_date", self.null_order_date),
            ("invalid_price_each", self.invalid_price_each),
            ("invalid_quantity_ordered", self.invalid_quantity_ordered),
            ("null_product", self.null_product),
        ]
    }
}

pub(crate) fn null_order_id(cols: &DerivedColumns<'_>, row: usize) -> bool {
    cols.order_id.is_null(row)
}

pub(crate) fn null_order_date(cols: &DerivedColumns<'_>, row: usize) -> bool {
    cols.order_date.is_null(row)
}

// Null prices and quantities do not count as invalid; they are only absent.
pub(crate) fn invalid_price_each(cols: &DerivedColumns<'_>, row: usize) -> bool {
    cols.price_each.is_valid(row) && cols.price_each.value(row) <= 0.0
}

pub(crate) fn invalid_quantity_ordered(cols: &DerivedColumns<'_>, row: usize) -> bool {
    cols.quantity_ordered.is_valid(row) && cols.quantity_ordered.value(row) <= 0
}

pub(crate) fn null_product(cols: &DerivedColumns<'_>, row: usize) -> bool {
    cols.product.is_null(row)
}

/// A record is rejected when any of the five rules fires.
pub(crate) fn is_rejected(cols: &DerivedColumns<'_>, row: usize) -> bool {
    null_order_id(cols, row)
        || null_order_date(cols, row)
        || invalid_price_each(cols, row)
        || invalid_quantity_ordered(cols, row)
        || null_product(cols, row)
}

/// Count rule violations over a derived batch. Pure; the result is only
/// ever logged.
pub fn validate_orders(batch: &RecordBatch) -> Result<ValidationReport> {
    let cols = DerivedColumns::try_from_batch(batch)?;
    let mut report = ValidationReport::default();

    for row in 0..batch.num_rows() {
        if null_order_id(&cols, row) {
            report.null_order_id += 1;
        }
        if null_order_date(&cols, row) {
            report.null_order_date += 1;
        }
        if invalid_price_each(&cols, row) {
            report.invalid_price_each += 1;
        }
        if invalid_quantity_ordered(&cols, row) {
            report.invalid_quantity_ordered += 1;
        }
        if null_product(&cols, row) {
            report.null_product += 1;
        }
    }

    Ok(report)
}
