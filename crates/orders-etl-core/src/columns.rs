// Typed column accessors over order RecordBatches
//
// Downcasting by name happens once per batch here; the transformation code
// then works against concrete array types instead of dyn Array.

use arrow::array::{
    Array, Date32Array, Float64Array, Int64Array, RecordBatch, StringArray,
    TimestampMicrosecondArray,
};

use crate::error::{CoreError, Result};
use crate::schema::field;

fn typed_column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    expected: &'static str,
) -> Result<&'a T> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| CoreError::MissingColumn {
            name: name.to_string(),
        })?;
    column
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| CoreError::ColumnType {
            name: name.to_string(),
            expected,
            actual: column.data_type().to_string(),
        })
}

/// Typed view over a raw orders batch (pre-derivation).
pub struct OrderColumns<'a> {
    pub order_id: &'a Int64Array,
    pub order_date: &'a TimestampMicrosecondArray,
    pub product: &'a StringArray,
    pub category: &'a StringArray,
    pub price_each: &'a Float64Array,
    pub quantity_ordered: &'a Int64Array,
    pub purchase_address: &'a StringArray,
}

impl<'a> OrderColumns<'a> {
    pub fn try_from_batch(batch: &'a RecordBatch) -> Result<Self> {
        Ok(Self {
            order_id: typed_column(batch, field::ORDER_ID, "Int64")?,
            order_date: typed_column(batch, field::ORDER_DATE, "Timestamp(Microsecond)")?,
            product: typed_column(batch, field::PRODUCT, "Utf8")?,
            category: typed_column(batch, field::CATEGORY, "Utf8")?,
            price_each: typed_column(batch, field::PRICE_EACH, "Float64")?,
            quantity_ordered: typed_column(batch, field::QUANTITY_ORDERED, "Int64")?,
            purchase_address: typed_column(batch, field::PURCHASE_ADDRESS, "Utf8")?,
        })
    }
}

/// Typed view over a derived batch (post-derivation, pre-partition).
///
/// Only the columns the validation rules touch are exposed.
pub struct DerivedColumns<'a> {
    pub order_id: &'a Int64Array,
    pub order_date: &'a Date32Array,
    pub price_each: &'a Float64Array,
    pub quantity_ordered: &'a Int64Array,
    pub product: &'a StringArray,
}

impl<'a> DerivedColumns<'a> {
    pub fn try_from_batch(batch: &'a RecordBatch) -> Result<Self> {
        Ok(Self {
            order_id: typed_column(batch, field::ORDER_ID, "Int64")?,
            order_date: typed_column(batch, field::ORDER_DATE, "Date32")?,
            price_each: typed_column(batch, field::PRICE_EACH, "Float64")?,
            quantity_ordered: typed_column(batch, field::QUANTITY_ORDERED, "Int64")?,
            product: typed_column(batch, field::PRODUCT, "Utf8")?,
        })
    }
}
