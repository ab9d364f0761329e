// Arrow schemas for the orders pipeline
//
// Two schemas: the expected shape of the raw input dataset, and the shape of
// derived records after feature engineering. Extra columns in a source file
// are dropped by `normalize`; the transformation only ever sees these fields.

use arrow::array::RecordBatch;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use std::sync::{Arc, OnceLock};

use crate::error::{CoreError, Result};

/// Column names shared between schema definition and column accessors.
pub mod field {
    pub const ORDER_ID: &str = "order_id";
    pub const ORDER_DATE: &str = "order_date";
    pub const PRODUCT: &str = "product";
    pub const CATEGORY: &str = "category";
    pub const PRICE_EACH: &str = "price_each";
    pub const QUANTITY_ORDERED: &str = "quantity_ordered";
    pub const PURCHASE_ADDRESS: &str = "purchase_address";
    pub const TIME_OF_DAY: &str = "time_of_day";
    pub const PURCHASE_STATE: &str = "purchase_state";
}

/// Returns the expected Arrow schema for the raw orders dataset.
pub fn orders_schema() -> Schema {
    orders_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for the raw orders dataset.
pub fn orders_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(build_orders_schema())))
}

fn build_orders_schema() -> Schema {
    Schema::new(vec![
        Field::new(field::ORDER_ID, DataType::Int64, true),
        Field::new(
            field::ORDER_DATE,
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
        Field::new(field::PRODUCT, DataType::Utf8, true),
        Field::new(field::CATEGORY, DataType::Utf8, true),
        Field::new(field::PRICE_EACH, DataType::Float64, true),
        Field::new(field::QUANTITY_ORDERED, DataType::Int64, true),
        Field::new(field::PURCHASE_ADDRESS, DataType::Utf8, true),
    ])
}

/// Returns the Arrow schema for derived records (both partitions).
pub fn derived_schema() -> Schema {
    derived_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for derived records.
pub fn derived_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(build_derived_schema())))
}

fn build_derived_schema() -> Schema {
    Schema::new(vec![
        Field::new(field::ORDER_ID, DataType::Int64, true),
        // Time component is discarded after the hour has been bucketed
        Field::new(field::ORDER_DATE, DataType::Date32, true),
        Field::new(field::PRODUCT, DataType::Utf8, true),
        Field::new(field::CATEGORY, DataType::Utf8, true),
        Field::new(field::PRICE_EACH, DataType::Float64, true),
        Field::new(field::QUANTITY_ORDERED, DataType::Int64, true),
        Field::new(field::PURCHASE_ADDRESS, DataType::Utf8, true),
        Field::new(field::TIME_OF_DAY, DataType::Utf8, true),
        Field::new(field::PURCHASE_STATE, DataType::Utf8, true),
    ])
}

/// Project and cast a source batch to the expected input schema.
///
/// Columns are matched by name; extra source columns are dropped. Castable
/// type differences (e.g. nanosecond timestamps from pandas-written files,
/// Int32 ids) are reconciled with the Arrow cast kernel. A missing column or
/// an uncastable type is an error.
pub fn normalize(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = orders_schema_arc();
    let mut columns = Vec::with_capacity(schema.fields().len());

    for target in schema.fields() {
        let source =
            batch
                .column_by_name(target.name())
                .ok_or_else(|| CoreError::MissingColumn {
                    name: target.name().clone(),
                })?;

        if source.data_type() == target.data_type() {
            columns.push(Arc::clone(source));
        } else {
            columns.push(cast(source, target.data_type())?);
        }
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int32Array, StringArray, TimestampNanosecondArray};

    #[test]
    fn orders_schema_has_expected_columns() {
        let schema = orders_schema();
        assert_eq!(schema.fields().len(), 7);
        assert_eq!(schema.field(0).name(), "order_id");
        assert_eq!(schema.field(6).name(), "purchase_address");
    }

    #[test]
    fn derived_schema_appends_derived_columns() {
        let schema = derived_schema();
        assert_eq!(schema.fields().len(), 9);
        assert_eq!(schema.field(1).data_type(), &DataType::Date32);
        assert_eq!(schema.field(7).name(), "time_of_day");
        assert_eq!(schema.field(8).name(), "purchase_state");
    }

    #[test]
    fn normalize_casts_and_projects() {
        // Nanosecond timestamps and Int32 ids, plus an extra column to drop
        let source_schema = Arc::new(Schema::new(vec![
            Field::new("order_id", DataType::Int32, true),
            Field::new(
                "order_date",
                DataType::Timestamp(TimeUnit::Nanosecond, None),
                true,
            ),
            Field::new("product", DataType::Utf8, true),
            Field::new("category", DataType::Utf8, true),
            Field::new("price_each", DataType::Float64, true),
            Field::new("quantity_ordered", DataType::Int64, true),
            Field::new("purchase_address", DataType::Utf8, true),
            Field::new("ingest_source", DataType::Utf8, true),
        ]));

        let batch = RecordBatch::try_new(
            source_schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(1)])) as ArrayRef,
                Arc::new(TimestampNanosecondArray::from(vec![Some(
                    1_700_000_000_000_000_000,
                )])),
                Arc::new(StringArray::from(vec![Some("Monitor")])),
                Arc::new(StringArray::from(vec![Some("Electronics")])),
                Arc::new(arrow::array::Float64Array::from(vec![Some(99.9)])),
                Arc::new(arrow::array::Int64Array::from(vec![Some(2)])),
                Arc::new(StringArray::from(vec![Some("1 A St, Town, CA 90001")])),
                Arc::new(StringArray::from(vec![Some("backfill")])),
            ],
        )
        .unwrap();

        let normalized = normalize(&batch).unwrap();
        assert_eq!(normalized.schema(), orders_schema_arc());
        assert_eq!(normalized.num_rows(), 1);
    }

    #[test]
    fn normalize_reports_missing_column() {
        let source_schema = Arc::new(Schema::new(vec![Field::new(
            "order_id",
            DataType::Int64,
            true,
        )]));
        let batch = RecordBatch::try_new(
            source_schema,
            vec![Arc::new(arrow::array::Int64Array::from(vec![Some(1)])) as ArrayRef],
        )
        .unwrap();

        let err = normalize(&batch).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn { ref name } if name == "order_date"));
    }
}
