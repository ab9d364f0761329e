// Feature derivation over raw order batches
//
// Applies, in order: time_of_day bucketing from the order timestamp, the
// night filter, the timestamp-to-date cast, product/category lower-casing,
// the tv-product filter, and purchase_state extraction from the address.
// Output rows are a subset of input rows; nothing fans out.

use arrow::array::{
    Array, Date32Builder, Float64Builder, Int64Builder, RecordBatch, StringBuilder,
};
use chrono::{DateTime, Timelike};
use std::sync::Arc;

use crate::columns::OrderColumns;
use crate::error::Result;
use crate::schema::derived_schema_arc;

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Time-of-day bucket derived from the hour of the order timestamp.
///
/// The four buckets cover hours 0-23 contiguously; a null timestamp yields
/// no bucket at all. Rows with a null bucket pass through the night filter
/// untouched and are left to the rejection rules (null order_date rejects).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(Self::Night),
            6..=11 => Some(Self::Morning),
            12..=17 => Some(Self::Afternoon),
            18..=23 => Some(Self::Evening),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// Derived batch plus the filter counters the pipeline logs.
#[derive(Debug)]
pub struct DeriveOutcome {
    pub batch: RecordBatch,
    pub input_rows: usize,
    pub night_dropped: usize,
    pub tv_dropped: usize,
    /// Addresses with fewer than two tokens; purchase_state is null for these.
    pub malformed_addresses: usize,
}

/// Second-from-last space-delimited token of the address, or None when the
/// address has fewer than two tokens.
fn extract_state(address: &str) -> Option<&str> {
    let tokens: Vec<&str> = address.split(' ').collect();
    if tokens.len() < 2 {
        return None;
    }
    Some(tokens[tokens.len() - 2])
}

fn hour_of_day(micros: i64) -> Option<u32> {
    DateTime::from_timestamp_micros(micros).map(|dt| dt.hour())
}

struct DerivedBuilder {
    order_id: Int64Builder,
    order_date: Date32Builder,
    product: StringBuilder,
    category: StringBuilder,
    price_each: Float64Builder,
    quantity_ordered: Int64Builder,
    purchase_address: StringBuilder,
    time_of_day: StringBuilder,
    purchase_state: StringBuilder,
}

impl DerivedBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            order_id: Int64Builder::with_capacity(capacity),
            order_date: Date32Builder::with_capacity(capacity),
            product: StringBuilder::new(),
            category: StringBuilder::new(),
            price_each: Float64Builder::with_capacity(capacity),
            quantity_ordered: Int64Builder::with_capacity(capacity),
            purchase_address: StringBuilder::new(),
            time_of_day: StringBuilder::new(),
            purchase_state: StringBuilder::new(),
        }
    }

    fn finish(mut self) -> Result<RecordBatch> {
        let batch = RecordBatch::try_new(
            derived_schema_arc(),
            vec![
                Arc::new(self.order_id.finish()),
                Arc::new(self.order_date.finish()),
                Arc::new(self.product.finish()),
                Arc::new(self.category.finish()),
                Arc::new(self.price_each.finish()),
                Arc::new(self.quantity_ordered.finish()),
                Arc::new(self.purchase_address.finish()),
                Arc::new(self.time_of_day.finish()),
                Arc::new(self.purchase_state.finish()),
            ],
        )?;
        Ok(batch)
    }
}

/// Derive features and apply the night/tv filters over one raw batch.
pub fn derive_features(batch: &RecordBatch) -> Result<DeriveOutcome> {
    let cols = OrderColumns::try_from_batch(batch)?;
    let input_rows = batch.num_rows();

    let mut out = DerivedBuilder::with_capacity(input_rows);
    let mut night_dropped = 0usize;
    let mut tv_dropped = 0usize;
    let mut malformed_addresses = 0usize;

    for row in 0..input_rows {
        let micros = cols
            .order_date
            .is_valid(row)
            .then(|| cols.order_date.value(row));

        let bucket = micros.and_then(hour_of_day).and_then(TimeOfDay::from_hour);
        if bucket == Some(TimeOfDay::Night) {
            night_dropped += 1;
            continue;
        }

        let product = cols
            .product
            .is_valid(row)
            .then(|| cols.product.value(row).to_lowercase());
        if product.as_deref().is_some_and(|p| p.contains("tv")) {
            tv_dropped += 1;
            continue;
        }

        let category = cols
            .category
            .is_valid(row)
            .then(|| cols.category.value(row).to_lowercase());

        let address = cols
            .purchase_address
            .is_valid(row)
            .then(|| cols.purchase_address.value(row));
        let state = address.and_then(extract_state);
        if address.is_some() && state.is_none() {
            malformed_addresses += 1;
        }

        out.order_id.append_option(
            cols.order_id
                .is_valid(row)
                .then(|| cols.order_id.value(row)),
        );
        // Truncate to whole days since epoch; the hour already fed the bucket
        out.order_date
            .append_option(micros.map(|m| m.div_euclid(MICROS_PER_DAY) as i32));
        out.product.append_option(product);
        out.category.append_option(category);
        out.price_each.append_option(
            cols.price_each
                .is_valid(row)
                .then(|| cols.price_each.value(row)),
        );
        out.quantity_ordered.append_option(
            cols.quantity_ordered
                .is_valid(row)
                .then(|| cols.quantity_ordered.value(row)),
        );
        out.purchase_address.append_option(address);
        out.time_of_day
            .append_option(bucket.map(|b| b.as_str()));
        out.purchase_state.append_option(state);
    }

    Ok(DeriveOutcome {
        batch: out.finish()?,
        input_rows,
        night_dropped,
        tv_dropped,
        malformed_addresses,
    })
}
