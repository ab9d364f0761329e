// Clean / rejected partitioning
//
// Rejected rows satisfy at least one validation rule; clean rows are the
// boolean complement of the rejection mask over the same batch. Using the
// complement (rather than whole-row set subtraction) keeps exact-duplicate
// rows intact and guarantees the two partitions are disjoint and exhaustive.

use arrow::array::{BooleanArray, RecordBatch};
use arrow::compute::{filter_record_batch, not};

use crate::columns::DerivedColumns;
use crate::error::Result;
use crate::validate::is_rejected;

/// The two output record sets of the pipeline.
#[derive(Debug)]
pub struct Partitioned {
    pub clean: RecordBatch,
    pub rejected: RecordBatch,
}

/// Per-row rejection mask over a derived batch. Never contains nulls.
pub fn rejection_mask(batch: &RecordBatch) -> Result<BooleanArray> {
    let cols = DerivedColumns::try_from_batch(batch)?;
    Ok((0..batch.num_rows())
        .map(|row| Some(is_rejected(&cols, row)))
        .collect())
}

/// Split a derived batch into clean and rejected partitions.
pub fn partition(batch: &RecordBatch) -> Result<Partitioned> {
    let mask = rejection_mask(batch)?;
    let rejected = filter_record_batch(batch, &mask)?;
    let clean = filter_record_batch(batch, &not(&mask)?)?;
    Ok(Partitioned { clean, rejected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::tests::derived_batch;

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let batch = derived_batch(
            vec![Some(1), None, Some(3), Some(4)],
            vec![Some(19_000), Some(19_000), None, Some(19_000)],
            vec![Some(10.0), Some(10.0), Some(10.0), Some(-5.0)],
            vec![Some(1); 4],
            vec![Some("monitor"); 4],
        );

        let parts = partition(&batch).unwrap();
        assert_eq!(parts.clean.num_rows(), 1);
        assert_eq!(parts.rejected.num_rows(), 3);
        assert_eq!(
            parts.clean.num_rows() + parts.rejected.num_rows(),
            batch.num_rows()
        );
    }

    #[test]
    fn record_violating_multiple_rules_is_rejected_once() {
        let batch = derived_batch(
            vec![None],
            vec![None],
            vec![Some(-1.0)],
            vec![Some(0)],
            vec![None],
        );

        let parts = partition(&batch).unwrap();
        assert_eq!(parts.rejected.num_rows(), 1);
        assert_eq!(parts.clean.num_rows(), 0);
    }

    #[test]
    fn duplicate_clean_rows_are_preserved() {
        let batch = derived_batch(
            vec![Some(7), Some(7), Some(7)],
            vec![Some(19_000); 3],
            vec![Some(9.99); 3],
            vec![Some(2); 3],
            vec![Some("monitor"); 3],
        );

        let parts = partition(&batch).unwrap();
        assert_eq!(parts.clean.num_rows(), 3);
        assert_eq!(parts.rejected.num_rows(), 0);
    }

    #[test]
    fn empty_batch_partitions_to_empty_sets() {
        let batch = derived_batch(vec![], vec![], vec![], vec![], vec![]);
        let parts = partition(&batch).unwrap();
        assert_eq!(parts.clean.num_rows(), 0);
        assert_eq!(parts.rejected.num_rows(), 0);
    }
}
