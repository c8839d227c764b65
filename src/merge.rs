use tracing::debug;

use crate::record::{KeyedDataset, Record};

/// Union several keyed datasets into one ordered record sequence.
///
/// For every key present in any input, the records sharing that key are
/// merged field by field: a field present in exactly one input keeps its
/// scalar value; a field present in several inputs becomes a multi-value in
/// merge order, deduplicated afterwards so equal values collapse back to a
/// scalar. Merging a dataset with itself is therefore a no-op.
///
/// The result is sorted by key (occupation code) ascending. The key is the
/// join column, so this gives a deterministic final order without comparing
/// whole records.
pub fn merge_datasets(inputs: Vec<KeyedDataset>) -> Vec<Record> {
    let mut merged = KeyedDataset::new();
    for dataset in inputs {
        for (key, record) in dataset.into_entries() {
            if let Some(existing) = merged.get_mut(&key) {
                merge_record(existing, record);
                continue;
            }
            merged.insert(key, record);
        }
    }

    for record in merged.records_mut() {
        record.dedup_multi_values();
    }

    let mut entries = merged.into_entries();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    debug!("merged {} occupation records", entries.len());
    entries.into_iter().map(|(_, record)| record).collect()
}

/// Field-by-field union of `incoming` into `existing`. Shared fields are
/// promoted to multi-values; the dedup pass decides whether they stay that
/// way.
fn merge_record(existing: &mut Record, incoming: Record) {
    for (name, value) in incoming.into_fields() {
        if let Some(current) = existing.get_mut(&name) {
            current.extend_from(value);
            continue;
        }
        existing.insert(name, value);
    }
}
