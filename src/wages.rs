use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{FieldValue, KeyedDataset};

/// Wage columns that may carry a `>`/`<` comparison marker in the source
/// export (e.g. ">208000 annually" for top-coded wages).
pub const WAGE_COLUMNS: [&str; 4] = ["AvgAnnWage", "MedianAnnWage", "AvgEntryWage", "AvgExpWage"];

static COMPARISON_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[><](\d+)").unwrap());

/// The digit run behind a leading `>`/`<` marker, if the value carries one.
/// Trailing text after the digits (unit suffixes and the like) is ignored.
pub fn marker_digits(value: &str) -> Option<&str> {
    COMPARISON_MARKER
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Rewrite comparison-prefixed wage values into plain numeric strings, in
/// place, across the dataset. Values without the marker pattern are left
/// untouched; numeric validation is scoring's responsibility.
pub fn normalize_wages(dataset: &mut KeyedDataset) {
    for record in dataset.records_mut() {
        for col in WAGE_COLUMNS {
            let replacement = match record.get(col) {
                Some(FieldValue::Scalar(v)) => marker_digits(v).map(str::to_string),
                _ => None,
            };
            if let Some(digits) = replacement {
                record.set_scalar(col, digits);
            }
        }
    }
}
