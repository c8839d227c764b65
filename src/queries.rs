use crate::constants::SCHEMA_NAME;
use crate::record::Record;

/// Generate one INSERT statement per record, columns in field order.
/// Multi-values are flattened with `|` and every value is double-quoted.
/// This is the textual handoff format for operators loading the data into
/// an external database by hand; the built-in persistence path in
/// [`crate::db`] uses parameterized statements instead.
pub fn create_db_queries(records: &[Record], table_name: &str) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let field_names: Vec<&str> = record.field_names().collect();
            let field_vals: Vec<String> = record
                .iter()
                .map(|(_, value)| format!("\"{}\"", value.flattened()))
                .collect();
            format!(
                "INSERT INTO {}.{}({}) VALUES ({});",
                SCHEMA_NAME,
                table_name,
                field_names.join(","),
                field_vals.join(",")
            )
        })
        .collect()
}
