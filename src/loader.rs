use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::{LoaderError, Result};
use crate::record::{KeyedDataset, Record};

/// Read a tab-delimited, double-quote-quoted file into ordered records.
///
/// `skip_lines` rows are discarded before header detection begins, so a high
/// enough skip count consumes the header row itself. The first surviving row
/// becomes the header; every later row is zipped positionally against it.
/// Rows shorter than the header simply drop their missing trailing fields.
/// Columns named in `excluded_cols` are left out of every record.
pub fn load_tsv(path: &Path, skip_lines: usize, excluded_cols: &[&str]) -> Result<Vec<Record>> {
    read_rows(path, skip_lines, excluded_cols)
}

/// Keyed variant of [`load_tsv`]: the result maps `primary_key` column
/// values to records, file order preserved, with later rows overwriting
/// earlier rows at the same key. A row without the key column is a data
/// error.
pub fn load_keyed_tsv(
    path: &Path,
    skip_lines: usize,
    primary_key: &str,
    excluded_cols: &[&str],
) -> Result<KeyedDataset> {
    let rows = read_rows(path, skip_lines, excluded_cols)?;
    let mut dataset = KeyedDataset::new();
    for record in rows {
        let key = record
            .first_value(primary_key)
            .ok_or_else(|| {
                LoaderError::MissingField(format!("{} in {}", primary_key, path.display()))
            })?
            .to_string();
        dataset.insert(key, record);
    }
    Ok(dataset)
}

fn read_rows(path: &Path, skip_lines: usize, excluded_cols: &[&str]) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(LoaderError::SourceUnavailable(path.display().to_string()));
    }
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoaderError::SourceUnavailable(format!("{}: {}", path.display(), e)))?;

    let excluded: HashSet<&str> = excluded_cols.iter().copied().collect();
    let mut remaining_skips = skip_lines;
    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        if remaining_skips > 0 {
            remaining_skips -= 1;
            continue;
        }
        match &header {
            None => header = Some(row.iter().map(str::to_string).collect()),
            Some(names) => {
                let mut record = Record::new();
                for (name, value) in names.iter().zip(row.iter()) {
                    if excluded.contains(name.as_str()) {
                        continue;
                    }
                    record.set_scalar(name.clone(), value);
                }
                records.push(record);
            }
        }
    }

    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tsv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_loads_rows_against_header() {
        let f = write_tsv("SocCode\tJobTitle\n11-1011\tChief Executives\n11-2021\tMarketing Managers\n");
        let rows = load_tsv(f.path(), 0, &[]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].first_value("SocCode"), Some("11-1011"));
        assert_eq!(rows[1].first_value("JobTitle"), Some("Marketing Managers"));
    }

    #[test]
    fn test_skip_lines_consumed_before_header_detection() {
        let f = write_tsv("Occupational Wage Data 2023\nSocCode\tMedianAnnWage\n11-1011\t98000\n");
        let rows = load_tsv(f.path(), 1, &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_value("MedianAnnWage"), Some("98000"));
    }

    #[test]
    fn test_excluded_columns_are_dropped() {
        let f = write_tsv("SocCode\tJobTitle\tProspects\n11-1011\tChief Executives\tFavorable\n");
        let rows = load_tsv(f.path(), 0, &["JobTitle"]).unwrap();
        assert!(!rows[0].contains("JobTitle"));
        assert_eq!(rows[0].first_value("Prospects"), Some("Favorable"));
    }

    #[test]
    fn test_short_rows_drop_trailing_fields() {
        let f = write_tsv("SocCode\tJobTitle\tProspects\n11-1011\tChief Executives\n");
        let rows = load_tsv(f.path(), 0, &[]).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert!(!rows[0].contains("Prospects"));
    }

    #[test]
    fn test_quoted_field_may_contain_delimiter() {
        let f = write_tsv("SocCode\tJobTitle\n11-1011\t\"Executives,\tChief\"\n");
        let rows = load_tsv(f.path(), 0, &[]).unwrap();
        assert_eq!(rows[0].first_value("JobTitle"), Some("Executives,\tChief"));
    }

    #[test]
    fn test_keyed_load_last_row_wins() {
        let f = write_tsv("SocCode\tJobTitle\n11-1011\tFirst\n11-1011\tSecond\n");
        let dataset = load_keyed_tsv(f.path(), 0, "SocCode", &[]).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.get("11-1011").unwrap().first_value("JobTitle"),
            Some("Second")
        );
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = load_tsv(Path::new("does/not/exist.tsv"), 0, &[]).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable(_)));
    }

    #[test]
    fn test_keyed_load_requires_key_column() {
        let f = write_tsv("JobTitle\nChief Executives\n");
        let err = load_keyed_tsv(f.path(), 0, "SocCode", &[]).unwrap_err();
        assert!(matches!(err, LoaderError::MissingField(_)));
    }
}
