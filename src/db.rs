use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::record::Record;

/// SQLite-backed reporting database. Each run drops and recreates the data
/// tables; `load_runs` accumulates run metadata across loads.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS load_runs (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                started_at     TEXT NOT NULL,
                finished_at    TEXT,
                industry_rows  INTEGER NOT NULL DEFAULT 0,
                jobs_rows      INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )?;
        info!("opened reporting database at {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// Drop and recreate `table`, then insert every record. Columns are the
    /// union of field names across the records, first-seen order, all TEXT;
    /// a record missing a column stores NULL there.
    pub fn replace_table(&mut self, table: &str, records: &[Record]) -> Result<usize> {
        let columns = collect_columns(records);
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {};", quote_ident(table)))?;
        let col_defs: Vec<String> = columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect();
        self.conn.execute_batch(&format!(
            "CREATE TABLE {} ({});",
            quote_ident(table),
            col_defs.join(", ")
        ))?;

        let quoted_cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            quoted_cols.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for record in records {
                let values: Vec<Option<String>> = columns
                    .iter()
                    .map(|c| record.get(c).map(|v| v.flattened()))
                    .collect();
                stmt.execute(rusqlite::params_from_iter(values.iter()))?;
            }
        }
        tx.commit()?;

        debug!("inserted {} records into {}", records.len(), table);
        Ok(records.len())
    }

    /// Record the start of a load run; returns the run id.
    pub fn begin_run(&self) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO load_runs (started_at) VALUES (?1)",
            params![Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn finish_run(&self, run_id: i64, industry_rows: usize, jobs_rows: usize) -> Result<()> {
        self.conn.execute(
            "UPDATE load_runs SET finished_at = ?1, industry_rows = ?2, jobs_rows = ?3 WHERE id = ?4",
            params![
                Utc::now().to_rfc3339(),
                industry_rows as i64,
                jobs_rows as i64,
                run_id
            ],
        )?;
        Ok(())
    }

    /// Row counts for the load summary.
    pub fn table_counts(&self, tables: &[&str]) -> Result<Vec<(String, i64)>> {
        let mut counts = Vec::with_capacity(tables.len());
        for table in tables {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
                [],
                |row| row.get(0),
            )?;
            counts.push((table.to_string(), count));
        }
        Ok(counts)
    }
}

/// Union of field names across the records, first-seen order. Merged
/// records may carry different field sets, e.g. when a wage row has no
/// prospects counterpart.
fn collect_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
