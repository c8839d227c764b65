//! Column, table, and schema names shared across the pipeline.

/// The occupation code column joining all four source datasets.
pub const SOC_CODE_COLUMN: &str = "SocCode";

pub const INDUSTRY_TABLE: &str = "industry";
pub const JOBS_TABLE: &str = "jobs";

/// Logical schema name used in generated INSERT statements.
pub const SCHEMA_NAME: &str = "blueeconomics";

/// Columns dropped from the jobs and wages exports. The empty name covers
/// the unnamed column produced by a trailing tab in the source header.
pub const EXCLUDED_JOB_COLUMNS: [&str; 2] = ["JobTitle", ""];

/// The prospects and wages exports carry a title line above the header.
pub const PROSPECTS_SKIP_LINES: usize = 1;
pub const WAGES_SKIP_LINES: usize = 1;
