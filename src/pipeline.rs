use std::path::PathBuf;
use tracing::info;

use crate::constants::{
    EXCLUDED_JOB_COLUMNS, PROSPECTS_SKIP_LINES, SOC_CODE_COLUMN, WAGES_SKIP_LINES,
};
use crate::error::Result;
use crate::loader::load_keyed_tsv;
use crate::merge::merge_datasets;
use crate::record::Record;
use crate::scoring::score_dataset;
use crate::wages::normalize_wages;

/// File paths for the four source datasets.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub industry: PathBuf,
    pub jobs: PathBuf,
    pub prospects: PathBuf,
    pub wages: PathBuf,
}

/// Output of a full pipeline run, ready for persistence: the industries
/// dataset untouched, and the merged, scored occupation records.
#[derive(Debug)]
pub struct PipelineResult {
    pub industries: Vec<Record>,
    pub jobs: Vec<Record>,
}

/// Load all four datasets keyed by occupation code, normalize the wage
/// columns, merge jobs/prospects/wages, and score the merged records.
pub fn run_pipeline(inputs: &PipelineInputs) -> Result<PipelineResult> {
    let span = tracing::info_span!("pipeline");
    let _enter = span.enter();

    let industries = load_keyed_tsv(&inputs.industry, 0, SOC_CODE_COLUMN, &[])?;
    let jobs = load_keyed_tsv(&inputs.jobs, 0, SOC_CODE_COLUMN, &EXCLUDED_JOB_COLUMNS)?;
    let prospects = load_keyed_tsv(
        &inputs.prospects,
        PROSPECTS_SKIP_LINES,
        SOC_CODE_COLUMN,
        &[],
    )?;
    let mut wages = load_keyed_tsv(
        &inputs.wages,
        WAGES_SKIP_LINES,
        SOC_CODE_COLUMN,
        &EXCLUDED_JOB_COLUMNS,
    )?;
    info!(
        industries = industries.len(),
        jobs = jobs.len(),
        prospects = prospects.len(),
        wages = wages.len(),
        "loaded source datasets"
    );

    normalize_wages(&mut wages);

    let mut master = merge_datasets(vec![jobs, prospects, wages]);
    score_dataset(&mut master)?;
    info!("scored {} merged occupation records", master.len());

    Ok(PipelineResult {
        industries: industries.into_records(),
        jobs: master,
    })
}
