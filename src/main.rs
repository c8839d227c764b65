use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use blueecon_loader::config::Config;
use blueecon_loader::constants::{INDUSTRY_TABLE, JOBS_TABLE};
use blueecon_loader::db::Database;
use blueecon_loader::logging;
use blueecon_loader::pipeline::{run_pipeline, PipelineInputs, PipelineResult};
use blueecon_loader::queries::create_db_queries;
use blueecon_loader::report::render_ascii_table;

#[derive(Parser)]
#[command(name = "blueecon_loader")]
#[command(about = "Blue Economics labor-market data loader")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputFiles {
    /// Industries dataset (TSV)
    #[arg(short = 'i', long)]
    industry: PathBuf,
    /// Jobs dataset (TSV)
    #[arg(short = 'j', long)]
    jobs: PathBuf,
    /// Employment prospects dataset (TSV)
    #[arg(short = 'p', long)]
    prospects: PathBuf,
    /// Wages dataset (TSV)
    #[arg(short = 'w', long)]
    wages: PathBuf,
}

impl InputFiles {
    fn to_pipeline_inputs(&self) -> PipelineInputs {
        PipelineInputs {
            industry: self.industry.clone(),
            jobs: self.jobs.clone(),
            prospects: self.prospects.clone(),
            wages: self.wages.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load, score, and persist the datasets into the reporting database
    Run {
        #[command(flatten)]
        inputs: InputFiles,
        /// Path to an alternate config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the generated INSERT statements without touching the database
    Sql {
        #[command(flatten)]
        inputs: InputFiles,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { inputs, config } => {
            println!("🔄 Running Blue Economics data load...");

            let config = Config::load(config.as_deref())?;
            info!("using configuration: {}", serde_json::to_string(&config)?);

            let result = match run_pipeline(&inputs.to_pipeline_inputs()) {
                Ok(result) => result,
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                    return Err(e.into());
                }
            };
            persist(&config, &result)?;
        }
        Commands::Sql { inputs } => {
            let result = run_pipeline(&inputs.to_pipeline_inputs())?;
            for query in create_db_queries(&result.industries, INDUSTRY_TABLE) {
                println!("{}", query);
            }
            for query in create_db_queries(&result.jobs, JOBS_TABLE) {
                println!("{}", query);
            }
        }
    }
    Ok(())
}

fn persist(config: &Config, result: &PipelineResult) -> anyhow::Result<()> {
    let mut db = Database::open(&config.database.path)?;
    let run_id = db.begin_run()?;
    let industry_rows = db.replace_table(INDUSTRY_TABLE, &result.industries)?;
    let jobs_rows = db.replace_table(JOBS_TABLE, &result.jobs)?;
    db.finish_run(run_id, industry_rows, jobs_rows)?;

    let counts = db.table_counts(&[INDUSTRY_TABLE, JOBS_TABLE])?;
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(table, count)| vec![table.clone(), count.to_string()])
        .collect();

    println!("\n📊 Load summary:");
    print!(
        "{}",
        render_ascii_table(&["table".to_string(), "rows".to_string()], &rows)
    );
    println!("✅ Blue Economics jobs data loaded successfully");
    info!("successfully loaded Blue Economics jobs data");
    Ok(())
}
