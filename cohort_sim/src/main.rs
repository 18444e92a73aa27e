//! Cohort simulator CLI
//!
//! Run seeded cohort scenarios and export their per-semester history.

use clap::Parser;
use cohort_sim::scenarios::ScenarioId;
use cohort_sim::{CollaboratorConfig, ScenarioResult, ScenarioRunner, SimError};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Cohort simulation CLI
#[derive(Parser, Debug)]
#[command(name = "cohort-sim")]
#[command(about = "Run seeded student cohort simulations", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,
    
    /// Number of students
    #[arg(short = 'n', long, default_value = "100")]
    students: usize,
    
    /// Percentage of students enrolled at F1SEQ1 (overrides the scenario preset)
    #[arg(short, long)]
    active_pct: Option<f64>,
    
    /// Grid width (defaults to the smallest square fitting the population)
    #[arg(long, requires = "height")]
    width: Option<usize>,
    
    /// Grid height
    #[arg(long, requires = "width")]
    height: Option<usize>,
    
    /// Scenario to run (baseline, fully_active, dormant_cohort, high_attrition, all)
    #[arg(short = 'S', long, default_value = "baseline")]
    scenario: String,
    
    /// Number of consecutive seeds to run
    #[arg(long, default_value = "1")]
    seeds: usize,
    
    /// Directory the history CSV files are written to
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
    
    /// Skip writing history files
    #[arg(long)]
    no_export: bool,
    
    /// JSON file with sampler and switcher parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    
    /// Print run summaries as JSON
    #[arg(long)]
    json: bool,
    
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<Vec<ScenarioResult>, SimError> {
    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse().map_err(SimError::config)?]
    };
    
    let collaborators = match &args.config {
        Some(path) => CollaboratorConfig::from_json_file(path)?,
        None => CollaboratorConfig::default(),
    };
    
    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };
    
    let mut results = Vec::new();
    for seed_offset in 0..args.seeds {
        let seed = base_seed.wrapping_add(seed_offset as u64);
        
        let mut runner = ScenarioRunner::new(seed, args.students)
            .with_collaborators(collaborators.clone());
        if let Some(pct) = args.active_pct {
            runner = runner.with_active_pct(pct);
        }
        if let (Some(width), Some(height)) = (args.width, args.height) {
            runner = runner.with_grid(width, height);
        }
        if !args.no_export {
            runner = runner.with_output_dir(&args.output);
        }
        
        for scenario in &scenarios {
            let result = runner.run(*scenario)?;
            
            if !args.json {
                info!(
                    "✓ {} (seed={}) active={} exited={} mean_gpa={:.2}",
                    scenario.name(),
                    seed,
                    result.summary.active,
                    result.summary.exited,
                    result.summary.mean_gpa
                );
                if let Some(path) = &result.csv_path {
                    info!("  history: {}", path.display());
                }
            }
            
            results.push(result);
        }
    }
    Ok(results)
}

fn main() {
    let args = Args::parse();
    
    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
    
    if !args.json {
        info!("Cohort Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
    
    let results = match run(&args) {
        Ok(results) => results,
        Err(e) => {
            error!("✗ {}", e);
            std::process::exit(1);
        }
    };
    
    if args.json {
        let summaries: Vec<_> = results.iter().map(|r| &r.summary).collect();
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize summaries: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("✅ {} cohort runs completed", results.len());
    }
}
