//! History and summary exporters.
//!
//! The history table goes to `{output_dir}/{run_name}.csv`; the run summary
//! is pretty-printed JSON.

use cohort_env::{EnvError, HistoryRow, HistorySink};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of the exported history table.
pub const CSV_HEADER: [&str; 6] = ["Step", "AgentID", "GPA", "ATTEMPTED_HRS", "EARNED_HRS", "Major"];

/// Writes `rows` as CSV, header first.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[HistoryRow]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER.join(","))?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            row.step,
            row.student,
            row.gpa,
            row.attempted_hrs,
            row.earned_hrs,
            escape_field(row.major.code())
        )?;
    }
    Ok(())
}

/// Quotes a field containing a separator, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Sink writing one CSV file per run.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }
    
    /// File the history of `run_name` is written to.
    pub fn path_for(&self, run_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.csv", run_name))
    }
    
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl HistorySink for CsvExporter {
    fn flush(&mut self, run_name: &str, rows: &[HistoryRow]) -> Result<(), EnvError> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| EnvError::sink(format!("{}: {}", self.output_dir.display(), e)))?;
        
        let path = self.path_for(run_name);
        let file = File::create(&path).map_err(|e| EnvError::sink(format!("{}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        write_csv(&mut writer, rows)
            .and_then(|_| writer.flush())
            .map_err(|e| EnvError::sink(format!("{}: {}", path.display(), e)))?;
        
        info!("Wrote {} history rows to {}", rows.len(), path.display());
        Ok(())
    }
}

/// End-of-run digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Scenario name
    pub scenario: String,
    
    pub run_name: String,
    
    /// Seed used
    pub seed: u64,
    
    pub population: usize,
    
    /// Completed update ticks
    pub ticks: u64,
    
    /// Semester the clock stopped on
    pub final_semester: String,
    
    pub active: usize,
    pub exited: usize,
    
    /// Means over students that are active and not exited
    pub mean_gpa: f64,
    pub mean_earned_hrs: f64,
    pub mean_attempted_hrs: f64,
    
    /// History rows handed to the sink
    pub history_rows: usize,
}

impl RunSummary {
    /// Digests a model, usually after [`CohortModel::run_to_completion`].
    ///
    /// [`CohortModel::run_to_completion`]: crate::CohortModel::run_to_completion
    pub fn from_model<D, R, S>(scenario: &str, model: &crate::CohortModel<D, R, S>) -> Self
    where
        D: cohort_env::DistributionSource,
        R: cohort_env::MajorResolver,
        S: HistorySink,
    {
        let enrolled: Vec<_> = model
            .students()
            .iter()
            .filter(|s| s.is_active() && !s.has_exited())
            .collect();
        let mean = |f: &dyn Fn(&cohort_core::Student) -> u32| {
            if enrolled.is_empty() {
                0.0
            } else {
                enrolled.iter().map(|s| f(s) as f64).sum::<f64>() / enrolled.len() as f64
            }
        };
        
        Self {
            scenario: scenario.to_string(),
            run_name: model.config().run_name.clone(),
            seed: model.config().seed,
            population: model.population_size(),
            ticks: model.ticks_elapsed(),
            final_semester: model.semester().to_string(),
            active: model.active_count(),
            exited: model.exited_count(),
            mean_gpa: mean(&|s| s.gpa()),
            mean_earned_hrs: mean(&|s| s.earned_hrs()),
            mean_attempted_hrs: mean(&|s| s.attempted_hrs()),
            history_rows: model.recorder().len(),
        }
    }
    
    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
