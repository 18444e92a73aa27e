//! Scenario runner - builds a cohort for a scenario and runs it to the end.

use crate::config::CollaboratorConfig;
use crate::error::SimError;
use crate::exporter::{CsvExporter, RunSummary};
use crate::scenarios::ScenarioId;
use crate::world::{CohortModel, SimConfig};

use cohort_env::{HistorySink, MemorySink};
use std::path::PathBuf;
use tracing::info;

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,
    
    /// Seed used
    pub seed: u64,
    
    /// Calls to `step` until the clock was exhausted
    pub steps: u64,
    
    /// End-of-run digest
    pub summary: RunSummary,
    
    /// Exported history, if an output directory was set
    pub csv_path: Option<PathBuf>,
}

/// Runs cohort scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,
    
    /// Number of students
    num_students: usize,
    
    /// Overrides the scenario's activation preset
    active_pct: Option<f64>,
    
    /// Grid size; the smallest fitting square when unset
    grid: Option<(usize, usize)>,
    
    /// Where CSV history is written; kept in memory when unset
    output_dir: Option<PathBuf>,
    
    collaborators: CollaboratorConfig,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64, num_students: usize) -> Self {
        Self {
            seed,
            num_students,
            active_pct: None,
            grid: None,
            output_dir: None,
            collaborators: CollaboratorConfig::default(),
        }
    }
    
    /// Sets the initial active percentage for every scenario.
    pub fn with_active_pct(mut self, pct: f64) -> Self {
        self.active_pct = Some(pct);
        self
    }
    
    /// Sets the grid size.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid = Some((width, height));
        self
    }
    
    /// Writes each run's history to `{dir}/{scenario}_{seed}.csv`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
    
    /// Sets the sampler and switcher parameters.
    pub fn with_collaborators(mut self, collaborators: CollaboratorConfig) -> Self {
        self.collaborators = collaborators;
        self
    }
    
    /// Smallest square grid holding the population.
    fn default_grid(&self) -> (usize, usize) {
        let mut side = (self.num_students as f64).sqrt().ceil() as usize;
        while side * side < self.num_students {
            side += 1;
        }
        (side.max(1), side.max(1))
    }
    
    /// Builds the run configuration for `scenario`.
    pub fn configure(&self, scenario: ScenarioId) -> (SimConfig, CollaboratorConfig) {
        let (grid_width, grid_height) = self.grid.unwrap_or_else(|| self.default_grid());
        let mut sim = SimConfig {
            seed: self.seed,
            num_students: self.num_students,
            active_pct: 0.0,
            grid_width,
            grid_height,
            run_name: format!("{}_{}", scenario.name(), self.seed),
        };
        let mut collaborators = self.collaborators.clone();
        
        scenario.apply(&mut sim, &mut collaborators);
        if let Some(pct) = self.active_pct {
            sim.active_pct = pct;
        }
        (sim, collaborators)
    }
    
    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> Result<ScenarioResult, SimError> {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        
        let (sim, collaborators) = self.configure(scenario);
        let (oracle, switcher) = collaborators.build()?;
        
        let (sink, csv_path): (Box<dyn HistorySink>, _) = match &self.output_dir {
            Some(dir) => {
                let exporter = CsvExporter::new(dir);
                let path = exporter.path_for(&sim.run_name);
                (Box::new(exporter), Some(path))
            }
            None => (Box::new(MemorySink::new()), None),
        };
        
        let mut model = CohortModel::new(sim, oracle, switcher, sink)?;
        let steps = model.run_to_completion()?;
        let summary = RunSummary::from_model(scenario.name(), &model);
        
        info!(
            "Finished {} (seed={}): {} ticks, {} active, {} exited",
            scenario.name(),
            self.seed,
            summary.ticks,
            summary.active,
            summary.exited
        );
        
        Ok(ScenarioResult {
            scenario,
            seed: self.seed,
            steps,
            summary,
            csv_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    
    #[test]
    fn test_default_grid_fits_population() {
        assert_eq!(ScenarioRunner::new(1, 1).default_grid(), (1, 1));
        assert_eq!(ScenarioRunner::new(1, 10).default_grid(), (4, 4));
        assert_eq!(ScenarioRunner::new(1, 100).default_grid(), (10, 10));
    }
    
    #[test]
    fn test_configure_applies_overrides() {
        let runner = ScenarioRunner::new(9, 20).with_active_pct(35.0).with_grid(5, 8);
        let (sim, _) = runner.configure(ScenarioId::FullyActive);
        
        assert_eq!(sim.active_pct, 35.0);
        assert_eq!((sim.grid_width, sim.grid_height), (5, 8));
        assert_eq!(sim.run_name, "fully_active_9");
    }
    
    #[test]
    fn test_every_scenario_runs() {
        let runner = ScenarioRunner::new(42, 30);
        
        for scenario in ScenarioId::all() {
            let result = runner.run(scenario).unwrap();
            
            assert_eq!(result.steps, 24);
            assert_eq!(result.summary.ticks, 23);
            assert_eq!(result.summary.final_semester, "S6SEQ2");
            assert_eq!(result.summary.history_rows, 24 * 30);
            assert!(result.csv_path.is_none());
        }
    }
    
    #[test]
    fn test_dormant_cohort_activates() {
        let result = ScenarioRunner::new(3, 25).run(ScenarioId::DormantCohort).unwrap();
        assert_eq!(result.summary.active, 25);
    }
    
    #[test]
    fn test_overfull_grid_rejected() {
        let err = ScenarioRunner::new(3, 25).with_grid(2, 2).run(ScenarioId::Baseline).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }
    
    #[test]
    fn test_same_seed_same_csv() {
        let dir = std::env::temp_dir().join(format!("cohort_runner_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        
        let first = ScenarioRunner::new(5, 12).with_output_dir(&dir).run(ScenarioId::Baseline).unwrap();
        let path = first.csv_path.clone().unwrap();
        assert_eq!(path, dir.join("baseline_5.csv"));
        let text_a = fs::read_to_string(&path).unwrap();
        
        ScenarioRunner::new(5, 12).with_output_dir(&dir).run(ScenarioId::Baseline).unwrap();
        let text_b = fs::read_to_string(&path).unwrap();
        
        assert_eq!(text_a, text_b);
        assert_eq!(text_a.lines().count(), 1 + 24 * 12);
        
        fs::remove_dir_all(&dir).unwrap();
    }
}
