//! Cohort Lock-Step Simulation
//!
//! A fixed population of students advances one semester per tick until the
//! semester clock runs out. Every run is reproducible from a single 64-bit
//! seed.
//!
//! # Core Principle: Simultaneous Activation
//!
//! Each tick is split into two phases:
//! - **Propose**: every student stages its next major from the pre-tick world
//! - **Commit**: every student applies what it staged
//!
//! No student sees another's staged change, so processing order (or running
//! the propose phase in parallel) never changes the outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CohortModel                          │
//! │  ┌───────────────┐  ┌──────────────┐  ┌─────────────────┐   │
//! │  │ SemesterClock │  │ SimContext   │  │ HistoryRecorder │   │
//! │  │ (24 codes)    │  │ (ChaCha8)    │  │ (per-step rows) │   │
//! │  └───────┬───────┘  └──────┬───────┘  └────────┬────────┘   │
//! │          │                 │                   │            │
//! │  ┌───────▼─────────────────▼───────┐   ┌───────▼────────┐   │
//! │  │  Students: propose ▸ commit     │   │  HistorySink   │   │
//! │  │  then hours ▸ GPA pipeline      │   │  (CSV / memory)│   │
//! │  └───────┬──────────────┬──────────┘   └────────────────┘   │
//! │          │              │                                   │
//! │  ┌───────▼──────┐ ┌─────▼──────────────┐                    │
//! │  │ MajorSwitch  │ │ StatisticalOracle  │                    │
//! │  └──────────────┘ └────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cohort_sim::{CohortModel, SimConfig, MajorSwitch, StatisticalOracle};
//! use cohort_env::MemorySink;
//!
//! let config = SimConfig { seed: 42, num_students: 100, ..Default::default() };
//! let oracle = StatisticalOracle::new(Default::default())?;
//! let switcher = MajorSwitch::new(Default::default())?;
//!
//! let mut model = CohortModel::new(config, oracle, switcher, MemorySink::new())?;
//! model.run_to_completion()?;
//! ```

mod context;
mod error;
mod exporter;
mod keys;
mod oracle;
mod schedule;
mod switcher;
mod world;
pub mod config;
pub mod runner;
pub mod scenarios;

pub use config::CollaboratorConfig;
pub use context::SimContext;
pub use error::SimError;
pub use exporter::{write_csv, CsvExporter, RunSummary, CSV_HEADER};
pub use keys::SeedDeriver;
pub use oracle::{GenderWeights, MajorWeight, NormalParams, OracleConfig, SeasonProfile, StatisticalOracle};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use schedule::{activate, activate_in_order};
pub use switcher::{MajorSwitch, SwitchConfig};
pub use world::{round_metric, CohortModel, SimConfig, StepOutcome};
