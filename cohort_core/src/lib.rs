//! Cohort Core - building blocks of the lock-step student simulation
//!
//! 1. **Clock**: the finite semester sequence that drives every tick
//! 2. **Student**: per-agent state machine with a two-phase (propose/commit) update
//! 3. **Grid**: single-occupancy placement bookkeeping
//! 4. **History**: per-step metric snapshots collected for export

pub mod clock;
pub mod grid;
pub mod history;
pub mod student;

// Re-export key types for convenience
pub use clock::{is_major_relevant, major_tag, position_of, semester_codes, Season, SemesterClock, SemesterTick};
pub use grid::{Cell, GridError, PlacementGrid};
pub use history::HistoryRecorder;
pub use student::Student;
