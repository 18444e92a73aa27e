//! History recorder - per-step metric snapshots for the whole population.
//!
//! The engine calls [`HistoryRecorder::collect`] at the start of every step,
//! before any agent is updated. Rows accumulate in memory until the run is
//! finalized and the table is handed to a `HistorySink`.

use crate::student::Student;
use cohort_env::{HistoryRow, StudentId};

/// Collects one row per student per step.
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    rows: Vec<HistoryRow>,
    steps: u64,
}

impl HistoryRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Records a snapshot of every student, tagged with the next step index.
    pub fn collect(&mut self, students: &[Student]) {
        let step = self.steps;
        self.rows.extend(students.iter().map(|s| s.snapshot(step)));
        self.steps += 1;
    }
    
    /// Number of steps collected so far.
    pub fn steps_collected(&self) -> u64 {
        self.steps
    }
    
    /// All collected rows, ordered by step then population order.
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }
    
    /// Rows of a single student, in step order.
    pub fn rows_for(&self, student: StudentId) -> impl Iterator<Item = &HistoryRow> + '_ {
        self.rows.iter().filter(move |row| row.student == student)
    }
    
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
