//! History persistence interface.

use crate::error::EnvError;
use crate::types::HistoryRow;

/// Destination for the history table collected during a run.
///
/// `flush` is called exactly once, when the semester clock is exhausted.
pub trait HistorySink {
    /// Persists every collected row under the given run name.
    fn flush(&mut self, run_name: &str, rows: &[HistoryRow]) -> Result<(), EnvError>;
}

/// Sink that keeps the flushed table in memory.
///
/// Used by tests and by callers that post-process the table themselves.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Name of the flushed run, if any
    pub run_name: Option<String>,
    
    /// Flushed rows
    pub rows: Vec<HistoryRow>,
    
    /// Number of times `flush` was called
    pub flush_count: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistorySink for MemorySink {
    fn flush(&mut self, run_name: &str, rows: &[HistoryRow]) -> Result<(), EnvError> {
        self.run_name = Some(run_name.to_string());
        self.rows = rows.to_vec();
        self.flush_count += 1;
        Ok(())
    }
}

impl<S: HistorySink + ?Sized> HistorySink for Box<S> {
    fn flush(&mut self, run_name: &str, rows: &[HistoryRow]) -> Result<(), EnvError> {
        (**self).flush(run_name, rows)
    }
}
