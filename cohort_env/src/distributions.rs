//! Distribution generator interface.

use crate::types::{Gender, Major};
use rand::RngCore;

/// Which per-semester metric a credit-hour style draw is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    EarnedHours,
    AttemptedHours,
    Gpa,
}

impl MetricKind {
    /// Column-style name of the metric.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::EarnedHours => "earned_hrs",
            MetricKind::AttemptedHours => "attempted_hrs",
            MetricKind::Gpa => "gpa",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of the population-level random draws.
///
/// Every method must return exactly `n` values and must support `n == 0`
/// by returning an empty vector. The engine checks the arity of every
/// draw and fails the tick on a mismatch.
pub trait DistributionSource: Send + Sync {
    /// Draws `n` genders for a new population.
    fn gen_gender(&self, n: usize, rng: &mut dyn RngCore) -> Vec<Gender>;
    
    /// Draws `n` majors for students active in the first semester.
    fn gen_f1seq1_majors(&self, n: usize, rng: &mut dyn RngCore) -> Vec<Major>;
    
    /// Draws `n` real-valued samples of `kind` for `semester`.
    ///
    /// Values are unrounded; the engine rounds and clamps them.
    fn gen_credit_hrs(
        &self,
        semester: &str,
        n: usize,
        kind: MetricKind,
        rng: &mut dyn RngCore,
    ) -> Vec<f64>;
}
