//! Cohort Environment Abstraction Layer
//!
//! The engine in `cohort_sim` never samples a distribution, picks a major,
//! or touches the filesystem itself. Everything outside the lock-step
//! update protocol is reached through the traits in this crate:
//!
//! - **Majors**: [`MajorResolver`] decides the next major on a transition
//! - **Distributions**: [`DistributionSource`] draws genders, initial majors,
//!   credit hours and GPA
//! - **History**: [`HistorySink`] persists the collected history table
//!
//! # Randomness
//!
//! Collaborators never own a process-wide RNG. Every call receives the
//! random stream it is allowed to consume, so a run is reproducible from
//! its seed.
//!
//! # Example
//!
//! ```ignore
//! use cohort_env::{DistributionSource, MetricKind};
//!
//! fn earned<D: DistributionSource>(src: &D, semester: &str, n: usize, rng: &mut dyn rand::RngCore) {
//!     let samples = src.gen_credit_hrs(semester, n, MetricKind::EarnedHours, rng);
//!     assert_eq!(samples.len(), n);
//! }
//! ```

mod distributions;
mod error;
mod resolver;
mod sink;
mod types;

pub use distributions::{DistributionSource, MetricKind};
pub use error::EnvError;
pub use resolver::MajorResolver;
pub use sink::{HistorySink, MemorySink};
pub use types::{Gender, HistoryRow, Major, StudentId, EXIT_CODE, UNDECLARED_CODE};
