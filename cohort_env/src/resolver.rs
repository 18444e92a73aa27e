//! Major transition policy interface.

use crate::types::Major;
use rand::RngCore;

/// Decides a student's next major when a new major-relevant semester begins.
///
/// # Contract
///
/// - Called only when `previous_tag != new_tag`.
/// - Returns [`Major::exited`] for students whose trajectory ends, and a
///   program code otherwise. Empty codes and the undeclared placeholder are
///   rejected by the engine as fatal.
/// - May be randomized, but only through `rng`. The engine hands every
///   student its own stream for the tick, so calls for different students
///   can run in any order (or in parallel) without changing results.
pub trait MajorResolver: Send + Sync {
    /// Returns the next major.
    ///
    /// # Arguments
    /// * `previous_tag` - Last major-tagged semester seen, e.g. `"F1SEQ1_MAJOR"`
    /// * `new_tag` - Major-tagged label of the current semester
    /// * `previous_major` - Student's current major (may be undeclared)
    /// * `rng` - Random stream reserved for this student and tick
    fn resolve(
        &self,
        previous_tag: &str,
        new_tag: &str,
        previous_major: &Major,
        rng: &mut dyn RngCore,
    ) -> Major;
}
