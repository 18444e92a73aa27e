//! Student agent - per-entity state machine with a two-phase update.
//!
//! Each tick the engine calls [`Student::propose`] on every student and only
//! then [`Student::commit`] on every student. Propose reads the student's
//! own state and the current semester and stages at most one major change;
//! commit applies it. No student can observe another student's staged
//! change, so the tick outcome does not depend on iteration order.
//!
//! ```text
//!        propose (all)              commit (all)
//!   ┌────────────────────┐    ┌──────────────────────┐
//!   │ semester relevant? │    │ pending_major?       │
//!   │ tag != prev tag?   │───►│  activate if needed  │
//!   │ resolver → pending │    │  append, clear       │
//!   └────────────────────┘    └──────────────────────┘
//! ```

use crate::clock::{is_major_relevant, major_tag};
use cohort_env::{EnvError, Gender, HistoryRow, Major, MajorResolver, StudentId};
use rand::RngCore;
use serde::Serialize;

/// A simulated student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Stable population slot
    id: StudentId,
    
    /// Immutable categorical gender
    gender: Gender,
    
    /// Append-only major history; the last entry is the current major
    majors: Vec<Major>,
    
    /// Can only flip false -> true
    is_active: bool,
    
    earned_hrs_history: Vec<u32>,
    attempted_hrs_history: Vec<u32>,
    gpa_history: Vec<u32>,
    
    /// Major staged by `propose`, cleared by `commit`
    pending_major: Option<Major>,
    
    /// Last major-tagged semester label seen
    previous_tag: Option<String>,
}

impl Student {
    /// Creates a student holding `initial_major`.
    ///
    /// All three metric histories start with a single zero.
    pub fn new(id: StudentId, gender: Gender, initial_major: Major, active: bool) -> Self {
        Self {
            id,
            gender,
            majors: vec![initial_major],
            is_active: active,
            earned_hrs_history: vec![0],
            attempted_hrs_history: vec![0],
            gpa_history: vec![0],
            pending_major: None,
            previous_tag: None,
        }
    }
    
    /// Phase 1: stage a major change for `semester`, if any.
    ///
    /// Equivalent to [`Student::plan`] followed by [`Student::stage`].
    ///
    /// # Errors
    /// Returns [`EnvError::InvalidMajor`] if the resolver hands back an empty
    /// or undeclared major. The student is left untouched in that case.
    pub fn propose(
        &mut self,
        semester: &str,
        resolver: &dyn MajorResolver,
        rng: &mut dyn RngCore,
    ) -> Result<(), EnvError> {
        let pending = self.plan(semester, resolver, rng)?;
        self.stage(semester, pending);
        Ok(())
    }
    
    /// Computes the major this student would stage for `semester`.
    ///
    /// Only major-relevant semesters are considered. The first one a student
    /// sees is compared against itself and never produces a transition.
    /// The resolver is consulted only when the tag changed. Reads state only.
    pub fn plan(
        &self,
        semester: &str,
        resolver: &dyn MajorResolver,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Major>, EnvError> {
        if !is_major_relevant(semester) {
            return Ok(None);
        }
        
        let new_tag = major_tag(semester);
        let previous_tag = self.previous_tag.as_deref().unwrap_or(&new_tag);
        if previous_tag == new_tag {
            return Ok(None);
        }
        
        let next = resolver.resolve(previous_tag, &new_tag, self.current_major(), rng);
        if !next.is_assignable() {
            return Err(EnvError::invalid_major(next.code()));
        }
        Ok(Some(next))
    }
    
    /// Records `semester` as seen and stages the result of [`Student::plan`].
    ///
    /// A no-op for semesters that are not major-relevant.
    pub fn stage(&mut self, semester: &str, pending: Option<Major>) {
        if !is_major_relevant(semester) {
            return;
        }
        self.pending_major = pending;
        self.previous_tag = Some(major_tag(semester));
    }
    
    /// Phase 2: apply the staged major change.
    ///
    /// Returns true if a major was appended.
    pub fn commit(&mut self) -> bool {
        let Some(major) = self.pending_major.take() else {
            return false;
        };
        
        if !self.is_active {
            self.is_active = true;
        }
        self.majors.push(major);
        true
    }
    
    /// Appends this tick's earned and attempted hours.
    pub fn record_hours(&mut self, earned: u32, attempted: u32) {
        self.earned_hrs_history.push(earned);
        self.attempted_hrs_history.push(attempted);
    }
    
    /// Appends this tick's GPA.
    pub fn record_gpa(&mut self, gpa: u32) {
        self.gpa_history.push(gpa);
    }
    
    /// Repeats the current hours for a tick without new samples.
    pub fn carry_forward_hours(&mut self) {
        self.record_hours(self.earned_hrs(), self.attempted_hrs());
    }
    
    /// Repeats the current GPA for a tick without new samples.
    pub fn carry_forward_gpa(&mut self) {
        self.record_gpa(self.gpa());
    }
    
    /// Snapshot of the current metrics for the history table.
    pub fn snapshot(&self, step: u64) -> HistoryRow {
        HistoryRow {
            step,
            student: self.id,
            gpa: self.gpa(),
            attempted_hrs: self.attempted_hrs(),
            earned_hrs: self.earned_hrs(),
            major: self.current_major().clone(),
        }
    }
    
    pub fn id(&self) -> StudentId {
        self.id
    }
    
    pub fn gender(&self) -> Gender {
        self.gender
    }
    
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    
    /// Current major (last entry of the major history).
    pub fn current_major(&self) -> &Major {
        // `majors` starts non-empty and is append-only
        &self.majors[self.majors.len() - 1]
    }
    
    /// True once the student holds the exit code.
    pub fn has_exited(&self) -> bool {
        self.current_major().is_exit()
    }
    
    pub fn majors(&self) -> &[Major] {
        &self.majors
    }
    
    pub fn pending_major(&self) -> Option<&Major> {
        self.pending_major.as_ref()
    }
    
    pub fn previous_tag(&self) -> Option<&str> {
        self.previous_tag.as_deref()
    }
    
    pub fn earned_hrs(&self) -> u32 {
        self.earned_hrs_history.last().copied().unwrap_or(0)
    }
    
    pub fn attempted_hrs(&self) -> u32 {
        self.attempted_hrs_history.last().copied().unwrap_or(0)
    }
    
    pub fn gpa(&self) -> u32 {
        self.gpa_history.last().copied().unwrap_or(0)
    }
    
    pub fn earned_hrs_history(&self) -> &[u32] {
        &self.earned_hrs_history
    }
    
    pub fn attempted_hrs_history(&self) -> &[u32] {
        &self.attempted_hrs_history
    }
    
    pub fn gpa_history(&self) -> &[u32] {
        &self.gpa_history
    }
}
