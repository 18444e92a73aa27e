//! CohortModel - the lock-step engine.
//!
//! Per step, in this fixed order:
//!
//! ```text
//! 1. Record every student's metrics (pre-tick snapshot)
//! 2. Propose on all students, then commit on all students
//! 3. Advance the clock; if exhausted, flush history and stop
//! 4. Draw earned/attempted hours for the active students
//! 5. Draw GPA for the active students
//! ```
//!
//! Students holding the exit code get zeros instead of samples. Inactive
//! students carry their previous values forward, so every history has
//! exactly `ticks_elapsed + 1` entries.
//!
//! All three samples are drawn and checked before any history grows. Any
//! error halts the model: later calls to `step` return [`SimError::Halted`].

use crate::context::SimContext;
use crate::error::SimError;
use crate::schedule;

use cohort_core::{HistoryRecorder, PlacementGrid, SemesterClock, SemesterTick, Student};
use cohort_env::{DistributionSource, EnvError, HistorySink, Major, MajorResolver, MetricKind, StudentId};
use rand_distr::{Bernoulli, Distribution};
use tracing::{debug, error, info, warn};

/// Construction parameters of a run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,
    
    /// Population size (fixed for the run)
    pub num_students: usize,
    
    /// Percentage of students active in the first semester (0-100)
    pub active_pct: f64,
    
    /// Placement grid width
    pub grid_width: usize,
    
    /// Placement grid height
    pub grid_height: usize,
    
    /// Name the exported history is filed under
    pub run_name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_students: 100,
            active_pct: 60.0,
            grid_width: 10,
            grid_height: 10,
            run_name: "cohort".to_string(),
        }
    }
}

impl SimConfig {
    /// Checks the ranges the engine relies on.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_students == 0 {
            return Err(SimError::config("num_students must be positive"));
        }
        if !(0.0..=100.0).contains(&self.active_pct) {
            return Err(SimError::config(format!(
                "active_pct must be in [0, 100], got {}",
                self.active_pct
            )));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SimError::config("grid dimensions must be positive"));
        }
        if self.num_students > self.grid_width * self.grid_height {
            return Err(SimError::config(format!(
                "{} students do not fit a {}x{} grid",
                self.num_students, self.grid_width, self.grid_height
            )));
        }
        if self.run_name.trim().is_empty() {
            return Err(SimError::config("run_name must not be empty"));
        }
        Ok(())
    }
}

/// What a call to [`CohortModel::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The clock moved to `semester` and metrics were updated
    Advanced {
        semester: String,
        majors_changed: usize,
        active: usize,
    },
    
    /// The clock is exhausted; history has been flushed
    Finished,
}

/// Rounds a sampled metric to a non-negative integer.
///
/// Ties go to the even neighbour; negative and non-finite samples become 0.
pub fn round_metric(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round_ties_even();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// The cohort engine.
pub struct CohortModel<D, R, S>
where
    D: DistributionSource,
    R: MajorResolver,
    S: HistorySink,
{
    config: SimConfig,
    context: SimContext,
    clock: SemesterClock,
    
    /// Current semester code
    semester: String,
    
    students: Vec<Student>,
    grid: PlacementGrid,
    recorder: HistoryRecorder,
    
    source: D,
    resolver: R,
    sink: S,
    
    running: bool,
    
    /// Set when a step fails; the model never runs again
    failed: bool,
    
    ticks_elapsed: u64,
}

/// Rounded (earned, attempted, GPA) samples of one active student.
type MetricSample = (u32, u32, u32);

impl<D, R, S> CohortModel<D, R, S>
where
    D: DistributionSource,
    R: MajorResolver,
    S: HistorySink,
{
    /// Builds the population and places it on the grid.
    ///
    /// Each student is active with probability `active_pct / 100`. Active
    /// students take their drawn first-semester major; the rest start
    /// undeclared.
    pub fn new(config: SimConfig, source: D, resolver: R, sink: S) -> Result<Self, SimError> {
        config.validate()?;
        
        let mut context = SimContext::new(config.seed);
        let mut clock = SemesterClock::new();
        let semester = match clock.next_semester() {
            SemesterTick::Semester(code) => code,
            SemesterTick::Exhausted => return Err(SimError::config("semester sequence is empty")),
        };
        
        let n = config.num_students;
        let genders = source.gen_gender(n, context.rng_mut());
        if genders.len() != n {
            return Err(EnvError::arity("gender", n, genders.len()).into());
        }
        let majors = source.gen_f1seq1_majors(n, context.rng_mut());
        if majors.len() != n {
            return Err(EnvError::arity("f1seq1_majors", n, majors.len()).into());
        }
        
        let activation = Bernoulli::new(config.active_pct / 100.0)
            .map_err(|e| SimError::config(format!("active_pct: {}", e)))?;
        let mut grid = PlacementGrid::new(config.grid_width, config.grid_height)?;
        
        let mut students = Vec::with_capacity(n);
        for (i, (gender, major)) in genders.into_iter().zip(majors).enumerate() {
            let id = StudentId::from_index(i);
            let student = if activation.sample(context.rng_mut()) {
                if !major.is_assignable() {
                    return Err(EnvError::invalid_major(major.code()).into());
                }
                Student::new(id, gender, major, true)
            } else {
                Student::new(id, gender, Major::undeclared(), false)
            };
            
            grid.place_random(id, context.rng_mut())?;
            students.push(student);
        }
        
        info!(
            "Cohort '{}' created: {} students, {} active, seed={}",
            config.run_name,
            n,
            students.iter().filter(|s| s.is_active()).count(),
            config.seed
        );
        
        Ok(Self {
            config,
            context,
            clock,
            semester,
            students,
            grid,
            recorder: HistoryRecorder::new(),
            source,
            resolver,
            sink,
            running: true,
            failed: false,
            ticks_elapsed: 0,
        })
    }
    
    /// Advances the simulation by one semester.
    ///
    /// After the run has finished this is a no-op returning
    /// [`StepOutcome::Finished`]. Any error is fatal for the run: the model
    /// stops and every later call returns [`SimError::Halted`].
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.failed {
            return Err(SimError::Halted);
        }
        if !self.running {
            return Ok(StepOutcome::Finished);
        }
        
        self.advance().map_err(|e| {
            error!("Cohort '{}' halted at {}: {}", self.config.run_name, self.semester, e);
            self.running = false;
            self.failed = true;
            e
        })
    }
    
    fn advance(&mut self) -> Result<StepOutcome, SimError> {
        self.recorder.collect(&self.students);
        
        let majors_changed = schedule::activate(
            &mut self.students,
            &self.semester,
            &self.resolver,
            self.context.seeds(),
            self.ticks_elapsed,
        )?;
        
        match self.clock.next_semester() {
            SemesterTick::Semester(code) => self.semester = code,
            SemesterTick::Exhausted => {
                self.finalize()?;
                return Ok(StepOutcome::Finished);
            }
        }
        
        let samples = self.sample_metrics()?;
        self.apply_metrics(samples);
        self.ticks_elapsed += 1;
        
        let active = self.active_count();
        debug!(
            "tick {} -> {}: {} majors changed, {} active, {} exited",
            self.ticks_elapsed,
            self.semester,
            majors_changed,
            active,
            self.exited_count()
        );
        
        Ok(StepOutcome::Advanced {
            semester: self.semester.clone(),
            majors_changed,
            active,
        })
    }
    
    /// Steps until the clock is exhausted. Returns the number of steps taken.
    pub fn run_to_completion(&mut self) -> Result<u64, SimError> {
        if self.failed {
            return Err(SimError::Halted);
        }
        let mut steps = 0;
        while self.running {
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }
    
    /// Draws `n` samples of `kind` for the current semester and rounds them.
    fn draw(&mut self, kind: MetricKind, n: usize) -> Result<Vec<u32>, EnvError> {
        let raw = self.source.gen_credit_hrs(&self.semester, n, kind, self.context.rng_mut());
        if raw.len() != n {
            return Err(EnvError::arity(kind, n, raw.len()));
        }
        Ok(raw.into_iter().map(round_metric).collect())
    }
    
    /// Draws earned hours, attempted hours and GPA, one per active student.
    fn sample_metrics(&mut self) -> Result<Vec<MetricSample>, EnvError> {
        let n = self.active_count();
        let earned = self.draw(MetricKind::EarnedHours, n)?;
        let attempted = self.draw(MetricKind::AttemptedHours, n)?;
        let gpa = self.draw(MetricKind::Gpa, n)?;
        
        Ok(earned
            .into_iter()
            .zip(attempted)
            .zip(gpa)
            .map(|((earned, attempted), gpa)| (earned, attempted, gpa))
            .collect())
    }
    
    /// Appends one entry to every history. `samples` pairs up with the
    /// active students in population order.
    fn apply_metrics(&mut self, samples: Vec<MetricSample>) {
        for student in self.students.iter_mut().filter(|s| !s.is_active()) {
            student.carry_forward_hours();
            student.carry_forward_gpa();
        }
        
        let active = self.students.iter_mut().filter(|s| s.is_active());
        for (student, (earned, attempted, gpa)) in active.zip(samples) {
            if student.has_exited() {
                student.record_hours(0, 0);
                student.record_gpa(0);
            } else {
                student.record_hours(earned, attempted);
                student.record_gpa(gpa);
            }
        }
    }
    
    /// Flushes the history and stops the run.
    fn finalize(&mut self) -> Result<(), SimError> {
        self.sink.flush(&self.config.run_name, self.recorder.rows())?;
        self.running = false;
        
        if self.active_count() == 0 {
            warn!("Cohort '{}' finished with no active students", self.config.run_name);
        }
        info!(
            "Cohort '{}' finished after {} ticks: {} rows, {} active, {} exited",
            self.config.run_name,
            self.ticks_elapsed,
            self.recorder.len(),
            self.active_count(),
            self.exited_count()
        );
        Ok(())
    }
    
    /// Returns the run configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
    
    /// Returns the current semester code.
    pub fn semester(&self) -> &str {
        &self.semester
    }
    
    /// True until the clock is exhausted or a step fails.
    pub fn is_running(&self) -> bool {
        self.running
    }
    
    /// True once a step has failed.
    pub fn has_failed(&self) -> bool {
        self.failed
    }
    
    /// Number of completed update ticks.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }
    
    pub fn population_size(&self) -> usize {
        self.students.len()
    }
    
    pub fn students(&self) -> &[Student] {
        &self.students
    }
    
    #[cfg(test)]
    fn students_mut(&mut self) -> &mut [Student] {
        &mut self.students
    }
    
    pub fn active_count(&self) -> usize {
        self.students.iter().filter(|s| s.is_active()).count()
    }
    
    pub fn exited_count(&self) -> usize {
        self.students.iter().filter(|s| s.has_exited()).count()
    }
    
    pub fn grid(&self) -> &PlacementGrid {
        &self.grid
    }
    
    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }
    
    pub fn sink(&self) -> &S {
        &self.sink
    }
    
    /// Consumes the model and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
