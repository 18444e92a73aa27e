//! Statistical oracle - the reference distribution generators.
//!
//! The oracle draws the population-level randomness of a run:
//! - Genders and first-semester majors (weighted categorical draws)
//! - Earned hours, attempted hours and GPA (normal draws per season)
//!
//! Parameters come from an [`OracleConfig`], which can be loaded from JSON.
//! A semester-specific profile overrides the seasonal default.

use crate::error::SimError;
use cohort_core::Season;
use cohort_env::{DistributionSource, Gender, Major, MetricKind};
use rand::distributions::WeightedIndex;
use rand::RngCore;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean and standard deviation of a normal draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
    
    fn build(&self, what: &str) -> Result<Normal<f64>, SimError> {
        Normal::new(self.mean, self.std_dev)
            .map_err(|e| SimError::config(format!("{}: {}", what, e)))
    }
}

/// Distributions of the three per-semester metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonProfile {
    pub earned_hrs: NormalParams,
    pub attempted_hrs: NormalParams,
    pub gpa: NormalParams,
}

/// Relative weights of the gender categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderWeights {
    pub female: f64,
    pub male: f64,
    pub unreported: f64,
}

/// A major code and its relative weight in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorWeight {
    pub code: String,
    pub weight: f64,
}

impl MajorWeight {
    pub fn new(code: &str, weight: f64) -> Self {
        Self { code: code.to_string(), weight }
    }
}

/// Parameters of the statistical oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    pub genders: GenderWeights,
    
    /// Catalog for first-semester majors
    pub majors: Vec<MajorWeight>,
    
    /// Profile for semesters starting with `F`
    pub fall: SeasonProfile,
    
    /// Profile for semesters starting with `S`
    pub spring: SeasonProfile,
    
    /// Per-semester-code overrides, e.g. `"F1SEQ2"`
    #[serde(default)]
    pub semesters: BTreeMap<String, SeasonProfile>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            genders: GenderWeights { female: 0.52, male: 0.46, unreported: 0.02 },
            majors: vec![
                MajorWeight::new("CS", 0.22),
                MajorWeight::new("BUS", 0.24),
                MajorWeight::new("BIO", 0.18),
                MajorWeight::new("ENG", 0.14),
                MajorWeight::new("MATH", 0.08),
                MajorWeight::new("PSY", 0.14),
            ],
            fall: SeasonProfile {
                earned_hrs: NormalParams::new(12.0, 3.0),
                attempted_hrs: NormalParams::new(14.0, 2.5),
                gpa: NormalParams::new(3.0, 0.8),
            },
            spring: SeasonProfile {
                earned_hrs: NormalParams::new(11.5, 3.2),
                attempted_hrs: NormalParams::new(13.5, 2.7),
                gpa: NormalParams::new(2.9, 0.85),
            },
            semesters: BTreeMap::new(),
        }
    }
}

/// Ready-to-sample form of a [`SeasonProfile`].
#[derive(Debug, Clone)]
struct ProfileDists {
    earned_hrs: Normal<f64>,
    attempted_hrs: Normal<f64>,
    gpa: Normal<f64>,
}

impl ProfileDists {
    fn build(name: &str, profile: &SeasonProfile) -> Result<Self, SimError> {
        Ok(Self {
            earned_hrs: profile.earned_hrs.build(&format!("{} earned_hrs", name))?,
            attempted_hrs: profile.attempted_hrs.build(&format!("{} attempted_hrs", name))?,
            gpa: profile.gpa.build(&format!("{} gpa", name))?,
        })
    }
    
    fn get(&self, kind: MetricKind) -> &Normal<f64> {
        match kind {
            MetricKind::EarnedHours => &self.earned_hrs,
            MetricKind::AttemptedHours => &self.attempted_hrs,
            MetricKind::Gpa => &self.gpa,
        }
    }
}

/// Reference [`DistributionSource`] backed by `rand_distr`.
#[derive(Debug, Clone)]
pub struct StatisticalOracle {
    genders: WeightedIndex<f64>,
    major_codes: Vec<Major>,
    majors: WeightedIndex<f64>,
    fall: ProfileDists,
    spring: ProfileDists,
    semesters: BTreeMap<String, ProfileDists>,
}

const GENDERS: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Unreported];

impl StatisticalOracle {
    /// Validates `config` and builds the sampling tables.
    pub fn new(config: OracleConfig) -> Result<Self, SimError> {
        let g = &config.genders;
        let genders = WeightedIndex::new([g.female, g.male, g.unreported])
            .map_err(|e| SimError::config(format!("gender weights: {}", e)))?;
        
        let major_codes: Vec<Major> = config.majors.iter().map(|m| Major::new(m.code.as_str())).collect();
        if let Some(bad) = major_codes.iter().find(|m| !m.is_assignable() || m.is_exit()) {
            return Err(SimError::config(format!("major catalog contains reserved code {:?}", bad.code())));
        }
        let majors = WeightedIndex::new(config.majors.iter().map(|m| m.weight))
            .map_err(|e| SimError::config(format!("major weights: {}", e)))?;
        
        let semesters = config.semesters
            .iter()
            .map(|(code, profile)| -> Result<_, SimError> {
                Ok((code.clone(), ProfileDists::build(code, profile)?))
            })
            .collect::<Result<BTreeMap<_, _>, SimError>>()?;
        
        Ok(Self {
            genders,
            major_codes,
            majors,
            fall: ProfileDists::build("fall", &config.fall)?,
            spring: ProfileDists::build("spring", &config.spring)?,
            semesters,
        })
    }
    
    fn profile_for(&self, semester: &str) -> &ProfileDists {
        if let Some(profile) = self.semesters.get(semester) {
            return profile;
        }
        match Season::of_code(semester) {
            Some(Season::Spring) => &self.spring,
            _ => &self.fall,
        }
    }
}

impl DistributionSource for StatisticalOracle {
    fn gen_gender(&self, n: usize, rng: &mut dyn RngCore) -> Vec<Gender> {
        (0..n).map(|_| GENDERS[self.genders.sample(&mut *rng)]).collect()
    }
    
    fn gen_f1seq1_majors(&self, n: usize, rng: &mut dyn RngCore) -> Vec<Major> {
        (0..n)
            .map(|_| self.major_codes[self.majors.sample(&mut *rng)].clone())
            .collect()
    }
    
    fn gen_credit_hrs(
        &self,
        semester: &str,
        n: usize,
        kind: MetricKind,
        rng: &mut dyn RngCore,
    ) -> Vec<f64> {
        let dist = self.profile_for(semester).get(kind);
        (0..n).map(|_| dist.sample(&mut *rng)).collect()
    }
}
