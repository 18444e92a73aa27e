//! Major switcher - the reference major transition policy.
//!
//! On each transition a student either keeps its major, switches to
//! another program, or leaves (the exit code). Undeclared students enroll
//! into a program drawn from the catalog. Exit is absorbing.
//!
//! Students in later positions (year-halves) graduate with an extra,
//! position-gated probability on top of the flat withdrawal rate.

use crate::error::SimError;
use crate::oracle::MajorWeight;
use cohort_core::position_of;
use cohort_env::{Major, MajorResolver};
use rand::distributions::WeightedIndex;
use rand::{Rng, RngCore};
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

/// Parameters of the major switcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Programs students can enroll or switch into
    pub catalog: Vec<MajorWeight>,
    
    /// Probability of withdrawing on any transition
    pub withdraw_probability: f64,
    
    /// Probability of switching to another program (given no exit)
    pub switch_probability: f64,
    
    /// First position at which graduation is possible
    pub graduation_position: u8,
    
    /// Probability of graduating on a transition at or after `graduation_position`
    pub graduation_probability: f64,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                MajorWeight::new("CS", 0.20),
                MajorWeight::new("BUS", 0.25),
                MajorWeight::new("BIO", 0.17),
                MajorWeight::new("ENG", 0.13),
                MajorWeight::new("MATH", 0.09),
                MajorWeight::new("PSY", 0.16),
            ],
            withdraw_probability: 0.04,
            switch_probability: 0.10,
            graduation_position: 4,
            graduation_probability: 0.30,
        }
    }
}

fn check_probability(name: &str, p: f64) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SimError::config(format!("{} must be in [0, 1], got {}", name, p)))
    }
}

/// Reference [`MajorResolver`].
#[derive(Debug, Clone)]
pub struct MajorSwitch {
    config: SwitchConfig,
    codes: Vec<Major>,
    weights: WeightedIndex<f64>,
}

impl MajorSwitch {
    /// Validates `config` and builds the catalog table.
    pub fn new(config: SwitchConfig) -> Result<Self, SimError> {
        check_probability("withdraw_probability", config.withdraw_probability)?;
        check_probability("switch_probability", config.switch_probability)?;
        check_probability("graduation_probability", config.graduation_probability)?;
        
        let codes: Vec<Major> = config.catalog.iter().map(|m| Major::new(m.code.as_str())).collect();
        if let Some(bad) = codes.iter().find(|m| !m.is_assignable() || m.is_exit()) {
            return Err(SimError::config(format!("switch catalog contains reserved code {:?}", bad.code())));
        }
        let weights = WeightedIndex::new(config.catalog.iter().map(|m| m.weight))
            .map_err(|e| SimError::config(format!("switch catalog weights: {}", e)))?;
        
        Ok(Self { config, codes, weights })
    }
    
    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }
    
    fn draw_program(&self, rng: &mut dyn RngCore) -> Major {
        self.codes[self.weights.sample(&mut *rng)].clone()
    }
    
    /// Draws a program different from `current`, weighted by the catalog.
    ///
    /// Keeps `current` when no other program has positive weight.
    fn draw_other_program(&self, current: &Major, rng: &mut dyn RngCore) -> Major {
        let others: Vec<(&Major, f64)> = self.codes
            .iter()
            .zip(&self.config.catalog)
            .filter(|(code, _)| *code != current)
            .map(|(code, entry)| (code, entry.weight))
            .collect();
        
        match WeightedIndex::new(others.iter().map(|(_, weight)| *weight)) {
            Ok(dist) => others[dist.sample(&mut *rng)].0.clone(),
            Err(_) => current.clone(),
        }
    }
    
    fn exit_probability(&self, new_tag: &str) -> f64 {
        let graduating = position_of(new_tag)
            .map(|pos| pos >= self.config.graduation_position)
            .unwrap_or(false);
        
        if graduating {
            // withdraw or graduate
            let stay = (1.0 - self.config.withdraw_probability) * (1.0 - self.config.graduation_probability);
            1.0 - stay
        } else {
            self.config.withdraw_probability
        }
    }
}

impl MajorResolver for MajorSwitch {
    fn resolve(
        &self,
        _previous_tag: &str,
        new_tag: &str,
        previous_major: &Major,
        rng: &mut dyn RngCore,
    ) -> Major {
        if previous_major.is_exit() {
            return Major::exited();
        }
        if previous_major.is_undeclared() {
            return self.draw_program(rng);
        }
        
        if rng.gen_bool(self.exit_probability(new_tag)) {
            return Major::exited();
        }
        if rng.gen_bool(self.config.switch_probability) {
            return self.draw_other_program(previous_major, rng);
        }
        previous_major.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    
    fn switch_with(withdraw: f64, switch: f64, graduate: f64) -> MajorSwitch {
        MajorSwitch::new(SwitchConfig {
            withdraw_probability: withdraw,
            switch_probability: switch,
            graduation_probability: graduate,
            ..SwitchConfig::default()
        })
        .unwrap()
    }
    
    #[test]
    fn test_exit_is_absorbing() {
        let s = switch_with(0.0, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        
        for _ in 0..20 {
            assert!(s.resolve("F1SEQ2_MAJOR", "S1SEQ2_MAJOR", &Major::exited(), &mut rng).is_exit());
        }
    }
    
    #[test]
    fn test_undeclared_students_enroll() {
        let s = switch_with(1.0, 0.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        
        for _ in 0..20 {
            let major = s.resolve("F1SEQ1_MAJOR", "F1SEQ2_MAJOR", &Major::undeclared(), &mut rng);
            assert!(major.is_assignable());
            assert!(!major.is_exit());
        }
    }
    
    #[test]
    fn test_stable_policy_keeps_major() {
        let s = switch_with(0.0, 0.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cs = Major::new("CS");
        
        assert_eq!(s.resolve("F1SEQ2_MAJOR", "S1SEQ2_MAJOR", &cs, &mut rng), cs);
    }
    
    #[test]
    fn test_forced_switch_changes_major() {
        let s = switch_with(0.0, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cs = Major::new("CS");
        
        for _ in 0..20 {
            assert_ne!(s.resolve("F1SEQ2_MAJOR", "S1SEQ2_MAJOR", &cs, &mut rng), cs);
        }
    }
    
    #[test]
    fn test_graduation_gated_by_position() {
        let s = switch_with(0.0, 0.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cs = Major::new("CS");
        
        assert_eq!(s.resolve("S2SEQ2_MAJOR", "F3SEQ2_MAJOR", &cs, &mut rng), cs);
        assert!(s.resolve("S3SEQ2_MAJOR", "F4SEQ2_MAJOR", &cs, &mut rng).is_exit());
    }
    
    #[test]
    fn test_switch_never_draws_zero_weight_program() {
        let s = MajorSwitch::new(SwitchConfig {
            catalog: vec![
                MajorWeight::new("CS", 1.0),
                MajorWeight::new("BIO", 0.0),
                MajorWeight::new("ART", 1.0),
            ],
            withdraw_probability: 0.0,
            switch_probability: 1.0,
            graduation_probability: 0.0,
            ..SwitchConfig::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        
        for _ in 0..50 {
            assert_eq!(s.resolve("F1SEQ2_MAJOR", "S1SEQ2_MAJOR", &Major::new("CS"), &mut rng), Major::new("ART"));
        }
    }
    
    #[test]
    fn test_switch_keeps_major_when_no_alternative_has_weight() {
        let s = MajorSwitch::new(SwitchConfig {
            catalog: vec![MajorWeight::new("CS", 1.0), MajorWeight::new("BIO", 0.0)],
            withdraw_probability: 0.0,
            switch_probability: 1.0,
            graduation_probability: 0.0,
            ..SwitchConfig::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let cs = Major::new("CS");
        
        for _ in 0..20 {
            assert_eq!(s.resolve("F1SEQ2_MAJOR", "S1SEQ2_MAJOR", &cs, &mut rng), cs);
        }
    }
    
    #[test]
    fn test_invalid_probability_rejected() {
        let config = SwitchConfig { switch_probability: 1.5, ..SwitchConfig::default() };
        assert!(matches!(MajorSwitch::new(config), Err(SimError::InvalidConfig(_))));
    }
}
