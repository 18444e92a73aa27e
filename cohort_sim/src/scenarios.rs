//! Named cohort scenarios.

use crate::config::CollaboratorConfig;
use crate::world::SimConfig;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Default collaborators, partial first-semester activation
    Baseline,
    
    /// Every student starts enrolled
    FullyActive,
    
    /// Nobody starts enrolled; the cohort activates on the first transition
    DormantCohort,
    
    /// Withdrawal and graduation rates well above baseline
    HighAttrition,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::Baseline,
            ScenarioId::FullyActive,
            ScenarioId::DormantCohort,
            ScenarioId::HighAttrition,
        ]
    }
    
    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "baseline",
            ScenarioId::FullyActive => "fully_active",
            ScenarioId::DormantCohort => "dormant_cohort",
            ScenarioId::HighAttrition => "high_attrition",
        }
    }
    
    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::Baseline => "60% enrolled at F1SEQ1, default sampler and switcher",
            ScenarioId::FullyActive => "100% enrolled at F1SEQ1",
            ScenarioId::DormantCohort => "0% enrolled at F1SEQ1, metrics carried forward until F1SEQ2",
            ScenarioId::HighAttrition => "25% withdrawal per transition, graduation from year 2",
        }
    }
    
    /// Active percentage used unless the caller overrides it.
    pub fn active_pct(&self) -> f64 {
        match self {
            ScenarioId::Baseline | ScenarioId::HighAttrition => 60.0,
            ScenarioId::FullyActive => 100.0,
            ScenarioId::DormantCohort => 0.0,
        }
    }
    
    /// Applies the scenario's overrides.
    pub fn apply(&self, sim: &mut SimConfig, collaborators: &mut CollaboratorConfig) {
        sim.active_pct = self.active_pct();
        
        if let ScenarioId::HighAttrition = self {
            collaborators.switcher.withdraw_probability = 0.25;
            collaborators.switcher.graduation_position = 3;
            collaborators.switcher.graduation_probability = 0.5;
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;
    
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(ScenarioId::Baseline),
            "fully_active" | "fullyactive" | "active" => Ok(ScenarioId::FullyActive),
            "dormant_cohort" | "dormantcohort" | "dormant" => Ok(ScenarioId::DormantCohort),
            "high_attrition" | "highattrition" | "attrition" => Ok(ScenarioId::HighAttrition),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_names_parse_back() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.name().parse::<ScenarioId>(), Ok(scenario));
            assert_eq!(scenario.to_string(), scenario.name());
        }
        assert_eq!("DORMANT".parse::<ScenarioId>(), Ok(ScenarioId::DormantCohort));
        assert!("chaos".parse::<ScenarioId>().is_err());
    }
    
    #[test]
    fn test_high_attrition_overrides_switcher() {
        let mut sim = SimConfig::default();
        let mut collaborators = CollaboratorConfig::default();
        
        ScenarioId::HighAttrition.apply(&mut sim, &mut collaborators);
        
        assert_eq!(collaborators.switcher.withdraw_probability, 0.25);
        assert_eq!(collaborators.switcher.graduation_position, 3);
        assert!(collaborators.build().is_ok());
    }
    
    #[test]
    fn test_activation_presets() {
        let mut sim = SimConfig::default();
        let mut collaborators = CollaboratorConfig::default();
        
        ScenarioId::DormantCohort.apply(&mut sim, &mut collaborators);
        assert_eq!(sim.active_pct, 0.0);
        assert_eq!(collaborators, CollaboratorConfig::default());
        
        ScenarioId::FullyActive.apply(&mut sim, &mut collaborators);
        assert_eq!(sim.active_pct, 100.0);
    }
}
