//! Tunable constants for the planner. Every field has a default so config
//! files only need to name what they change.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlannerPolicy {
    pub weights: ScoreWeights,
    pub structure: StructurePolicy,
    pub allocation: AllocationPolicy,
    pub playability: PlayabilityPolicy,
    pub analysis: AnalysisPolicy,
    pub revaluation: RevaluationPolicy,
    pub stack_ladder: Vec<u64>,
    /// Only tried when no rung of `stack_ladder` yields a feasible plan.
    pub fallback_ladder: Vec<u64>,
    /// Whether break minutes count towards the actual tournament duration.
    pub count_breaks_in_duration: bool,
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            structure: StructurePolicy::default(),
            allocation: AllocationPolicy::default(),
            playability: PlayabilityPolicy::default(),
            analysis: AnalysisPolicy::default(),
            revaluation: RevaluationPolicy::default(),
            stack_ladder: vec![
                5000, 7500, 10000, 12500, 15000, 20000, 25000, 30000, 40000, 50000,
            ],
            fallback_ladder: vec![1000, 1500, 2000, 2500, 3000, 4000],
            count_breaks_in_duration: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScoreWeights {
    pub coverage: f64,
    pub playability: f64,
    pub duration: f64,
    pub utilization: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coverage: 0.50,
            playability: 0.20,
            duration: 0.20,
            utilization: 0.10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StructurePolicy {
    pub opening_big_blind_pct: f64,
    pub min_opening_big_blind: u64,
    pub ante_start_level: u32,
    pub ante_pct: f64,
    pub growth: f64,
    pub late_growth: f64,
    /// Share of the target level count after which `late_growth` applies.
    pub late_phase_pct: f64,
    pub final_big_blind_pct: f64,
    pub extra_levels: usize,
    pub break_every: usize,
    pub break_duration: u32,
}

impl Default for StructurePolicy {
    fn default() -> Self {
        Self {
            opening_big_blind_pct: 0.01,
            min_opening_big_blind: 25,
            ante_start_level: 5,
            ante_pct: 0.10,
            growth: 1.35,
            late_growth: 1.5,
            late_phase_pct: 0.8,
            final_big_blind_pct: 0.10,
            extra_levels: 5,
            break_every: 4,
            break_duration: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AllocationPolicy {
    pub small_tier_pct: f64,
    pub large_tier_pct: f64,
    pub change_target_pct: f64,
    pub change_max_count: u64,
    pub mid_target_pct: f64,
    pub mid_max_count: u64,
    pub min_fill_pct: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            small_tier_pct: 0.05,
            large_tier_pct: 0.20,
            change_target_pct: 0.005,
            change_max_count: 6,
            mid_target_pct: 0.10,
            mid_max_count: 8,
            min_fill_pct: 0.90,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlayabilityPolicy {
    pub max_chips: u64,
    pub min_chips: u64,
    pub over_penalty: f64,
    pub under_penalty: f64,
    pub variety_bonus: f64,
    pub variety_min: usize,
}

impl Default for PlayabilityPolicy {
    fn default() -> Self {
        Self {
            max_chips: 30,
            min_chips: 12,
            over_penalty: 2.0,
            under_penalty: 5.0,
            variety_bonus: 10.0,
            variety_min: 4,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AnalysisPolicy {
    pub min_perfect_rate: f64,
    pub min_chips: u64,
    pub simplify_above: u64,
    pub supply_warning_pct: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            min_perfect_rate: 0.60,
            min_chips: 12,
            simplify_above: 25,
            supply_warning_pct: 0.90,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RevaluationPolicy {
    pub seed_big_blind: u64,
    pub growth: f64,
    pub ante_start_level: u32,
    pub ante_pct: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub min_improvement: f64,
    pub worth_it_margin: f64,
}

impl Default for RevaluationPolicy {
    fn default() -> Self {
        Self {
            seed_big_blind: 50,
            growth: 1.35,
            ante_start_level: 5,
            ante_pct: 0.10,
            min_ratio: 0.5,
            max_ratio: 2.0,
            min_improvement: 5.0,
            worth_it_margin: 5.0,
        }
    }
}

impl PlannerPolicy {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("coverage", self.weights.coverage),
            ("playability", self.weights.playability),
            ("duration", self.weights.duration),
            ("utilization", self.weights.utilization),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidPolicy(format!(
                    "weight '{}' must be a non-negative number (got {})",
                    name, weight
                )));
            }
        }

        let structure = &self.structure;
        if structure.growth <= 1.0 || structure.late_growth <= 1.0 {
            return Err(Error::InvalidPolicy(
                "blind growth rates must be greater than 1".to_string(),
            ));
        }
        if structure.break_every == 0 {
            return Err(Error::InvalidPolicy(
                "break_every must be greater than 0".to_string(),
            ));
        }
        if structure.opening_big_blind_pct <= 0.0 || structure.final_big_blind_pct <= 0.0 {
            return Err(Error::InvalidPolicy(
                "big blind percentages must be greater than 0".to_string(),
            ));
        }

        let allocation = &self.allocation;
        if !(0.0 < allocation.small_tier_pct && allocation.small_tier_pct < allocation.large_tier_pct)
        {
            return Err(Error::InvalidPolicy(format!(
                "tier thresholds must satisfy 0 < small ({}) < large ({})",
                allocation.small_tier_pct, allocation.large_tier_pct
            )));
        }
        if !(0.0..=1.0).contains(&allocation.min_fill_pct) {
            return Err(Error::InvalidPolicy(format!(
                "min_fill_pct must be within 0..=1 (got {})",
                allocation.min_fill_pct
            )));
        }

        if self.stack_ladder.is_empty() || self.stack_ladder.contains(&0) {
            return Err(Error::InvalidPolicy(
                "stack_ladder must contain positive stack sizes".to_string(),
            ));
        }
        if self.fallback_ladder.contains(&0) {
            return Err(Error::InvalidPolicy(
                "fallback_ladder must contain positive stack sizes".to_string(),
            ));
        }

        let revaluation = &self.revaluation;
        if revaluation.seed_big_blind == 0 || revaluation.growth <= 1.0 {
            return Err(Error::InvalidPolicy(
                "revaluation needs a positive seed and growth above 1".to_string(),
            ));
        }
        if !(0.0 < revaluation.min_ratio && revaluation.min_ratio <= revaluation.max_ratio) {
            return Err(Error::InvalidPolicy(format!(
                "revaluation ratio window {}..{} is inverted",
                revaluation.min_ratio, revaluation.max_ratio
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert!(PlannerPolicy::default().validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut policy = PlannerPolicy::default();
        policy.weights.duration = -0.1;
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("weight 'duration'"));
    }

    #[test]
    fn flat_growth_is_rejected() {
        let mut policy = PlannerPolicy::default();
        policy.structure.growth = 1.0;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn inverted_tiers_are_rejected() {
        let mut policy = PlannerPolicy::default();
        policy.allocation.small_tier_pct = 0.3;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let policy: PlannerPolicy = toml::from_str(
            r#"
count_breaks_in_duration = true
[weights]
coverage = 0.7
"#,
        )
        .unwrap();
        assert_eq!(policy.weights.coverage, 0.7);
        assert_eq!(policy.weights.playability, 0.20);
        assert!(policy.count_breaks_in_duration);
        assert_eq!(policy.stack_ladder.len(), 10);
    }
}
