use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ChipDenomination;

/// One row of the tournament clock. Breaks sit between integer levels
/// (e.g. `4.5`) and carry zero blinds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BlindLevel {
    pub level: f64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: Option<u64>,
    pub duration: u32,
    pub is_break: bool,
}

impl BlindLevel {
    pub fn play(
        level: u32,
        small_blind: u64,
        big_blind: u64,
        ante: Option<u64>,
        duration: u32,
    ) -> Self {
        Self {
            level: f64::from(level),
            small_blind,
            big_blind,
            ante,
            duration,
            is_break: false,
        }
    }

    pub fn pause(after_level: f64, duration: u32) -> Self {
        Self {
            level: after_level + 0.5,
            small_blind: 0,
            big_blind: 0,
            ante: None,
            duration,
            is_break: true,
        }
    }

    /// Blind values a dealer must be able to make for this level.
    pub fn blind_values(&self) -> Vec<u64> {
        if self.is_break {
            return Vec::new();
        }
        let mut values = vec![self.small_blind, self.big_blind];
        values.extend(self.ante);
        values
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ChipPurpose {
    ChangeMaking,
    MidGame,
    LateGame,
    Fill,
}

impl fmt::Display for ChipPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChipPurpose::ChangeMaking => "change-making",
            ChipPurpose::MidGame => "mid-game",
            ChipPurpose::LateGame => "late-game",
            ChipPurpose::Fill => "fill",
        };
        f.write_str(label)
    }
}

/// One denomination's share of a single player's starting stack.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChipDistribution {
    pub value: u64,
    pub count: u64,
    pub total: u64,
    pub color: String,
    pub purpose: ChipPurpose,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Metrics {
    pub total_chips_per_player: u64,
    pub blind_coverage_score: f64,
    pub playability_score: f64,
    /// Absolute gap between target and actual duration, in minutes.
    pub duration_match: u64,
    pub utilization_rate: f64,
    pub overall_score: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LevelCoverage {
    pub level: f64,
    pub big_blind: u64,
    pub perfect_match: bool,
    /// Closest realizable value when the big blind is not a perfect match.
    pub closest_value: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Analysis {
    pub level_coverage: Vec<LevelCoverage>,
    pub perfect_match_rate: f64,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct OptimizationResult {
    pub stack_size: u64,
    pub distribution: Vec<ChipDistribution>,
    pub structure: Vec<BlindLevel>,
    pub metrics: Metrics,
    pub analysis: Analysis,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RevaluationSuggestion {
    pub original_value: u64,
    pub suggested_value: u64,
    pub color: String,
    pub reason: String,
    pub improved_coverage: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RevaluationResult {
    pub suggestions: Vec<RevaluationSuggestion>,
    pub ideal_values: Vec<u64>,
    pub revalued_chips: Vec<ChipDenomination>,
    pub before_optimization: Option<OptimizationResult>,
    pub after_optimization: Option<OptimizationResult>,
    pub worth_it: bool,
    pub improvement_score: f64,
}
