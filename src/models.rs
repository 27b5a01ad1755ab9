use serde::{Deserialize, Serialize};

use crate::policy::PlannerPolicy;

/// A physical chip type in the tournament inventory.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChipDenomination {
    pub value: u64,
    pub quantity: u64,
    #[serde(default)]
    pub color: String,
}

impl ChipDenomination {
    pub fn new(value: u64, quantity: u64, color: impl Into<String>) -> Self {
        Self {
            value,
            quantity,
            color: color.into(),
        }
    }

    pub fn inventory_value(&self) -> u64 {
        self.value.saturating_mul(self.quantity)
    }
}

/// Inputs for a single optimization or revaluation run.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OptimizeParams {
    #[serde(alias = "availableChips")]
    pub available_chips: Vec<ChipDenomination>,
    #[serde(alias = "playersCount")]
    pub players_count: u32,
    #[serde(default, alias = "rebuysExpected")]
    pub rebuys_expected: u32,
    #[serde(alias = "targetDuration")]
    pub target_duration: u32,
    #[serde(default = "default_level_duration", alias = "levelDuration")]
    pub level_duration: u32,
    #[serde(default)]
    pub policy: PlannerPolicy,
}

impl OptimizeParams {
    pub fn new(
        available_chips: Vec<ChipDenomination>,
        players_count: u32,
        rebuys_expected: u32,
        target_duration: u32,
    ) -> Self {
        Self {
            available_chips,
            players_count,
            rebuys_expected,
            target_duration,
            level_duration: default_level_duration(),
            policy: PlannerPolicy::default(),
        }
    }

    /// Number of starting stacks that must be issued from the inventory.
    pub fn stacks_needed(&self) -> u64 {
        u64::from(self.players_count) + u64::from(self.rebuys_expected)
    }

    pub fn total_inventory_value(&self) -> u64 {
        self.available_chips
            .iter()
            .map(ChipDenomination::inventory_value)
            .fold(0u64, u64::saturating_add)
    }

    /// Distinct denomination values that have at least one physical chip.
    pub fn denomination_values(&self) -> Vec<u64> {
        let mut values: Vec<u64> = self
            .available_chips
            .iter()
            .filter(|chip| chip.quantity > 0)
            .map(|chip| chip.value)
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

pub(crate) fn default_level_duration() -> u32 {
    15
}
