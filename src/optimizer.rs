use std::collections::HashSet;

use tracing::{debug, info};

use crate::allocation::allocate;
use crate::analysis::analyze;
use crate::error::{Error, Result};
use crate::metrics::{score, ScoreInput};
use crate::models::OptimizeParams;
use crate::plan::OptimizationResult;
use crate::structure::generate_structure;

/// Picks the best-scoring stack size, blind structure and chip distribution
/// for the inventory in `params`.
///
/// Rungs of the stack ladder above `total inventory value / stacks needed`
/// are skipped. Rungs whose allocation is infeasible are skipped silently;
/// the fallback ladder is only consulted when the primary ladder yields
/// nothing. On equal scores the smaller stack wins.
pub fn optimize(params: &OptimizeParams) -> Result<OptimizationResult> {
    validate_params(params)?;

    let stacks_needed = params.stacks_needed();
    let total_value = params.total_inventory_value();
    let max_stack = total_value / stacks_needed;
    let denominations = params.denomination_values();
    let policy = &params.policy;

    debug!(total_value, stacks_needed, max_stack, "optimizing chip plan");

    let mut best = best_on_ladder(params, &policy.stack_ladder, max_stack, &denominations)?;
    if best.is_none() && !policy.fallback_ladder.is_empty() {
        debug!(max_stack, "no primary stack size fits, trying fallback ladder");
        best = best_on_ladder(params, &policy.fallback_ladder, max_stack, &denominations)?;
    }

    match best {
        Some(result) => {
            info!(
                stack_size = result.stack_size,
                overall_score = result.metrics.overall_score,
                levels = result.structure.len(),
                "selected chip plan"
            );
            Ok(result)
        }
        None => Err(Error::Infeasible {
            players: params.players_count,
            rebuys: params.rebuys_expected,
            total_value,
        }),
    }
}

fn best_on_ladder(
    params: &OptimizeParams,
    ladder: &[u64],
    max_stack: u64,
    denominations: &[u64],
) -> Result<Option<OptimizationResult>> {
    let mut candidates: Vec<u64> = ladder
        .iter()
        .copied()
        .filter(|&stack| stack <= max_stack)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    let mut best: Option<OptimizationResult> = None;
    for stack_size in candidates {
        match evaluate_candidate(params, stack_size, denominations)? {
            Some(result) => {
                debug!(
                    stack_size,
                    overall_score = result.metrics.overall_score,
                    coverage = result.metrics.blind_coverage_score,
                    "scored candidate"
                );
                let better = best
                    .as_ref()
                    .map_or(true, |current| {
                        result.metrics.overall_score > current.metrics.overall_score
                    });
                if better {
                    best = Some(result);
                }
            }
            None => debug!(stack_size, "candidate infeasible"),
        }
    }
    Ok(best)
}

/// Runs synthesis, allocation, scoring and analysis for one stack size.
/// `Ok(None)` means the inventory cannot fill this stack.
pub fn evaluate_candidate(
    params: &OptimizeParams,
    stack_size: u64,
    denominations: &[u64],
) -> Result<Option<OptimizationResult>> {
    let policy = &params.policy;
    let structure = generate_structure(
        stack_size,
        denominations,
        params.target_duration,
        params.level_duration,
        &policy.structure,
    )?;

    let Some(distribution) = allocate(
        &params.available_chips,
        stack_size,
        params.stacks_needed(),
        &policy.allocation,
    ) else {
        return Ok(None);
    };

    let metrics = score(
        &ScoreInput {
            distribution: &distribution,
            structure: &structure,
            chips: &params.available_chips,
            stacks_needed: params.stacks_needed(),
            target_duration: params.target_duration,
        },
        policy,
    );
    let analysis = analyze(
        &distribution,
        &structure,
        &params.available_chips,
        params.players_count,
        &policy.analysis,
    );

    Ok(Some(OptimizationResult {
        stack_size,
        distribution,
        structure,
        metrics,
        analysis,
    }))
}

pub fn validate_params(params: &OptimizeParams) -> Result<()> {
    if params.available_chips.is_empty() {
        return Err(Error::InvalidInventory(
            "chip list must not be empty".to_string(),
        ));
    }
    let mut values = HashSet::new();
    for chip in &params.available_chips {
        if chip.value == 0 {
            return Err(Error::InvalidInventory(format!(
                "chip '{}' has a value of 0",
                chip.color
            )));
        }
        if !values.insert(chip.value) {
            return Err(Error::DuplicateChipValue(chip.value));
        }
    }
    if params.available_chips.iter().all(|chip| chip.quantity == 0) {
        return Err(Error::InvalidInventory(
            "every chip quantity is 0".to_string(),
        ));
    }
    if params.players_count == 0 {
        return Err(Error::PlayersZero);
    }
    if params.target_duration == 0 {
        return Err(Error::TargetDurationZero);
    }
    if params.level_duration == 0 {
        return Err(Error::LevelDurationZero);
    }
    params.policy.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChipDenomination;

    fn scenario_a() -> OptimizeParams {
        OptimizeParams::new(
            vec![
                ChipDenomination::new(25, 100, "red"),
                ChipDenomination::new(100, 100, "blue"),
                ChipDenomination::new(500, 50, "green"),
                ChipDenomination::new(1000, 25, "black"),
            ],
            10,
            6,
            180,
        )
    }

    #[test]
    fn small_inventory_falls_back_to_lower_stacks() {
        let params = scenario_a();
        let result = optimize(&params).expect("optimization should succeed");
        assert!(result.stack_size <= 62_500 / 16);
        assert!(params.policy.fallback_ladder.contains(&result.stack_size));
        assert!(result.metrics.blind_coverage_score >= 50.0);
    }

    #[test]
    fn candidate_3000_is_feasible() {
        let params = scenario_a();
        let result = evaluate_candidate(&params, 3000, &params.denomination_values())
            .unwrap()
            .unwrap();
        assert_eq!(result.metrics.total_chips_per_player, 12);
        assert!((result.metrics.overall_score - 86.01).abs() < 1e-9);
    }

    #[test]
    fn large_inventory_uses_primary_ladder() {
        let params = OptimizeParams::new(
            vec![
                ChipDenomination::new(25, 500, "green"),
                ChipDenomination::new(100, 500, "black"),
                ChipDenomination::new(500, 300, "purple"),
                ChipDenomination::new(1000, 300, "yellow"),
                ChipDenomination::new(5000, 100, "orange"),
            ],
            20,
            5,
            240,
        );
        let result = optimize(&params).expect("optimization should succeed");
        assert!(params.policy.stack_ladder.contains(&result.stack_size));
    }

    #[test]
    fn empty_inventory_is_rejected() {
        let params = OptimizeParams::new(Vec::new(), 10, 0, 180);
        assert!(matches!(optimize(&params), Err(Error::InvalidInventory(_))));
    }

    #[test]
    fn zero_quantity_inventory_is_rejected() {
        let params = OptimizeParams::new(vec![ChipDenomination::new(25, 0, "red")], 10, 0, 180);
        assert!(matches!(optimize(&params), Err(Error::InvalidInventory(_))));
    }

    #[test]
    fn duplicate_values_are_rejected() {
        let params = OptimizeParams::new(
            vec![
                ChipDenomination::new(25, 10, "red"),
                ChipDenomination::new(25, 10, "pink"),
            ],
            2,
            0,
            60,
        );
        let err = optimize(&params).unwrap_err();
        assert_eq!(err.to_string(), "duplicate chip value '25'");
    }

    #[test]
    fn zero_players_are_rejected() {
        let mut params = scenario_a();
        params.players_count = 0;
        assert!(matches!(optimize(&params), Err(Error::PlayersZero)));
    }

    #[test]
    fn infeasible_message_names_the_constraint() {
        let params = OptimizeParams::new(vec![ChipDenomination::new(25, 4, "red")], 20, 10, 180);
        let err = optimize(&params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not enough chip value for 20 players + 10 rebuys (inventory total 100)"
        );
    }

    fn deep_inventory() -> Vec<ChipDenomination> {
        vec![
            ChipDenomination::new(25, 1000, "red"),
            ChipDenomination::new(100, 1000, "blue"),
            ChipDenomination::new(500, 1000, "green"),
            ChipDenomination::new(1000, 1000, "black"),
        ]
    }

    #[test]
    fn very_long_levels_score_without_overflow() {
        let mut params = OptimizeParams::new(deep_inventory(), 10, 0, 60);
        params.level_duration = 1_000_000_000;
        let result = optimize(&params).expect("optimization should succeed");
        assert!(result.metrics.duration_match >= 1_000_000_000);
        assert!((0.0..=100.0).contains(&result.metrics.overall_score));
    }

    #[test]
    fn huge_chip_values_score_without_overflow() {
        let mut chips = deep_inventory();
        chips.push(ChipDenomination::new(1 << 62, 4, "gold"));
        chips.push(ChipDenomination::new((1 << 62) + 1, 4, "platinum"));
        let params = OptimizeParams::new(chips, 10, 0, 180);
        let result = optimize(&params).expect("optimization should succeed");
        assert!(result
            .distribution
            .iter()
            .all(|entry| entry.value < 1 << 62));
        assert!(result.metrics.utilization_rate < 1e-6);
    }
}
