use std::collections::{BTreeSet, HashSet};

use tracing::{info, trace};

use crate::error::{Error, Result};
use crate::models::{ChipDenomination, OptimizeParams};
use crate::optimizer::{optimize, validate_params};
use crate::plan::{OptimizationResult, RevaluationResult, RevaluationSuggestion};
use crate::policy::RevaluationPolicy;
use crate::values::round_to;

const REACH_MULTIPLIERS: [u64; 3] = [1, 2, 4];
const FEASIBILITY_SWING: f64 = 100.0;

/// Checks whether relabeling some chips would let the inventory follow an
/// idealized blind progression more closely, and compares the optimizer's
/// best plan before and after applying every suggested relabel.
pub fn analyze_revaluation(params: &OptimizeParams) -> Result<RevaluationResult> {
    validate_params(params)?;
    let policy = &params.policy.revaluation;

    let before = optimize_if_feasible(params)?;

    let ideal = ideal_values(params.target_duration, params.level_duration, policy);
    let suggestions = suggest_relabels(&params.available_chips, &ideal, policy);

    let revalued_chips = apply_suggestions(&params.available_chips, &suggestions);
    let after = if suggestions.is_empty() {
        before.clone()
    } else {
        let revalued = OptimizeParams {
            available_chips: revalued_chips.clone(),
            ..params.clone()
        };
        optimize_if_feasible(&revalued)?
    };

    let (worth_it, improvement_score) = verdict(before.as_ref(), after.as_ref(), policy);
    info!(
        suggestions = suggestions.len(),
        worth_it, improvement_score, "revaluation analyzed"
    );

    Ok(RevaluationResult {
        suggestions,
        ideal_values: ideal.into_iter().collect(),
        revalued_chips,
        before_optimization: before,
        after_optimization: after,
        worth_it,
        improvement_score,
    })
}

fn optimize_if_feasible(params: &OptimizeParams) -> Result<Option<OptimizationResult>> {
    match optimize(params) {
        Ok(result) => Ok(Some(result)),
        Err(Error::Infeasible { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Blind values of a chip-independent schedule: pure geometric growth from
/// the seed big blind, rounded to poker-friendly steps.
pub fn ideal_values(
    target_duration: u32,
    level_duration: u32,
    policy: &RevaluationPolicy,
) -> BTreeSet<u64> {
    let levels = if level_duration == 0 {
        0
    } else {
        target_duration / level_duration
    };
    let mut values = BTreeSet::new();
    let mut big_blind = policy.seed_big_blind as f64;
    for level in 1..=levels {
        values.insert(friendly_round(big_blind));
        values.insert(friendly_round(big_blind / 2.0));
        if level >= policy.ante_start_level {
            values.insert(friendly_round(big_blind * policy.ante_pct));
        }
        big_blind *= policy.growth;
    }
    values
}

fn friendly_round(value: f64) -> u64 {
    let step = if value < 1_000.0 {
        25.0
    } else if value < 10_000.0 {
        100.0
    } else {
        1_000.0
    };
    ((value / step).round() * step).max(step) as u64
}

/// How many ideal values one chip reaches by itself, doubled or quadrupled.
fn reach(value: u64, ideal: &BTreeSet<u64>) -> usize {
    REACH_MULTIPLIERS
        .iter()
        .filter(|&&multiplier| ideal.contains(&value.saturating_mul(multiplier)))
        .count()
}

pub fn suggest_relabels(
    chips: &[ChipDenomination],
    ideal: &BTreeSet<u64>,
    policy: &RevaluationPolicy,
) -> Vec<RevaluationSuggestion> {
    let existing: HashSet<u64> = chips.iter().map(|chip| chip.value).collect();
    let mut claimed: HashSet<u64> = HashSet::new();
    let mut suggestions = Vec::new();

    for chip in chips.iter().filter(|chip| chip.quantity > 0) {
        let current = reach(chip.value, ideal);
        let low = chip.value as f64 * policy.min_ratio;
        let high = chip.value as f64 * policy.max_ratio;

        let mut best: Option<(u64, usize)> = None;
        for &candidate in ideal {
            let as_f64 = candidate as f64;
            if as_f64 < low || as_f64 > high {
                continue;
            }
            if existing.contains(&candidate) || claimed.contains(&candidate) {
                continue;
            }
            let hits = reach(candidate, ideal);
            trace!(value = chip.value, candidate, hits, current, "relabel candidate");
            let closer = |other: u64| candidate.abs_diff(chip.value) < other.abs_diff(chip.value);
            best = match best {
                Some((other, other_hits))
                    if other_hits > hits || (other_hits == hits && !closer(other)) =>
                {
                    Some((other, other_hits))
                }
                _ => Some((candidate, hits)),
            };
        }

        let Some((suggested, hits)) = best else {
            continue;
        };
        if hits <= current {
            continue;
        }
        let improved = 100.0 * (hits - current) as f64 / current.max(1) as f64;
        if improved <= policy.min_improvement {
            continue;
        }

        claimed.insert(suggested);
        suggestions.push(RevaluationSuggestion {
            original_value: chip.value,
            suggested_value: suggested,
            color: chip.color.clone(),
            reason: format!(
                "as {} the {} chip makes {} ideal blind values instead of {}",
                suggested, chip.color, hits, current
            ),
            improved_coverage: round_to(improved, 2),
        });
    }

    suggestions.sort_by(|a, b| b.improved_coverage.total_cmp(&a.improved_coverage));
    suggestions
}

fn apply_suggestions(
    chips: &[ChipDenomination],
    suggestions: &[RevaluationSuggestion],
) -> Vec<ChipDenomination> {
    chips
        .iter()
        .map(|chip| {
            let value = suggestions
                .iter()
                .find(|suggestion| suggestion.original_value == chip.value)
                .map_or(chip.value, |suggestion| suggestion.suggested_value);
            ChipDenomination {
                value,
                ..chip.clone()
            }
        })
        .collect()
}

fn verdict(
    before: Option<&OptimizationResult>,
    after: Option<&OptimizationResult>,
    policy: &RevaluationPolicy,
) -> (bool, f64) {
    match (before, after) {
        (None, Some(_)) => (true, FEASIBILITY_SWING),
        (Some(_), None) => (false, -FEASIBILITY_SWING),
        (None, None) => (false, 0.0),
        (Some(before), Some(after)) => {
            let delta = round_to(
                after.metrics.overall_score - before.metrics.overall_score,
                2,
            );
            (delta > policy.worth_it_margin, delta)
        }
    }
}
