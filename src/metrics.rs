use crate::models::ChipDenomination;
use crate::plan::{BlindLevel, ChipDistribution, Metrics};
use crate::policy::{PlannerPolicy, PlayabilityPolicy, ScoreWeights};
use crate::values::{round_to, usable_values};

const PERFECT_MATCH: f64 = 1.0;
const GOOD_MATCH: f64 = 0.5;
const MAX_GOOD_MULTIPLE: u64 = 10;

pub struct ScoreInput<'a> {
    pub distribution: &'a [ChipDistribution],
    pub structure: &'a [BlindLevel],
    pub chips: &'a [ChipDenomination],
    pub stacks_needed: u64,
    pub target_duration: u32,
}

pub fn score(input: &ScoreInput, policy: &PlannerPolicy) -> Metrics {
    let total_chips_per_player = input.distribution.iter().map(|entry| entry.count).sum();
    let coverage = blind_coverage_score(input.distribution, input.structure);
    let playability = playability_score(input.distribution, &policy.playability);
    let actual = actual_duration(input.structure, policy.count_breaks_in_duration);
    let duration_match = u64::from(input.target_duration).abs_diff(actual);
    let utilization = utilization_rate(input.distribution, input.chips, input.stacks_needed);
    let duration = duration_score(duration_match, input.target_duration);
    let overall = overall_score(&policy.weights, coverage, playability, duration, utilization);

    Metrics {
        total_chips_per_player,
        blind_coverage_score: round_to(coverage, 2),
        playability_score: round_to(playability, 2),
        duration_match,
        utilization_rate: round_to(utilization, 2),
        overall_score: round_to(overall, 2),
    }
}

/// Share of blind values (SB, BB, ante) that the distribution can make.
/// Values reachable through the usable multiples count fully, other small
/// integer multiples of a handed-out denomination count half.
pub fn blind_coverage_score(distribution: &[ChipDistribution], structure: &[BlindLevel]) -> f64 {
    let denominations: Vec<u64> = distribution.iter().map(|entry| entry.value).collect();
    let usable = usable_values(&denominations);

    let mut checked = 0usize;
    let mut weight = 0.0;
    for value in structure.iter().flat_map(BlindLevel::blind_values) {
        checked += 1;
        if usable.contains(&value) {
            weight += PERFECT_MATCH;
        } else if denominations.iter().any(|&denomination| {
            denomination > 0
                && value % denomination == 0
                && value / denomination <= MAX_GOOD_MULTIPLE
        }) {
            weight += GOOD_MATCH;
        }
    }

    if checked == 0 {
        return 0.0;
    }
    100.0 * weight / checked as f64
}

pub fn playability_score(distribution: &[ChipDistribution], policy: &PlayabilityPolicy) -> f64 {
    let total: u64 = distribution.iter().map(|entry| entry.count).sum();
    let mut score = 100.0;
    if total > policy.max_chips {
        score -= policy.over_penalty * (total - policy.max_chips) as f64;
    }
    if total < policy.min_chips {
        score -= policy.under_penalty * (policy.min_chips - total) as f64;
    }
    if distribution.len() >= policy.variety_min {
        score += policy.variety_bonus;
    }
    score.clamp(0.0, 100.0)
}

pub fn actual_duration(structure: &[BlindLevel], include_breaks: bool) -> u64 {
    structure
        .iter()
        .filter(|level| include_breaks || !level.is_break)
        .map(|level| u64::from(level.duration))
        .fold(0u64, u64::saturating_add)
}

pub fn duration_score(duration_match: u64, target_duration: u32) -> f64 {
    if target_duration == 0 {
        return 0.0;
    }
    (100.0 - 100.0 * duration_match as f64 / f64::from(target_duration)).max(0.0)
}

pub fn utilization_rate(
    distribution: &[ChipDistribution],
    chips: &[ChipDenomination],
    stacks_needed: u64,
) -> f64 {
    let inventory = chips
        .iter()
        .map(ChipDenomination::inventory_value)
        .fold(0u64, u64::saturating_add);
    if inventory == 0 {
        return 0.0;
    }
    let stack = distribution
        .iter()
        .map(|entry| entry.total)
        .fold(0u64, u64::saturating_add);
    100.0 * (stack as f64 * stacks_needed as f64) / inventory as f64
}

fn overall_score(
    weights: &ScoreWeights,
    coverage: f64,
    playability: f64,
    duration: f64,
    utilization: f64,
) -> f64 {
    let score = weights.coverage * coverage
        + weights.playability * playability
        + weights.duration * duration
        + weights.utilization * utilization.min(100.0);
    score.clamp(0.0, 100.0)
}
