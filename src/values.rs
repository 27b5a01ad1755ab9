use std::collections::BTreeSet;

/// Tolerance for float thresholds and ceiling divisions, so that e.g.
/// `0.005 * 5000` divided by 25 counts as exactly one chip.
pub(crate) const EPSILON: f64 = 1e-9;

const MULTIPLIERS: [u64; 5] = [1, 2, 4, 5, 10];

/// Blind values that can be made from a single denomination: the value
/// itself and its 2x, 4x, 5x and 10x multiples.
pub fn usable_values(denominations: &[u64]) -> BTreeSet<u64> {
    denominations
        .iter()
        .filter(|&&value| value > 0)
        .flat_map(|&value| {
            MULTIPLIERS
                .iter()
                .map(move |&multiplier| value.saturating_mul(multiplier))
        })
        .collect()
}

/// Closest usable value to `target`. On equal distance the smaller value
/// wins, which falls out of scanning in ascending order.
pub fn nearest_value(target: f64, usable: &BTreeSet<u64>) -> Option<u64> {
    let mut best: Option<(u64, f64)> = None;
    for &value in usable {
        let distance = (value as f64 - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((value, distance)),
        }
    }
    best.map(|(value, _)| value)
}

/// Smallest usable value strictly above both `candidate` and `floor`.
pub fn next_value_above(candidate: f64, floor: u64, usable: &BTreeSet<u64>) -> Option<u64> {
    usable
        .range(floor.saturating_add(1)..)
        .copied()
        .find(|&value| value as f64 > candidate + EPSILON)
}

/// Largest usable value not above `limit`.
pub fn largest_value_at_most(limit: f64, usable: &BTreeSet<u64>) -> Option<u64> {
    usable
        .iter()
        .rev()
        .copied()
        .find(|&value| value as f64 <= limit + EPSILON)
}

pub(crate) fn ceil_ratio(numerator: f64, denominator: f64) -> u64 {
    if denominator <= 0.0 {
        return 0;
    }
    (numerator / denominator - EPSILON).ceil().max(0.0) as u64
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
