use crate::models::ChipDenomination;
use crate::plan::{Analysis, BlindLevel, ChipDistribution, LevelCoverage};
use crate::policy::AnalysisPolicy;
use crate::values::{nearest_value, round_to, usable_values};

/// Per-level coverage of the chosen distribution plus warnings and
/// recommendations for the tournament director.
pub fn analyze(
    distribution: &[ChipDistribution],
    structure: &[BlindLevel],
    chips: &[ChipDenomination],
    players_count: u32,
    policy: &AnalysisPolicy,
) -> Analysis {
    let denominations: Vec<u64> = distribution.iter().map(|entry| entry.value).collect();
    let usable = usable_values(&denominations);

    let level_coverage: Vec<LevelCoverage> = structure
        .iter()
        .filter(|level| !level.is_break)
        .map(|level| {
            let perfect_match = usable.contains(&level.big_blind);
            LevelCoverage {
                level: level.level,
                big_blind: level.big_blind,
                perfect_match,
                closest_value: if perfect_match {
                    None
                } else {
                    nearest_value(level.big_blind as f64, &usable)
                },
            }
        })
        .collect();

    let perfect = level_coverage.iter().filter(|entry| entry.perfect_match).count();
    let perfect_match_rate = if level_coverage.is_empty() {
        0.0
    } else {
        perfect as f64 / level_coverage.len() as f64
    };

    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if perfect_match_rate < policy.min_perfect_rate {
        warnings.push(format!(
            "only {:.0}% of big blinds can be made exactly with the distributed chips",
            perfect_match_rate * 100.0
        ));
    }

    let total_chips: u64 = distribution.iter().map(|entry| entry.count).sum();
    if total_chips < policy.min_chips {
        warnings.push(format!(
            "{} chips per player leaves little room to make change",
            total_chips
        ));
    }
    if total_chips > policy.simplify_above {
        recommendations.push(format!(
            "{} chips per player is a lot to handle; consider fewer small denominations",
            total_chips
        ));
    }

    for entry in distribution {
        let Some(chip) = chips.iter().find(|chip| chip.value == entry.value) else {
            continue;
        };
        let required = entry.count * u64::from(players_count);
        if required as f64 > chip.quantity as f64 * policy.supply_warning_pct {
            warnings.push(format!(
                "{} chips of {} ({}) needed for {} players, only {} in inventory",
                required, entry.value, chip.color, players_count, chip.quantity
            ));
        }
    }

    Analysis {
        level_coverage,
        perfect_match_rate: round_to(perfect_match_rate * 100.0, 2),
        warnings,
        recommendations,
    }
}
