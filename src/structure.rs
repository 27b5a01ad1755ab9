use tracing::debug;

use crate::error::{Error, Result};
use crate::plan::BlindLevel;
use crate::policy::StructurePolicy;
use crate::values::{largest_value_at_most, nearest_value, next_value_above, usable_values};

/// Builds a blind schedule for `stack_size` whose blinds can all be made
/// from `denominations`.
///
/// Big blinds grow geometrically and are snapped upward to the next usable
/// value, so they strictly increase level over level. Generation stops once
/// the big blind reaches the policy share of the stack, after
/// `target levels + extra_levels` levels, or when no larger usable value
/// exists. Break rows are inserted after every `break_every` levels except
/// the last one.
pub fn generate_structure(
    stack_size: u64,
    denominations: &[u64],
    target_duration: u32,
    level_duration: u32,
    policy: &StructurePolicy,
) -> Result<Vec<BlindLevel>> {
    let smallest = denominations
        .iter()
        .copied()
        .filter(|&value| value > 0)
        .min()
        .ok_or(Error::NoDenominations)?;
    if level_duration == 0 {
        return Err(Error::LevelDurationZero);
    }
    let usable = usable_values(denominations);

    let target_levels = (target_duration / level_duration) as usize;
    let max_levels = target_levels + policy.extra_levels;
    let late_phase = target_levels as f64 * policy.late_phase_pct;
    let final_big_blind = stack_size as f64 * policy.final_big_blind_pct;

    let opening = (stack_size as f64 * policy.opening_big_blind_pct)
        .max(policy.min_opening_big_blind as f64);
    let mut big_blind = nearest_value(opening, &usable).ok_or(Error::NoDenominations)?;
    let mut levels: Vec<BlindLevel> = Vec::new();

    loop {
        let number = levels.len() as u32 + 1;
        let small_blind = nearest_value(big_blind as f64 / 2.0, &usable)
            .unwrap_or(big_blind)
            .min(big_blind);
        let ante = (number >= policy.ante_start_level).then(|| {
            largest_value_at_most(big_blind as f64 * policy.ante_pct, &usable).unwrap_or(smallest)
        });
        levels.push(BlindLevel::play(
            number,
            small_blind,
            big_blind,
            ante,
            level_duration,
        ));

        if big_blind as f64 >= final_big_blind || levels.len() >= max_levels {
            break;
        }

        let rate = if levels.len() as f64 > late_phase {
            policy.late_growth
        } else {
            policy.growth
        };
        match next_value_above(big_blind as f64 * rate, big_blind, &usable) {
            Some(next) => big_blind = next,
            None => {
                debug!(
                    stack_size,
                    big_blind,
                    levels = levels.len(),
                    "usable values exhausted, ending structure early"
                );
                break;
            }
        }
    }

    Ok(insert_breaks(levels, policy))
}

fn insert_breaks(levels: Vec<BlindLevel>, policy: &StructurePolicy) -> Vec<BlindLevel> {
    let last = levels.len().saturating_sub(1);
    let mut structure = Vec::with_capacity(levels.len() + levels.len() / policy.break_every.max(1));
    for (idx, level) in levels.into_iter().enumerate() {
        let after = level.level;
        structure.push(level);
        if policy.break_every > 0 && (idx + 1) % policy.break_every == 0 && idx != last {
            structure.push(BlindLevel::pause(after, policy.break_duration));
        }
    }
    structure
}
