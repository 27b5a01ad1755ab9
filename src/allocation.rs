use tracing::debug;

use crate::models::ChipDenomination;
use crate::plan::{ChipDistribution, ChipPurpose};
use crate::policy::AllocationPolicy;
use crate::values::{ceil_ratio, EPSILON};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Change,
    Mid,
    Late,
}

struct Slot<'a> {
    chip: &'a ChipDenomination,
    ceiling: u64,
    count: u64,
    purpose: Option<ChipPurpose>,
}

impl Slot<'_> {
    fn take(&mut self, count: u64, purpose: ChipPurpose, remaining: &mut u64) {
        if count == 0 {
            return;
        }
        self.count += count;
        self.purpose.get_or_insert(purpose);
        *remaining = remaining.saturating_sub(count * self.chip.value);
    }
}

/// Splits one player's starting stack across the inventory.
///
/// Change-making and mid-game chips are handed out first (ascending value),
/// late-game chips next (descending value), then a fill pass tops up from
/// the highest value down. No denomination is issued beyond
/// `quantity / stacks_needed` per stack. Returns `None` when the allocated
/// total stays below the feasibility share of `stack_size`.
pub fn allocate(
    chips: &[ChipDenomination],
    stack_size: u64,
    stacks_needed: u64,
    policy: &AllocationPolicy,
) -> Option<Vec<ChipDistribution>> {
    if stack_size == 0 || stacks_needed == 0 {
        return None;
    }
    let stack = stack_size as f64;

    let mut slots: Vec<Slot> = chips
        .iter()
        .filter(|chip| chip.value > 0)
        .map(|chip| Slot {
            chip,
            ceiling: chip.quantity / stacks_needed,
            count: 0,
            purpose: None,
        })
        .collect();
    slots.sort_by_key(|slot| slot.chip.value);

    let tier_of = |value: u64| {
        let value = value as f64;
        if value < stack * policy.small_tier_pct - EPSILON {
            Tier::Change
        } else if value < stack * policy.large_tier_pct - EPSILON {
            Tier::Mid
        } else {
            Tier::Late
        }
    };

    let mut remaining = stack_size;

    for slot in slots.iter_mut().filter(|slot| tier_of(slot.chip.value) == Tier::Change) {
        let desired = ceil_ratio(stack * policy.change_target_pct, slot.chip.value as f64)
            .min(policy.change_max_count);
        let count = desired
            .min(slot.ceiling)
            .min(remaining / slot.chip.value);
        slot.take(count, ChipPurpose::ChangeMaking, &mut remaining);
    }

    for slot in slots.iter_mut().filter(|slot| tier_of(slot.chip.value) == Tier::Mid) {
        let desired = ceil_ratio(stack * policy.mid_target_pct, slot.chip.value as f64)
            .min(policy.mid_max_count);
        let count = desired
            .min(slot.ceiling)
            .min(remaining / slot.chip.value);
        slot.take(count, ChipPurpose::MidGame, &mut remaining);
    }

    for slot in slots
        .iter_mut()
        .rev()
        .filter(|slot| tier_of(slot.chip.value) == Tier::Late)
    {
        let count = (remaining / slot.chip.value).min(slot.ceiling);
        slot.take(count, ChipPurpose::LateGame, &mut remaining);
    }

    if remaining > 0 {
        for slot in slots.iter_mut().rev() {
            let capacity = slot.ceiling.saturating_sub(slot.count);
            let count = capacity.min(remaining / slot.chip.value);
            slot.take(count, ChipPurpose::Fill, &mut remaining);
        }
    }

    let distribution: Vec<ChipDistribution> = slots
        .iter()
        .rev()
        .filter(|slot| slot.count > 0)
        .map(|slot| ChipDistribution {
            value: slot.chip.value,
            count: slot.count,
            total: slot.count * slot.chip.value,
            color: slot.chip.color.clone(),
            purpose: slot.purpose.unwrap_or(ChipPurpose::Fill),
        })
        .collect();

    let allocated: u64 = distribution.iter().map(|entry| entry.total).sum();
    if (allocated as f64) < stack * policy.min_fill_pct - EPSILON {
        debug!(stack_size, allocated, "allocation below feasibility threshold");
        return None;
    }

    Some(distribution)
}
