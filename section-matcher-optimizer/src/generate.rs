//! Random matcher input for trying the matcher on realistic sizes.

use rand::Rng;

use crate::model::{MatcherInput, Mentor, Preference, Slot};

pub const MAX_PREFERENCE: u32 = 5;

/// Every mentor rates every slot uniformly in `0..=MAX_PREFERENCE`. Slots have
/// no minimum and together they always fit every mentor.
pub fn generate<R: Rng + ?Sized>(mentor_count: u32, slot_count: u32, rng: &mut R) -> MatcherInput {
    let mentors: Vec<Mentor> = (1..=mentor_count).map(Mentor::new).collect();
    let slots: Vec<Slot> = (1..=slot_count)
        .map(|id| {
            let capacity = slot_capacity(mentor_count, slot_count, rng.gen_range(0..=1));
            Slot::new(id, 0, capacity)
        })
        .collect();
    let preferences = mentors
        .iter()
        .flat_map(|mentor| slots.iter().map(move |slot| (mentor.id, slot.id)))
        .map(|(mentor, slot)| Preference::new(mentor.0, slot.0, rng.gen_range(0..=MAX_PREFERENCE)))
        .collect();

    MatcherInput {
        mentors,
        slots,
        preferences,
    }
}

/// An even share of the mentors plus `extra`, capped at `u32::MAX`.
fn slot_capacity(mentor_count: u32, slot_count: u32, extra: u32) -> u32 {
    let per_slot = if slot_count == 0 {
        0
    } else {
        mentor_count.div_ceil(slot_count)
    };
    per_slot.saturating_add(extra)
}
