use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::error::ValidationError;
use crate::model::{Mentor, MentorId, Preference, Slot, SlotId};

/// Input that passed every check that does not need the flow network.
#[derive(Debug)]
pub struct ValidatedInput<'a> {
    pub mentors: &'a [Mentor],
    pub slots: &'a [Slot],
    /// only positive preferences, in input order
    pub preferences: Vec<&'a Preference>,
    pub mentor_index: HashMap<MentorId, usize>,
    pub slot_index: HashMap<SlotId, usize>,
    pub total_min: u64,
}

pub fn validate<'a>(
    mentors: &'a [Mentor],
    slots: &'a [Slot],
    preferences: &'a [Preference],
) -> Result<ValidatedInput<'a>, ValidationError> {
    if let Some(id) = mentors.iter().map(|mentor| mentor.id).duplicates().next() {
        return Err(ValidationError::DuplicateMentor(id));
    }
    if let Some(id) = slots.iter().map(|slot| slot.id).duplicates().next() {
        return Err(ValidationError::DuplicateSlot(id));
    }
    if let Some(slot) = slots.iter().find(|slot| slot.min_mentors > slot.max_mentors) {
        return Err(ValidationError::MinGreaterThanMax { slot: slot.id });
    }

    let mentor_count = mentors.len() as u64;
    let total_max: u64 = slots.iter().map(|slot| u64::from(slot.max_mentors)).sum();
    let total_min: u64 = slots.iter().map(|slot| u64::from(slot.min_mentors)).sum();
    if total_max < mentor_count {
        return Err(ValidationError::MoreMentorsThanSlots {
            mentors: mentor_count,
            capacity: total_max,
        });
    }
    if total_min > mentor_count {
        return Err(ValidationError::NotEnoughMentors {
            mentors: mentor_count,
            required: total_min,
        });
    }

    let mentor_index: HashMap<MentorId, usize> = mentors
        .iter()
        .enumerate()
        .map(|(index, mentor)| (mentor.id, index))
        .collect();
    let slot_index: HashMap<SlotId, usize> = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| (slot.id, index))
        .collect();

    let mut seen = HashSet::with_capacity(preferences.len());
    for preference in preferences {
        if !mentor_index.contains_key(&preference.mentor_id) {
            return Err(ValidationError::UnknownMentor(preference.mentor_id));
        }
        if !slot_index.contains_key(&preference.slot_id) {
            return Err(ValidationError::UnknownSlot(preference.slot_id));
        }
        if !seen.insert((preference.mentor_id, preference.slot_id)) {
            return Err(ValidationError::DuplicatePreference {
                mentor: preference.mentor_id,
                slot: preference.slot_id,
            });
        }
    }

    Ok(ValidatedInput {
        mentors,
        slots,
        preferences: preferences
            .iter()
            .filter(|preference| preference.value > 0)
            .collect(),
        mentor_index,
        slot_index,
        total_min,
    })
}
