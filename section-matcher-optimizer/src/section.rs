//! Section proposals derived from a matching, in the shape the course
//! application stores before coordinators release the sections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Matching, MentorId, Slot, SlotId};

pub const DEFAULT_SECTION_CAPACITY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDefaults {
    pub capacity: u32,
    /// Empty means the slot description is used.
    pub description: String,
}

impl Default for SectionDefaults {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SECTION_CAPACITY,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    pub capacity: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProposal {
    pub slot: SlotId,
    pub mentor: MentorId,
    pub section: SectionInfo,
}

/// One proposal per matched mentor, ordered by mentor id.
#[must_use]
pub fn proposals(
    matching: &Matching,
    slots: &[Slot],
    defaults: &SectionDefaults,
) -> Vec<SectionProposal> {
    let descriptions: HashMap<SlotId, &str> = slots
        .iter()
        .map(|slot| (slot.id, slot.description.as_str()))
        .collect();

    matching
        .assignment
        .iter()
        .map(|(&mentor, &slot)| {
            let description = if defaults.description.is_empty() {
                descriptions.get(&slot).copied().unwrap_or_default()
            } else {
                defaults.description.as_str()
            };
            SectionProposal {
                slot,
                mentor,
                section: SectionInfo {
                    capacity: defaults.capacity,
                    description: description.to_owned(),
                },
            }
        })
        .collect()
}
