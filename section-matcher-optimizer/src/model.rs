//! Plain input and output values of the matcher.
//!
//! These are built fresh by the caller for every run; nothing here is persisted.

use alloc::collections::BTreeMap;
use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentorId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

impl Display for MentorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mentor {}", self.0)
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: MentorId,
}

impl Mentor {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { id: MentorId(id) }
    }
}

/// A time window that needs between `min_mentors` and `max_mentors` mentors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub min_mentors: u32,
    pub max_mentors: u32,
    #[serde(default)]
    pub description: String,
}

impl Slot {
    #[must_use]
    pub const fn new(id: u32, min_mentors: u32, max_mentors: u32) -> Self {
        Self {
            id: SlotId(id),
            min_mentors,
            max_mentors,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// How much a mentor wants a slot. Zero means the mentor can not take it at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub mentor_id: MentorId,
    pub slot_id: SlotId,
    pub value: u32,
}

impl Preference {
    #[must_use]
    pub const fn new(mentor_id: u32, slot_id: u32, value: u32) -> Self {
        Self {
            mentor_id: MentorId(mentor_id),
            slot_id: SlotId(slot_id),
            value,
        }
    }
}

/// Everything one matcher run consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherInput {
    pub mentors: Vec<Mentor>,
    pub slots: Vec<Slot>,
    pub preferences: Vec<Preference>,
}

pub type Assignment = BTreeMap<MentorId, SlotId>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pub assignment: Assignment,
    /// sorted ascending
    pub unmatched: Vec<MentorId>,
}

impl Matching {
    /// Number of assigned mentors per slot. Slots without mentors are absent.
    #[must_use]
    pub fn slot_counts(&self) -> BTreeMap<SlotId, u32> {
        self.assignment
            .values()
            .fold(BTreeMap::new(), |mut acc, slot| {
                *acc.entry(*slot).or_default() += 1;
                acc
            })
    }
}
