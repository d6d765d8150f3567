use thiserror::Error;

use crate::model::{MentorId, SlotId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate {0} in mentor list")]
    DuplicateMentor(MentorId),
    #[error("duplicate {0} in slot list")]
    DuplicateSlot(SlotId),
    #[error("min greater than max mentors")]
    MinGreaterThanMax { slot: SlotId },
    #[error("more mentors than slots")]
    MoreMentorsThanSlots { mentors: u64, capacity: u64 },
    #[error("not enough mentors for minimum requirements")]
    NotEnoughMentors { mentors: u64, required: u64 },
    #[error("preference references unknown {0}")]
    UnknownMentor(MentorId),
    #[error("preference references unknown {0}")]
    UnknownSlot(SlotId),
    #[error("more than one preference of {mentor} for {slot}")]
    DuplicatePreference { mentor: MentorId, slot: SlotId },
    #[error("no assignment satisfies the slot minimums with the given preferences")]
    Infeasible,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    #[error("node demands sum to {0} instead of zero")]
    Unbalanced(i64),
    #[error("only {routed} of {required} units of demand can be routed")]
    Infeasible { routed: i64, required: i64 },
}
