//! Assigns mentors to section time slots.
//!
//! Every slot needs between `min_mentors` and `max_mentors` mentors and every
//! mentor rates the slots they could run. The assignment is a minimum cost flow
//! through a network of source, mentors, slots and sink where stronger
//! preferences are cheaper.
//!
//! ```
//! use section_matcher_optimizer::model::{Mentor, MentorId, Preference, Slot, SlotId};
//!
//! let mentors = [Mentor::new(1), Mentor::new(2)];
//! let slots = [Slot::new(10, 1, 1), Slot::new(20, 0, 1)];
//! let preferences = [
//!     Preference::new(1, 10, 5),
//!     Preference::new(2, 10, 4),
//!     Preference::new(2, 20, 2),
//! ];
//!
//! let matching = section_matcher_optimizer::solve(&mentors, &slots, &preferences)?;
//! assert_eq!(matching.assignment[&MentorId(1)], SlotId(10));
//! assert_eq!(matching.assignment[&MentorId(2)], SlotId(20));
//! assert!(matching.unmatched.is_empty());
//! # Ok::<(), section_matcher_optimizer::error::ValidationError>(())
//! ```

extern crate alloc;

pub mod cost;
pub mod error;
pub mod flow;
pub mod generate;
pub mod model;
mod network;
pub mod section;
mod validate;

use tracing::{info, instrument, warn};

use crate::cost::CostFunction;
use crate::error::{FlowError, ValidationError};
use crate::model::{MatcherInput, Matching, Mentor, Preference, Slot};
use crate::network::MatchingNetwork;
use crate::validate::validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    cost_function: CostFunction,
}

impl Matcher {
    #[must_use]
    pub const fn new(cost_function: CostFunction) -> Self {
        Self { cost_function }
    }

    #[must_use]
    pub const fn cost_function(&self) -> CostFunction {
        self.cost_function
    }

    /// Matches mentors to slots.
    ///
    /// Mentors that can not be placed without breaking a slot minimum, or that
    /// have no positive preference left, end up in [`Matching::unmatched`].
    /// An error means nothing was computed.
    #[instrument(skip_all, fields(mentors = mentors.len(), slots = slots.len()))]
    pub fn solve(
        &self,
        mentors: &[Mentor],
        slots: &[Slot],
        preferences: &[Preference],
    ) -> Result<Matching, ValidationError> {
        let input = validate(mentors, slots, preferences)?;
        let network = MatchingNetwork::build(&input, self.cost_function);
        let solution = match network.problem().solve() {
            Ok(solution) => solution,
            Err(err) => {
                // the network always balances source, slot and sink demands
                debug_assert!(
                    matches!(err, FlowError::Infeasible { .. }),
                    "matching network rejected: {err}"
                );
                warn!(%err, "slot minimums can not be met");
                return Err(ValidationError::Infeasible);
            }
        };

        let matching = network.decode(&solution);
        info!(
            matched = matching.assignment.len(),
            unmatched = matching.unmatched.len(),
            cost = solution.cost(),
            "matching done"
        );
        if !matching.unmatched.is_empty() {
            warn!(unmatched = ?matching.unmatched, "some mentors could not be matched");
        }
        Ok(matching)
    }

    pub fn solve_input(&self, input: &MatcherInput) -> Result<Matching, ValidationError> {
        self.solve(&input.mentors, &input.slots, &input.preferences)
    }
}

/// [`Matcher::solve`] with the default cost function.
pub fn solve(
    mentors: &[Mentor],
    slots: &[Slot],
    preferences: &[Preference],
) -> Result<Matching, ValidationError> {
    Matcher::default().solve(mentors, slots, preferences)
}
