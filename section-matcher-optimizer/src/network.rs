//! The flow network for one matcher run and the translation of its flow back
//! into an assignment.
//!
//! ```text
//!            1                   cost(pref)              1
//! source ─────────▶ mentor ──────────────────▶ slot ─────────▶ sink
//!                      │        (pref > 0)     demand = min   cap = max - min
//!                      └──────────────────────────────────────▶
//!                                   unmatched penalty
//! ```
//!
//! The source supplies one unit per mentor, every slot consumes its minimum and
//! the sink takes the rest. The unmatched edge lets a mentor drop out without
//! occupying a slot, its penalty exceeds any sum of matching costs so the flow
//! only uses it when no placement exists.

use core::num::NonZeroU32;

use tracing::debug;

use crate::cost::CostFunction;
use crate::flow::{EdgeId, FlowSolution, MinCostFlow, NodeId};
use crate::model::{Assignment, Matching, MentorId, SlotId};
use crate::validate::ValidatedInput;

const SOURCE: NodeId = 0;
const SINK: NodeId = 1;
const NOMINAL_COST: i64 = 1;

pub struct MatchingNetwork {
    problem: MinCostFlow,
    preference_edges: Vec<(EdgeId, MentorId, SlotId)>,
    mentors: Vec<MentorId>,
}

impl MatchingNetwork {
    pub fn build(input: &ValidatedInput<'_>, cost_function: CostFunction) -> Self {
        let mentor_count = input.mentors.len();
        let mentor_node = |index: usize| 2 + index;
        let slot_node = |index: usize| 2 + mentor_count + index;

        let mut problem = MinCostFlow::new(2 + mentor_count + input.slots.len());
        let supply = i64::try_from(mentor_count).unwrap_or(i64::MAX);
        let total_min = i64::try_from(input.total_min).unwrap_or(i64::MAX);
        problem.set_demand(SOURCE, -supply);
        problem.set_demand(SINK, supply - total_min);

        for index in 0..mentor_count {
            problem.add_edge(SOURCE, mentor_node(index), 1, NOMINAL_COST);
        }
        for (index, slot) in input.slots.iter().enumerate() {
            problem.set_demand(slot_node(index), i64::from(slot.min_mentors));
            problem.add_edge(
                slot_node(index),
                SINK,
                i64::from(slot.max_mentors - slot.min_mentors),
                NOMINAL_COST,
            );
        }

        let mut max_cost: i64 = 0;
        let preference_edges: Vec<(EdgeId, MentorId, SlotId)> = input
            .preferences
            .iter()
            .filter_map(|preference| {
                let value = NonZeroU32::new(preference.value)?;
                let cost = cost_function.cost(value);
                max_cost = max_cost.max(cost);
                let edge = problem.add_edge(
                    mentor_node(input.mentor_index[&preference.mentor_id]),
                    slot_node(input.slot_index[&preference.slot_id]),
                    1,
                    cost,
                );
                Some((edge, preference.mentor_id, preference.slot_id))
            })
            .collect();

        let penalty = unmatched_penalty(supply, max_cost);
        for index in 0..mentor_count {
            problem.add_edge(mentor_node(index), SINK, 1, penalty);
        }

        debug!(
            nodes = problem.node_count(),
            edges = problem.edge_count(),
            preference_edges = preference_edges.len(),
            penalty,
            "built matching network"
        );

        Self {
            problem,
            preference_edges,
            mentors: input.mentors.iter().map(|mentor| mentor.id).collect(),
        }
    }

    pub const fn problem(&self) -> &MinCostFlow {
        &self.problem
    }

    pub fn decode(&self, solution: &FlowSolution) -> Matching {
        let assignment: Assignment = self
            .preference_edges
            .iter()
            .filter(|(edge, _, _)| solution.flow(*edge) > 0)
            .map(|(_, mentor, slot)| (*mentor, *slot))
            .collect();
        let mut unmatched: Vec<MentorId> = self
            .mentors
            .iter()
            .filter(|mentor| !assignment.contains_key(*mentor))
            .copied()
            .collect();
        unmatched.sort_unstable();
        Matching {
            assignment,
            unmatched,
        }
    }
}

/// Larger than the cost of every matched path of every mentor combined, so one
/// more matched mentor always beats any gain in preference.
const fn unmatched_penalty(mentors: i64, max_preference_cost: i64) -> i64 {
    mentors
        .saturating_mul(max_preference_cost.saturating_add(NOMINAL_COST))
        .saturating_add(1)
}
