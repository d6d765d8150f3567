use std::io::{Read, Write};

use anyhow::Context as _;
use rand::Rng;
use section_matcher_optimizer::generate::generate as generate_input;
use section_matcher_optimizer::model::{MatcherInput, MentorId};
use section_matcher_optimizer::section::{proposals, SectionDefaults, SectionProposal};
use section_matcher_optimizer::Matcher;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveOutput {
    pub proposals: Vec<SectionProposal>,
    pub unmatched: Vec<MentorId>,
}

pub fn solve(
    reader: impl Read,
    mut writer: impl Write,
    matcher: Matcher,
    defaults: &SectionDefaults,
) -> anyhow::Result<()> {
    let input: MatcherInput = serde_json::from_reader(reader).context("invalid matcher input")?;
    info!(
        mentors = input.mentors.len(),
        slots = input.slots.len(),
        preferences = input.preferences.len(),
        "read matcher input"
    );

    let matching = matcher.solve_input(&input)?;
    let output = SolveOutput {
        proposals: proposals(&matching, &input.slots, defaults),
        unmatched: matching.unmatched,
    };
    serde_json::to_writer_pretty(&mut writer, &output).context("failed to write result")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn generate<R: Rng + ?Sized>(
    mut writer: impl Write,
    mentors: u32,
    slots: u32,
    rng: &mut R,
) -> anyhow::Result<()> {
    let input = generate_input(mentors, slots, rng);
    serde_json::to_writer_pretty(&mut writer, &input).context("failed to write input")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use section_matcher_optimizer::error::ValidationError;
    use section_matcher_optimizer::model::SlotId;

    use super::*;

    const INPUT: &str = r#"{
        "mentors": [{"id": 1}, {"id": 2}, {"id": 3}],
        "slots": [
            {"id": 10, "min_mentors": 1, "max_mentors": 1, "description": "Mon 10:00"},
            {"id": 20, "min_mentors": 0, "max_mentors": 2}
        ],
        "preferences": [
            {"mentor_id": 1, "slot_id": 10, "value": 5},
            {"mentor_id": 2, "slot_id": 20, "value": 3},
            {"mentor_id": 3, "slot_id": 10, "value": 0}
        ]
    }"#;

    #[test]
    fn solve_writes_proposals_and_unmatched() {
        let mut output = Vec::new();
        solve(
            INPUT.as_bytes(),
            &mut output,
            Matcher::default(),
            &SectionDefaults::default(),
        )
        .unwrap();

        let output: SolveOutput = serde_json::from_slice(&output).unwrap();
        assert_eq!(output.unmatched, vec![MentorId(3)]);
        assert_eq!(output.proposals.len(), 2);
        assert_eq!(output.proposals[0].slot, SlotId(10));
        assert_eq!(output.proposals[0].section.description, "Mon 10:00");
        assert_eq!(output.proposals[1].mentor, MentorId(2));
    }

    #[test]
    fn solve_passes_validation_errors_through() {
        let input = r#"{"mentors": [{"id": 1}, {"id": 2}], "slots": [{"id": 1, "min_mentors": 0, "max_mentors": 1}], "preferences": []}"#;
        let error = solve(
            input.as_bytes(),
            Vec::new(),
            Matcher::default(),
            &SectionDefaults::default(),
        )
        .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ValidationError>(),
            Some(ValidationError::MoreMentorsThanSlots { .. })
        ));
    }

    #[test]
    fn generated_input_can_be_solved() {
        let mut generated = Vec::new();
        generate(&mut generated, 12, 3, &mut StdRng::seed_from_u64(3)).unwrap();

        let mut output = Vec::new();
        solve(
            generated.as_slice(),
            &mut output,
            Matcher::default(),
            &SectionDefaults::default(),
        )
        .unwrap();
        let output: SolveOutput = serde_json::from_slice(&output).unwrap();
        assert_eq!(output.proposals.len() + output.unmatched.len(), 12);
    }
}
