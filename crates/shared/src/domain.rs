//! Narrative stage machine: forward-only, with a single self-loop at the
//! proposal while the decline control keeps dodging.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Intro,
    Memory,
    Proposal,
    Success,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Memory => "memory",
            Self::Proposal => "proposal",
            Self::Success => "success",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Success
    }

    /// Position in the narrative order, for monotonicity checks.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Intro => 0,
            Self::Memory => 1,
            Self::Proposal => 2,
            Self::Success => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageInput {
    /// The current stage's timed entry choreography ran to completion.
    EntryFinished,
    /// The decline control was hovered or clicked.
    Decline,
    /// The affirm control was clicked.
    Affirm,
}

/// Transition function for the narrative. Intro and Memory advance when
/// their choreography finishes, Proposal self-loops on decline and commits
/// on affirm. Any other pairing leaves the stage unchanged; nothing ever
/// moves backwards.
pub fn advance(stage: Stage, input: StageInput) -> Stage {
    match (stage, input) {
        (Stage::Intro, StageInput::EntryFinished) => Stage::Memory,
        (Stage::Memory, StageInput::EntryFinished) => Stage::Proposal,
        (Stage::Proposal, StageInput::Decline) => Stage::Proposal,
        (Stage::Proposal, StageInput::Affirm) => Stage::Success,
        (unchanged, _) => unchanged,
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
