//! Narrative progression: observes elapsed stage time and user choices,
//! applies the shared transition function, and records entry timestamps for
//! pose evaluation.

use shared::{
    choreography::{memory_finished, IntroTimeline},
    confetti::ConfettiTimer,
    domain::{advance, Stage, StageInput},
};

pub struct NarrativeController {
    stage: Stage,
    stage_entered_at: f64,
    intro: IntroTimeline,
    confetti: Option<ConfettiTimer>,
}

impl NarrativeController {
    /// Starts at the intro with the clock at zero; the gui shell's clock
    /// begins there on its first frame.
    pub fn new(intro_char_count: usize) -> Self {
        Self {
            stage: Stage::Intro,
            stage_entered_at: 0.0,
            intro: IntroTimeline::new(intro_char_count),
            confetti: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn intro(&self) -> IntroTimeline {
        self.intro
    }

    /// Seconds since the current stage became active.
    pub fn stage_elapsed(&self, now: f64) -> f32 {
        (now - self.stage_entered_at).max(0.0) as f32
    }

    /// Advances past stages whose timed entry choreography has completed.
    /// One hop per call: the next stage's entry clock starts at the frame
    /// that observed the completion, so stages never overlap.
    pub fn tick(&mut self, now: f64) {
        let finished = match self.stage {
            Stage::Intro => self.intro.finished(self.stage_elapsed(now)),
            Stage::Memory => memory_finished(self.stage_elapsed(now)),
            Stage::Proposal | Stage::Success => false,
        };
        if finished {
            self.apply(StageInput::EntryFinished, now);
        }
    }

    pub fn decline(&mut self, now: f64) {
        self.apply(StageInput::Decline, now);
    }

    pub fn affirm(&mut self, now: f64) {
        self.apply(StageInput::Affirm, now);
        if self.stage == Stage::Success && self.confetti.is_none() {
            self.confetti = Some(ConfettiTimer::start(now));
        }
    }

    pub fn confetti_live(&self, now: f64) -> bool {
        self.confetti.is_some_and(|timer| timer.is_live(now))
    }

    fn apply(&mut self, input: StageInput, now: f64) {
        let next = advance(self.stage, input);
        if next != self.stage {
            tracing::info!(
                from = self.stage.label(),
                to = next.label(),
                "advancing narrative stage"
            );
            self.stage = next;
            self.stage_entered_at = now;
        }
    }
}
