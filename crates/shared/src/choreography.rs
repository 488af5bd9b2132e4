//! Animation choreography for the four stages.
//!
//! Every pose is a pure function of the elapsed time since the stage became
//! active; a stage's entry choreography is complete once
//! `elapsed >= duration`. The GUI re-evaluates poses every frame.

use rand::Rng;

pub fn linear(t: f32) -> f32 {
    t
}

pub fn power1_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(2)
}

pub fn power2_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn power3_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

/// Ease-out that swings past the target before settling; `overshoot`
/// controls how far.
pub fn back_out(t: f32, overshoot: f32) -> f32 {
    let u = t - 1.0;
    1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
}

/// A window on a stage timeline. `progress` is 0 before `start`, 1 after
/// `start + duration`, linear in between; feed it through an easing
/// function for shaped motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub duration: f32,
}

impl Span {
    pub fn new(start: f32, duration: f32) -> Self {
        Self { start, duration }
    }

    pub fn end(self) -> f32 {
        self.start + self.duration
    }

    pub fn progress(self, elapsed: f32) -> f32 {
        if self.duration <= f32::EPSILON {
            return if elapsed < self.start { 0.0 } else { 1.0 };
        }
        ((elapsed - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn finished(self, elapsed: f32) -> bool {
        elapsed >= self.end()
    }
}

// Intro: the recipient's name rises and unfolds character by character,
// catches fire with a glow, then lifts away.
pub const INTRO_LEAD_IN: f32 = 0.5;
pub const INTRO_IN_STAGGER: f32 = 0.1;
pub const INTRO_IN_DURATION: f32 = 1.2;
pub const INTRO_IN_OVERSHOOT: f32 = 1.7;
pub const INTRO_CHAR_DROP: f32 = 50.0;
pub const INTRO_CHAR_FOLD_DEGREES: f32 = -90.0;
pub const INTRO_GLOW_GAP: f32 = 0.5;
pub const INTRO_GLOW_DURATION: f32 = 1.0;
pub const INTRO_OUT_GAP: f32 = 1.0;
pub const INTRO_OUT_STAGGER: f32 = 0.05;
pub const INTRO_OUT_DURATION: f32 = 0.8;
pub const INTRO_CHAR_EXIT_RISE: f32 = -50.0;

/// Evaluated visual parameters of one intro character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharPose {
    pub opacity: f32,
    /// Vertical displacement from the settled baseline; positive is down.
    pub y_offset: f32,
    /// Remaining fold away from the viewer, in degrees; 0 is flat.
    pub fold_degrees: f32,
    /// 0 = plain, 1 = fully recolored and glowing.
    pub glow: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct IntroTimeline {
    char_count: usize,
}

impl IntroTimeline {
    pub fn new(char_count: usize) -> Self {
        Self {
            char_count: char_count.max(1),
        }
    }

    /// A staggered block ends when its last member's tween does.
    fn stagger_block(start: f32, stagger: f32, duration: f32, count: usize) -> Span {
        Span::new(start, stagger * (count - 1) as f32 + duration)
    }

    fn entry_block(self) -> Span {
        Self::stagger_block(
            INTRO_LEAD_IN,
            INTRO_IN_STAGGER,
            INTRO_IN_DURATION,
            self.char_count,
        )
    }

    fn glow_block(self) -> Span {
        Span::new(self.entry_block().end() + INTRO_GLOW_GAP, INTRO_GLOW_DURATION)
    }

    fn exit_block(self) -> Span {
        Self::stagger_block(
            self.glow_block().end() + INTRO_OUT_GAP,
            INTRO_OUT_STAGGER,
            INTRO_OUT_DURATION,
            self.char_count,
        )
    }

    pub fn duration(self) -> f32 {
        self.exit_block().end()
    }

    pub fn finished(self, elapsed: f32) -> bool {
        elapsed >= self.duration()
    }

    pub fn char_pose(self, elapsed: f32, index: usize) -> CharPose {
        let index = index.min(self.char_count - 1);
        let entry = Span::new(
            INTRO_LEAD_IN + INTRO_IN_STAGGER * index as f32,
            INTRO_IN_DURATION,
        );
        let exit = Span::new(
            self.exit_block().start + INTRO_OUT_STAGGER * index as f32,
            INTRO_OUT_DURATION,
        );

        // Position and fold follow the unclamped overshoot; opacity is
        // clamped to [0, 1].
        let rise = back_out(entry.progress(elapsed), INTRO_IN_OVERSHOOT);
        let out = power1_out(exit.progress(elapsed));
        let glow = power1_out(self.glow_block().progress(elapsed));

        CharPose {
            opacity: rise.clamp(0.0, 1.0) * (1.0 - out),
            y_offset: INTRO_CHAR_DROP * (1.0 - rise) + INTRO_CHAR_EXIT_RISE * out,
            fold_degrees: INTRO_CHAR_FOLD_DEGREES * (1.0 - rise),
            glow,
        }
    }
}

// Memory: the photo fades and scales in, holds on a slow zoom, then fades
// and blurs away.
pub const MEMORY_FADE_IN: f32 = 2.0;
pub const MEMORY_HOLD: f32 = 3.0;
pub const MEMORY_FADE_OUT: f32 = 1.5;
pub const MEMORY_SCALE_FROM: f32 = 0.8;
pub const MEMORY_SCALE_HELD: f32 = 1.1;
pub const MEMORY_EXIT_BLUR: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryPose {
    pub opacity: f32,
    pub scale: f32,
    /// Blur radius in display units; 0 while the photo is sharp.
    pub blur: f32,
}

pub fn memory_duration() -> f32 {
    MEMORY_FADE_IN + MEMORY_HOLD + MEMORY_FADE_OUT
}

pub fn memory_finished(elapsed: f32) -> bool {
    elapsed >= memory_duration()
}

pub fn memory_pose(elapsed: f32) -> MemoryPose {
    let fade_in = Span::new(0.0, MEMORY_FADE_IN);
    let hold = Span::new(fade_in.end(), MEMORY_HOLD);
    let fade_out = Span::new(hold.end(), MEMORY_FADE_OUT);

    let appear = power2_out(fade_in.progress(elapsed));
    let zoom = linear(hold.progress(elapsed));
    let vanish = power1_out(fade_out.progress(elapsed));

    MemoryPose {
        opacity: appear * (1.0 - vanish),
        scale: MEMORY_SCALE_FROM
            + (1.0 - MEMORY_SCALE_FROM) * appear
            + (MEMORY_SCALE_HELD - 1.0) * zoom,
        blur: MEMORY_EXIT_BLUR * vanish,
    }
}

// Proposal and success panels share the same fade-and-rise entry shape.
pub const PROPOSAL_ENTRY: f32 = 1.5;
pub const PROPOSAL_RISE: f32 = 20.0;
pub const SUCCESS_ENTRY: f32 = 0.8;
pub const SUCCESS_RISE: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPose {
    pub opacity: f32,
    /// Remaining downward displacement; settles to 0.
    pub y_offset: f32,
}

/// Fades and rises in once, then holds indefinitely awaiting input.
pub fn proposal_pose(elapsed: f32) -> PanelPose {
    let t = power3_out(Span::new(0.0, PROPOSAL_ENTRY).progress(elapsed));
    PanelPose {
        opacity: t,
        y_offset: PROPOSAL_RISE * (1.0 - t),
    }
}

/// Terminal view entry; holds forever afterwards.
pub fn success_pose(elapsed: f32) -> PanelPose {
    let t = power2_out(Span::new(0.0, SUCCESS_ENTRY).progress(elapsed));
    PanelPose {
        opacity: t,
        y_offset: SUCCESS_RISE * (1.0 - t),
    }
}

// The decline control's evasive hop.
pub const EVADE_RANGE: f32 = 100.0;
pub const EVADE_TWEEN: f32 = 0.2;

/// Fresh evasion target: two independent uniform draws over a symmetric
/// range, one per axis.
pub fn evade_offset<R: Rng + ?Sized>(rng: &mut R) -> (f32, f32) {
    (
        rng.random_range(-EVADE_RANGE..=EVADE_RANGE),
        rng.random_range(-EVADE_RANGE..=EVADE_RANGE),
    )
}

/// One-shot eased motion toward an evasion target. Invocations do not
/// queue: a replacement tween restarts from whatever offset is currently
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTween {
    from: (f32, f32),
    to: (f32, f32),
    started_at: f64,
}

impl OffsetTween {
    /// Stationary at the control's home position.
    pub fn rest() -> Self {
        Self {
            from: (0.0, 0.0),
            to: (0.0, 0.0),
            started_at: 0.0,
        }
    }

    pub fn start(now: f64, from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            from,
            to,
            started_at: now,
        }
    }

    pub fn target(&self) -> (f32, f32) {
        self.to
    }

    /// Displayed offset at `now`.
    pub fn at(&self, now: f64) -> (f32, f32) {
        let elapsed = (now - self.started_at).max(0.0) as f32;
        let t = power1_out(Span::new(0.0, EVADE_TWEEN).progress(elapsed));
        (
            self.from.0 + (self.to.0 - self.from.0) * t,
            self.from.1 + (self.to.1 - self.from.1) * t,
        )
    }
}

#[cfg(test)]
#[path = "tests/choreography_tests.rs"]
mod tests;
