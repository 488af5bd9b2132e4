//! Shared presentation model for the animated card: the narrative stage
//! machine, animation choreography, confetti physics, and the card script.
//!
//! Everything here is pure and time-driven; the GUI crate feeds it elapsed
//! seconds and user choices and paints whatever poses come back.

pub mod choreography;
pub mod confetti;
pub mod domain;
pub mod script;
