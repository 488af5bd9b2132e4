//! Controller layer: reducer-like narrative stage transitions.

pub mod reducer;
