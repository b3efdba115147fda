//! Looping animation of attribution flow.

/// Edge-opacity pulse and frame streaming.
pub mod pulse;
