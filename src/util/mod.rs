//! Shared utilities.

pub mod easing;
