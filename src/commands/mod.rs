//! Command implementations.

pub mod remove;
