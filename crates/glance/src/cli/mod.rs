//! Command implementations and shared presentation helpers.

pub mod ask;
pub mod config;
pub mod interactive;
pub mod prompts;
pub mod render;
pub mod startup;
