//! Worker side of the UI/backend split: command types and the runtime thread.

pub mod commands;
pub mod runtime;
