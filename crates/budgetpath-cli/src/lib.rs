//! budgetpath CLI library.
//!
//! This crate provides the command handlers, interactive prompts and output
//! formatting behind the `budgetpath` binary.

pub mod commands;
pub mod output;
pub mod prompt;
