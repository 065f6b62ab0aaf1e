//! Command line interface

pub mod commands;
pub mod completions;
pub mod output;
