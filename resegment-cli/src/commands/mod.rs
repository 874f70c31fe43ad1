//! Command implementations for the CLI.
//!
//! Each submodule implements one subcommand and returns the process exit
//! code on completion.

/// Module containing the implementation of the `run` command.
/// This command splits, filters and renames a directory of videos.
pub mod run;

/// Module containing the implementation of the `rename` command.
pub mod rename;
