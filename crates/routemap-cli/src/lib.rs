//! Routemap CLI library.
//!
//! This crate provides the pieces behind the `routemap` binary: the point
//! file parser, subcommand handlers and output formatting.

pub mod commands;
pub mod input;
pub mod output;
