//! Command-line interface
//!
//! Argument parsing and command handlers for the `ovpnconf` binary.

pub mod args;
pub mod commands;
