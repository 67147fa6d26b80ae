//! `ovpnconf` - OpenVPN client connection policy resolution
//!
//! Merges a typed override set with profile directives into a single,
//! validated connection configuration plus the peer-info map sent to the
//! server.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
