//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod policy;
pub mod resolve;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::OvpnConfError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), OvpnConfError> {
    match cli.command {
        Commands::Resolve(args) => resolve::run(&args, cli.quiet),
        Commands::Policy(args) => policy::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
