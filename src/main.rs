//! `ovpnconf` binary: resolve and validate OpenVPN client connection settings

use clap::Parser;

use ovpnconf::cli::args::Cli;
use ovpnconf::cli::commands;
use ovpnconf::error::ExitCode;
use ovpnconf::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
