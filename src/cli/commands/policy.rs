//! `ovpnconf policy`
//!
//! Prints the built-in default table consulted when the profile is silent.

use crate::cli::args::{OutputFormat, PolicyArgs};
use crate::config::policy::DEFAULT_POLICY;
use crate::error::OvpnConfError;

/// Print the default policy table.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &PolicyArgs) -> Result<(), OvpnConfError> {
    match args.format {
        OutputFormat::Human => print!("{}", render_human()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&DEFAULT_POLICY)?),
    }
    Ok(())
}

fn render_human() -> String {
    use std::fmt::Write as _;

    let width = DEFAULT_POLICY
        .iter()
        .map(|row| row.axis.name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &DEFAULT_POLICY {
        let directives = if row.directives.is_empty() {
            "-".to_string()
        } else {
            row.directives.join(", ")
        };
        let _ = write!(
            out,
            "{:<width$}  {:<16}  {}",
            row.axis.name(),
            row.fallback.to_string(),
            directives
        );
        if let Some(note) = row.note {
            let _ = write!(out, "  ({note})");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_table_lists_every_axis() {
        let table = render_human();
        assert_eq!(table.lines().count(), DEFAULT_POLICY.len());
        assert!(table.contains("tls-cert-profile"));
        assert!(table.contains("legacy_default"));
    }
}
