//! `ovpnconf resolve`
//!
//! Loads a request file, runs the resolution pipeline and prints the
//! configuration with per-axis provenance and advisories.

use std::fmt::Write as _;

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::loader::RequestLoader;
use crate::config::options::ResolverOptions;
use crate::config::pipeline::{Resolution, resolve_configuration};
use crate::config::schema::{Axis, AxisSource};
use crate::error::{OvpnConfError, ResolveError, ValidationError};

/// Resolve a request file.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, an axis cannot be
/// resolved, validation fails, or `--strict` is set and advisories exist.
pub fn run(args: &ResolveArgs, quiet: bool) -> Result<(), OvpnConfError> {
    let mut options = ResolverOptions::default();
    if let Some(gui_version) = &args.gui_version {
        options = options.with_gui_version(gui_version.clone());
    }

    tracing::info!(file = %args.file.display(), "resolving request");
    let loaded = RequestLoader::new(options.limits).load(&args.file)?;
    for warning in &loaded.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    let directives = loaded.request.directives();
    let resolution = resolve_configuration(&loaded.request.overrides, &directives, &options)?;

    if args.strict && !resolution.advisories.is_empty() {
        return Err(ResolveError::from(ValidationError {
            issues: resolution.advisories,
        })
        .into());
    }

    if quiet {
        return Ok(());
    }
    match args.format {
        OutputFormat::Human => print!("{}", render_human(&resolution)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
    }
    Ok(())
}

const fn source_label(source: AxisSource) -> &'static str {
    match source {
        AxisSource::Override => "override",
        AxisSource::Profile => "profile",
        AxisSource::BuiltIn => "built-in",
        AxisSource::Suppressed => "suppressed",
    }
}

fn render_human(resolution: &Resolution) -> String {
    let width = Axis::ALL.iter().map(|a| a.name().len()).max().unwrap_or(0);

    let mut out = String::new();
    for axis in Axis::ALL {
        let source = resolution
            .sources
            .get(&axis)
            .map_or("-", |s| source_label(*s));
        let _ = writeln!(
            out,
            "{:<width$}  {}  [{source}]",
            axis.name(),
            resolution.config.display_value(axis),
        );
    }
    for advisory in &resolution.advisories {
        let _ = writeln!(out, "{advisory}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::directives::ProfileDirectives;
    use crate::config::schema::{Overrides, Secret};

    #[test]
    fn test_human_output_hides_password() {
        let overrides = Overrides {
            private_key_password: Some(Secret::new("hunter2".to_string())),
            disable_client_cert: Some(true),
            ..Overrides::default()
        };
        let res = resolve_configuration(
            &overrides,
            &ProfileDirectives::from_pairs([("remote", "vpn.example.com 1194 udp")]),
            &ResolverOptions::default(),
        )
        .unwrap();
        let text = render_human(&res);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("(set)"));
        assert!(text.contains("vpn.example.com"));
        assert!(text.contains("[profile]"));
        assert!(text.contains("advisory:"));
    }
}
