//! Resolve, validate, compose.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::directives::DirectiveLookup;
use crate::config::options::ResolverOptions;
use crate::config::peer_info::{builtin_identity, compose};
use crate::config::resolver::resolve;
use crate::config::schema::{Axis, AxisSource, Overrides, ResolvedConfiguration};
use crate::config::validation::Validator;
use crate::error::{ResolveError, ValidationError, ValidationIssue};

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The configuration handed to the tunnel engine
    pub config: ResolvedConfiguration,

    /// Non-fatal findings, in rule evaluation order
    pub advisories: Vec<ValidationIssue>,

    /// Which precedence tier settled each axis
    pub sources: IndexMap<Axis, AxisSource>,
}

/// Merges `overrides` with `profile` into a validated configuration.
///
/// # Errors
///
/// Returns [`ResolveError::Axis`] when an axis cannot be resolved and
/// [`ResolveError::Validation`] carrying every hard finding when the resolved
/// axes conflict.
pub fn resolve_configuration<L>(
    overrides: &Overrides,
    profile: &L,
    options: &ResolverOptions,
) -> Result<Resolution, ResolveError>
where
    L: DirectiveLookup + ?Sized,
{
    let mut partial = resolve(overrides, profile, options).inspect_err(|e| {
        tracing::debug!(axis = %e.axis, error = %e, "axis resolution failed");
    })?;

    let result = Validator::new().validate(&mut partial, &options.limits);
    if result.has_errors() {
        tracing::debug!(errors = result.errors.len(), "configuration rejected");
        return Err(ValidationError {
            issues: result.errors,
        }
        .into());
    }

    for advisory in &result.warnings {
        tracing::warn!(rule = %advisory.rule, "{}", advisory.message);
    }

    let builtin = builtin_identity(partial.gui_version());
    let peer_info = compose(&builtin, partial.peer_info_overrides());
    let sources = partial.sources().clone();
    let config = ResolvedConfiguration::seal(partial, peer_info);

    tracing::info!(
        proto = ?config.proto(),
        min_tls = %config.min_tls_version(),
        cert_profile = ?config.tls_cert_profile(),
        advisories = result.warnings.len(),
        "configuration resolved"
    );

    Ok(Resolution {
        config,
        advisories: result.warnings,
        sources,
    })
}
