//! Error types for `ovpnconf`
//!
//! Resolution has two disjoint failure classes. An [`AxisError`] means a single
//! axis could not be turned into a concrete value (unparseable directive or a
//! numeric value outside its domain). A [`ValidationError`] means every axis
//! resolved but the combination is rejected by one or more hard cross-field
//! rules. Advisory findings are not errors; they travel with the successful
//! resolution as [`ValidationIssue`]s of [`Severity::Advisory`].

use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::Axis;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `ovpnconf` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Request file error (invalid YAML, unknown field, size limit)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// An axis could not be resolved
    pub const AXIS_ERROR: i32 = 4;

    /// Hard cross-field validation failure
    pub const VALIDATION_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `ovpnconf` operations.
#[derive(Debug, Error)]
pub enum OvpnConfError {
    /// Request file loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resolution or validation failure
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OvpnConfError {
    /// Returns the exit code matching this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Resolve(ResolveError::Axis(_)) => ExitCode::AXIS_ERROR,
            Self::Resolve(ResolveError::Validation(_)) => ExitCode::VALIDATION_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Request File Errors
// ============================================================================

/// Errors raised while loading a resolution request file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or deserialization failed
    #[error("parse error in {path}{}: {message}", line_suffix(.line))]
    ParseError {
        /// Path to the request file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in the request file is not set
    #[error("environment variable '{var}' not set ({location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Message supplied with the `${VAR:?message}` reference
        location: String,
    },
}

#[allow(clippy::ref_option)]
fn line_suffix(line: &Option<usize>) -> String {
    line.map_or_else(String::new, |l| format!(" (line {l})"))
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Failure of the resolve-then-validate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A single axis could not be resolved
    #[error(transparent)]
    Axis(#[from] AxisError),

    /// The resolved axes violate one or more hard rules
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Where the offending raw value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOrigin {
    /// The caller-supplied override set
    Override,
    /// A profile directive, by name
    Directive(String),
    /// The built-in policy table
    BuiltIn,
}

impl std::fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Directive(name) => write!(f, "directive '{name}'"),
            Self::BuiltIn => write!(f, "built-in"),
        }
    }
}

/// Numeric and string domain constraints checked while resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRule {
    /// Connection timeout must be zero or positive
    NonNegativeTimeout,
    /// Key direction must be -1, 0 or 1
    KeyDirectionRange,
    /// SSL debug level must be zero or positive
    NonNegativeDebugLevel,
    /// Server override must name a host
    NonEmptyServer,
}

impl DomainRule {
    /// Human description of the accepted domain.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::NonNegativeTimeout => "a non-negative number of seconds (0 retries forever)",
            Self::KeyDirectionRange => "one of -1, 0 or 1",
            Self::NonNegativeDebugLevel => "a non-negative integer",
            Self::NonEmptyServer => "a non-empty host name or address",
        }
    }
}

/// Why an axis value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisErrorReason {
    /// The raw string matched no recognized token for the axis
    Unparseable {
        /// Accepted tokens
        expected: Vec<&'static str>,
        /// Closest accepted token, when one is near
        suggestion: Option<&'static str>,
    },
    /// The value parsed but lies outside the axis domain
    OutOfDomain(DomainRule),
}

impl std::fmt::Display for AxisErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparseable {
                expected,
                suggestion,
            } => {
                write!(f, "unparseable, expected one of: {}", expected.join(", "))?;
                if let Some(s) = suggestion {
                    write!(f, " (did you mean '{s}'?)")?;
                }
                Ok(())
            }
            Self::OutOfDomain(rule) => write!(f, "out of domain, expected {}", rule.expected()),
        }
    }
}

/// A single axis failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("axis '{axis}': {origin} value '{value}' is {reason}")]
pub struct AxisError {
    /// The axis being resolved
    pub axis: Axis,
    /// Where the raw value came from
    pub origin: ValueOrigin,
    /// The rejected raw value
    pub value: String,
    /// Why it was rejected
    pub reason: AxisErrorReason,
}

impl AxisError {
    /// A raw token that matched nothing the axis accepts.
    #[must_use]
    pub fn unparseable(
        axis: Axis,
        origin: ValueOrigin,
        value: &str,
        expected: &[&'static str],
    ) -> Self {
        Self {
            axis,
            origin,
            value: value.to_string(),
            reason: AxisErrorReason::Unparseable {
                expected: expected.to_vec(),
                suggestion: suggest_token(value, expected),
            },
        }
    }

    /// A value outside its declared domain.
    #[must_use]
    pub fn out_of_domain(
        axis: Axis,
        origin: ValueOrigin,
        value: impl ToString,
        rule: DomainRule,
    ) -> Self {
        Self {
            axis,
            origin,
            value: value.to_string(),
            reason: AxisErrorReason::OutOfDomain(rule),
        }
    }
}

/// Suggest the closest accepted token for typo correction.
///
/// Returns a match only when its Damerau-Levenshtein distance is at most 2.
fn suggest_token(input: &str, accepted: &[&'static str]) -> Option<&'static str> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return None;
    }
    accepted
        .iter()
        .map(|t| (*t, strsim::damerau_levenshtein(&input, t)))
        .filter(|(_, dist)| *dist > 0 && *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(t, _)| t)
}

// ============================================================================
// Validation Types
// ============================================================================

/// Severity of a cross-field finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Aborts resolution; no configuration is produced
    Hard,
    /// Attached to the successful resolution for the caller to log
    Advisory,
}

/// Cross-field rules enforced by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationRule {
    /// Forcing AES-CBC suites disables the TLS floor
    AesCbcDisablesTlsFloor,
    /// Suite B needs TLS 1.2 or newer
    SuiteBRequiresTls12,
    /// Suite B cannot run on the DHE-RSA AES-CBC suites
    SuiteBForbidsAesCbc,
    /// A key password is useless when no client cert is sent
    ClientCertDisabledKeyPasswordInert,
    /// Profile asked for compression but policy keeps stubs only
    ProfileCompressionSuppressed,
    /// Compression was explicitly enabled
    CompressionEnabled,
    /// Peer-info key is not transmittable
    InvalidPeerInfoKey,
    /// Peer-info value is not transmittable
    InvalidPeerInfoValue,
    /// Too many peer-info entries
    PeerInfoTooLarge,
    /// Caller peer-info replaces a builtin identity key
    PeerInfoShadowsBuiltin,
    /// GUI version string is not `<identifier> <version>`
    GuiVersionFormat,
}

impl ValidationRule {
    /// Severity this rule reports at.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SuiteBRequiresTls12
            | Self::SuiteBForbidsAesCbc
            | Self::InvalidPeerInfoKey
            | Self::InvalidPeerInfoValue
            | Self::PeerInfoTooLarge => Severity::Hard,
            Self::AesCbcDisablesTlsFloor
            | Self::ClientCertDisabledKeyPasswordInert
            | Self::ProfileCompressionSuppressed
            | Self::CompressionEnabled
            | Self::PeerInfoShadowsBuiltin
            | Self::GuiVersionFormat => Severity::Advisory,
        }
    }

    /// Stable kebab-case identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AesCbcDisablesTlsFloor => "aes-cbc-disables-tls-floor",
            Self::SuiteBRequiresTls12 => "suite-b-requires-tls12",
            Self::SuiteBForbidsAesCbc => "suite-b-forbids-aes-cbc",
            Self::ClientCertDisabledKeyPasswordInert => "client-cert-disabled-key-password-inert",
            Self::ProfileCompressionSuppressed => "profile-compression-suppressed",
            Self::CompressionEnabled => "compression-enabled",
            Self::InvalidPeerInfoKey => "invalid-peer-info-key",
            Self::InvalidPeerInfoValue => "invalid-peer-info-value",
            Self::PeerInfoTooLarge => "peer-info-too-large",
            Self::PeerInfoShadowsBuiltin => "peer-info-shadows-builtin",
            Self::GuiVersionFormat => "gui-version-format",
        }
    }
}

impl std::fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cross-field finding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationIssue {
    /// Axes involved, the primary axis first
    pub axes: Vec<Axis>,
    /// Rule that produced the finding
    pub rule: ValidationRule,
    /// Description of the finding
    pub message: String,
    /// Hard or advisory
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Hard => "error",
            Severity::Advisory => "advisory",
        };
        let axes: Vec<&str> = self.axes.iter().map(|a| a.name()).collect();
        write!(
            f,
            "{}: {} [{}] at {}",
            prefix,
            self.message,
            self.rule,
            axes.join("+")
        )
    }
}

/// One or more hard cross-field rules were violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("configuration rejected: {}", summarize(.issues))]
pub struct ValidationError {
    /// Every hard finding, in rule evaluation order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Returns `true` if any issue was raised by `rule`.
    #[must_use]
    pub fn violates(&self, rule: ValidationRule) -> bool {
        self.issues.iter().any(|i| i.rule == rule)
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `ovpnconf` operations.
pub type Result<T> = std::result::Result<T, OvpnConfError>;

// ============================================================================
// Tests
// ============================================================================
