//! Cross-field validation.
//!
//! Runs after every axis has resolved. Hard findings block the configuration;
//! advisories travel with it. All findings are collected, not just the first.
//!
//! One rule rewrites its input: forcing the AES-CBC suites disables the TLS
//! floor, so the validator downgrades `min_tls_version` to `Disabled` and
//! records an advisory.

use crate::config::options::ResolverLimits;
use crate::config::peer_info::{builtin_identity, shadowed_keys};
use crate::config::schema::{
    Axis, AxisSource, CompressionMode, PartiallyResolved, TlsCertProfile, TlsVersion,
};
use crate::error::{Severity, ValidationIssue, ValidationRule};

// ============================================================================
// Public API
// ============================================================================

/// Result of cross-field validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Hard findings.
    pub errors: Vec<ValidationIssue>,

    /// Advisory findings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any hard findings.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if no hard findings were raised.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Cross-field validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the resolved axes, applying the TLS floor downgrade in place.
    pub fn validate(
        &mut self,
        resolved: &mut PartiallyResolved,
        limits: &ResolverLimits,
    ) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_tls(resolved);
        self.validate_client_cert(resolved);
        self.validate_compression(resolved);
        self.validate_peer_info(resolved, limits);
        self.validate_gui_version(resolved);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // TLS policy
    // ========================================================================

    fn validate_tls(&mut self, resolved: &mut PartiallyResolved) {
        let suite_b = resolved.tls_cert_profile == TlsCertProfile::SuiteB;
        let force_cbc = resolved.force_aes_cbc_ciphersuites;

        if suite_b && force_cbc {
            self.add(
                ValidationRule::SuiteBForbidsAesCbc,
                &[Axis::TlsCertProfile, Axis::ForceAesCbcCiphersuites],
                "Suite B certificate profile cannot use the DHE-RSA AES-CBC cipher suites",
            );
        }

        if force_cbc && resolved.min_tls_version != TlsVersion::Disabled {
            self.add(
                ValidationRule::AesCbcDisablesTlsFloor,
                &[Axis::ForceAesCbcCiphersuites, Axis::MinTlsVersion],
                &format!(
                    "forcing AES-CBC cipher suites disables the TLS {} floor",
                    resolved.min_tls_version
                ),
            );
            resolved.min_tls_version = TlsVersion::Disabled;
        }

        if suite_b && !force_cbc && resolved.min_tls_version < TlsVersion::V1_2 {
            self.add(
                ValidationRule::SuiteBRequiresTls12,
                &[Axis::TlsCertProfile, Axis::MinTlsVersion],
                &format!(
                    "Suite B certificate profile requires a TLS 1.2 floor, got {}",
                    resolved.min_tls_version
                ),
            );
        }
    }

    // ========================================================================
    // Client certificate
    // ========================================================================

    fn validate_client_cert(&mut self, resolved: &PartiallyResolved) {
        if resolved.disable_client_cert && resolved.private_key_password.is_some() {
            self.add(
                ValidationRule::ClientCertDisabledKeyPasswordInert,
                &[Axis::DisableClientCert, Axis::PrivateKeyPassword],
                "private key password is unused because the client certificate is not sent",
            );
        }
    }

    // ========================================================================
    // Compression
    // ========================================================================

    fn validate_compression(&mut self, resolved: &PartiallyResolved) {
        if resolved.source(Axis::CompressionMode) == Some(AxisSource::Suppressed) {
            self.add(
                ValidationRule::ProfileCompressionSuppressed,
                &[Axis::CompressionMode],
                "profile requests compression; only compression stubs are enabled",
            );
        }

        match resolved.compression_mode {
            CompressionMode::Enabled => self.add(
                ValidationRule::CompressionEnabled,
                &[Axis::CompressionMode],
                "compression is enabled on uplink and downlink",
            ),
            CompressionMode::Asymmetric => self.add(
                ValidationRule::CompressionEnabled,
                &[Axis::CompressionMode],
                "downlink compression is enabled",
            ),
            CompressionMode::Disabled => {}
        }
    }

    // ========================================================================
    // Peer-info
    // ========================================================================

    fn validate_peer_info(&mut self, resolved: &PartiallyResolved, limits: &ResolverLimits) {
        let pairs = &resolved.peer_info;

        if pairs.len() > limits.max_peer_info_entries {
            self.add(
                ValidationRule::PeerInfoTooLarge,
                &[Axis::PeerInfo],
                &format!(
                    "{} peer-info entries exceed the limit of {}",
                    pairs.len(),
                    limits.max_peer_info_entries
                ),
            );
        }

        for (key, value) in pairs {
            if let Some(problem) = key_problem(key) {
                self.add(
                    ValidationRule::InvalidPeerInfoKey,
                    &[Axis::PeerInfo],
                    &format!("peer-info key {key:?} {problem}"),
                );
            }
            if has_control(value) {
                self.add(
                    ValidationRule::InvalidPeerInfoValue,
                    &[Axis::PeerInfo],
                    &format!("peer-info value for {key:?} {CONTROL_PROBLEM}"),
                );
            }
        }

        let builtin = builtin_identity(&resolved.gui_version);
        for (key, value) in builtin.iter() {
            if has_control(value) {
                self.add(
                    ValidationRule::InvalidPeerInfoValue,
                    &[Axis::GuiVersion, Axis::PeerInfo],
                    &format!("builtin peer-info value for {key:?} {CONTROL_PROBLEM}"),
                );
            }
        }
        for key in shadowed_keys(&builtin, pairs) {
            self.add(
                ValidationRule::PeerInfoShadowsBuiltin,
                &[Axis::PeerInfo, Axis::GuiVersion],
                &format!("peer-info replaces the builtin {key} identity"),
            );
        }
    }

    // ========================================================================
    // Client identity
    // ========================================================================

    fn validate_gui_version(&mut self, resolved: &PartiallyResolved) {
        let well_formed = resolved
            .gui_version
            .split_once(' ')
            .is_some_and(|(ident, version)| !ident.is_empty() && !version.trim().is_empty());
        if !well_formed {
            self.add(
                ValidationRule::GuiVersionFormat,
                &[Axis::GuiVersion],
                &format!(
                    "client identity {:?} is not of the form '<identifier> <version>'",
                    resolved.gui_version
                ),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add(&mut self, rule: ValidationRule, axes: &[Axis], message: &str) {
        let issue = ValidationIssue {
            axes: axes.to_vec(),
            rule,
            message: message.to_string(),
            severity: rule.severity(),
        };
        match issue.severity {
            Severity::Hard => self.errors.push(issue),
            Severity::Advisory => self.warnings.push(issue),
        }
    }
}

const CONTROL_PROBLEM: &str = "contains a line break or control character";

fn has_control(value: &str) -> bool {
    value.chars().any(char::is_control)
}

/// Describes why `key` cannot be sent, if it cannot.
fn key_problem(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        Some("is empty")
    } else if key.contains('=') {
        Some("contains '='")
    } else if has_control(key) {
        Some("contains a control character")
    } else if key.chars().any(char::is_whitespace) {
        Some("contains whitespace")
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
