//! Axis resolver.
//!
//! Each axis is settled independently: an explicit override wins, then a
//! recognized profile directive, then the row in [`DEFAULT_POLICY`]. The
//! resolver is pure apart from `tracing` debug events.
//!
//! [`DEFAULT_POLICY`]: crate::config::policy::DEFAULT_POLICY

use indexmap::IndexMap;

use crate::config::directives::{DirectiveLookup, tokens};
use crate::config::options::ResolverOptions;
use crate::config::policy::fallback_token;
use crate::config::schema::{
    Axis, AxisSource, CompressionMode, CompressionOverride, Ipv6Override, Ipv6Preference,
    KeyDirection, MinTlsOverride, Overrides, PartiallyResolved, Secret, TlsCertProfile,
    TlsCertProfileOverride, TlsVersion, TransportOverride, TransportProtocol,
};
use crate::error::{AxisError, DomainRule, ValueOrigin};

// ============================================================================
// Token Vocabularies
// ============================================================================

const TRANSPORT_TOKENS: &[&str] = &[
    "udp",
    "udp4",
    "udp6",
    "tcp",
    "tcp4",
    "tcp6",
    "tcp-client",
    "tcp4-client",
    "tcp6-client",
    "adaptive",
];
const IPV6_TOKENS: &[&str] = &["enabled", "disabled", "server_decides"];
const COMPRESS_TOKENS: &[&str] = &["stub", "stub-v2", "lzo", "lz4", "lz4-v2"];
const COMP_LZO_TOKENS: &[&str] = &["yes", "no", "adaptive"];
const TLS_VERSION_TOKENS: &[&str] = &["1.0", "1.1", "1.2", "1.3", "disabled"];
const TLS_VERSION_FLAGS: &[&str] = &["or-highest"];
const CERT_PROFILE_TOKENS: &[&str] = &["legacy", "preferred", "suiteb"];
const KEY_DIRECTION_TOKENS: &[&str] = &["-1", "0", "1", "bidirectional"];
const CLIENT_CERT_TOKENS: &[&str] = &["0", "1"];
const BOOL_TOKENS: &[&str] = &["true", "false"];

fn parse_transport(token: &str) -> Option<TransportProtocol> {
    match token.to_ascii_lowercase().as_str() {
        "udp" | "udp4" | "udp6" => Some(TransportProtocol::Udp),
        "tcp" | "tcp4" | "tcp6" | "tcp-client" | "tcp4-client" | "tcp6-client" => {
            Some(TransportProtocol::Tcp)
        }
        "adaptive" => Some(TransportProtocol::Adaptive),
        _ => None,
    }
}

fn parse_ipv6(token: &str) -> Option<Ipv6Preference> {
    match token {
        "enabled" => Some(Ipv6Preference::Enabled),
        "disabled" => Some(Ipv6Preference::Disabled),
        "server_decides" => Some(Ipv6Preference::ServerDecides),
        _ => None,
    }
}

fn parse_compression(token: &str) -> Option<CompressionMode> {
    match token {
        "enabled" => Some(CompressionMode::Enabled),
        "disabled" => Some(CompressionMode::Disabled),
        "asymmetric" => Some(CompressionMode::Asymmetric),
        _ => None,
    }
}

fn parse_tls_version(token: &str) -> Option<TlsVersion> {
    match token {
        "disabled" => Some(TlsVersion::Disabled),
        "1.0" => Some(TlsVersion::V1_0),
        "1.1" => Some(TlsVersion::V1_1),
        "1.2" => Some(TlsVersion::V1_2),
        "1.3" => Some(TlsVersion::V1_3),
        _ => None,
    }
}

fn parse_cert_profile(token: &str) -> Option<TlsCertProfile> {
    match token.to_ascii_lowercase().as_str() {
        "legacy" => Some(TlsCertProfile::Legacy),
        "preferred" => Some(TlsCertProfile::Preferred),
        "suiteb" => Some(TlsCertProfile::SuiteB),
        _ => None,
    }
}

fn parse_key_direction(token: &str) -> Option<KeyDirection> {
    if token.eq_ignore_ascii_case("bidirectional") {
        return Some(KeyDirection::Bidirectional);
    }
    token.parse::<i64>().ok().and_then(KeyDirection::from_i64)
}

fn parse_bool(token: &str) -> Option<bool> {
    token.parse().ok()
}

fn parse_count(token: &str) -> Option<u64> {
    token.parse().ok()
}

fn parse_level(token: &str) -> Option<u32> {
    token.parse().ok()
}

/// Parses the policy table token for `axis`.
fn fallback<T>(
    axis: Axis,
    parse: impl Fn(&str) -> Option<T>,
    expected: &[&'static str],
) -> Result<T, AxisError> {
    let token = fallback_token(axis).unwrap_or_default();
    parse(token).ok_or_else(|| AxisError::unparseable(axis, ValueOrigin::BuiltIn, token, expected))
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves every axis of `overrides` against `profile`.
///
/// # Errors
///
/// Returns an [`AxisError`] for the first axis whose override or profile
/// value is unparseable or outside its domain.
pub fn resolve<L>(
    overrides: &Overrides,
    profile: &L,
    options: &ResolverOptions,
) -> Result<PartiallyResolved, AxisError>
where
    L: DirectiveLookup + ?Sized,
{
    AxisResolver::new(overrides, profile, options).run()
}

/// Per-run resolver state. Holds only the provenance record.
pub struct AxisResolver<'a, L: DirectiveLookup + ?Sized> {
    overrides: &'a Overrides,
    profile: &'a L,
    options: &'a ResolverOptions,
    sources: IndexMap<Axis, AxisSource>,
}

impl<'a, L: DirectiveLookup + ?Sized> AxisResolver<'a, L> {
    /// Creates a resolver over the given inputs.
    #[must_use]
    pub fn new(overrides: &'a Overrides, profile: &'a L, options: &'a ResolverOptions) -> Self {
        Self {
            overrides,
            profile,
            options,
            sources: IndexMap::with_capacity(Axis::ALL.len()),
        }
    }

    /// Resolves all axes in [`Axis::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns the first [`AxisError`] encountered.
    pub fn run(mut self) -> Result<PartiallyResolved, AxisError> {
        let proto = self.transport()?;
        let ipv6 = self.ipv6()?;
        let compression_mode = self.compression()?;
        let min_tls_version = self.min_tls()?;
        let tls_cert_profile = self.cert_profile()?;
        let server = self.server()?;
        let connection_timeout = self.connection_timeout()?;
        let tun_persist = self.tun_persist()?;
        let google_dns_fallback =
            self.plain_bool(Axis::GoogleDnsFallback, self.overrides.google_dns_fallback)?;
        let autologin_sessions =
            self.plain_bool(Axis::AutologinSessions, self.overrides.autologin_sessions)?;
        let disable_client_cert = self.disable_client_cert()?;
        let ssl_debug_level = self.ssl_debug_level()?;
        let private_key_password = self.private_key_password();
        let key_direction = self.key_direction()?;
        let force_aes_cbc_ciphersuites = self.plain_bool(
            Axis::ForceAesCbcCiphersuites,
            self.overrides.force_aes_cbc_ciphersuites,
        )?;
        let peer_info = self.peer_info();
        let echo = self.plain_bool(Axis::EchoPassthrough, self.overrides.echo)?;
        let info = self.plain_bool(Axis::InfoPassthrough, self.overrides.info)?;
        let gui_version = self.gui_version();

        Ok(PartiallyResolved {
            gui_version,
            server,
            proto,
            ipv6,
            connection_timeout,
            tun_persist,
            google_dns_fallback,
            autologin_sessions,
            disable_client_cert,
            ssl_debug_level,
            compression_mode,
            private_key_password,
            key_direction,
            force_aes_cbc_ciphersuites,
            min_tls_version,
            tls_cert_profile,
            peer_info,
            echo,
            info,
            sources: self.sources,
        })
    }

    fn record(&mut self, axis: Axis, source: AxisSource) {
        tracing::debug!(axis = %axis, source = ?source, "axis resolved");
        self.sources.insert(axis, source);
    }

    fn builtin<T>(
        &mut self,
        axis: Axis,
        parse: impl Fn(&str) -> Option<T>,
        expected: &[&'static str],
    ) -> Result<T, AxisError> {
        let value = fallback(axis, parse, expected)?;
        self.record(axis, AxisSource::BuiltIn);
        Ok(value)
    }

    fn plain_bool(&mut self, axis: Axis, value: Option<bool>) -> Result<bool, AxisError> {
        if let Some(v) = value {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }
        self.builtin(axis, parse_bool, BOOL_TOKENS)
    }

    // ------------------------------------------------------------------------
    // Enumerated axes
    // ------------------------------------------------------------------------

    fn transport(&mut self) -> Result<TransportProtocol, AxisError> {
        let axis = Axis::TransportProtocol;
        let forced = match self.overrides.proto {
            TransportOverride::Udp => Some(TransportProtocol::Udp),
            TransportOverride::Tcp => Some(TransportProtocol::Tcp),
            TransportOverride::Adaptive => Some(TransportProtocol::Adaptive),
            TransportOverride::Default => None,
        };
        if let Some(p) = forced {
            self.record(axis, AxisSource::Override);
            return Ok(p);
        }

        let global = match self.profile.last("proto") {
            Some(raw) => {
                let token = tokens(raw).first().copied().unwrap_or_default();
                Some(parse_transport(token).ok_or_else(|| {
                    AxisError::unparseable(
                        axis,
                        ValueOrigin::Directive("proto".to_string()),
                        token,
                        TRANSPORT_TOKENS,
                    )
                })?)
            }
            None => None,
        };

        let mut seen: Vec<TransportProtocol> = Vec::new();
        for raw in self.profile.occurrences("remote") {
            let proto = match tokens(raw).get(2) {
                Some(token) => parse_transport(token).ok_or_else(|| {
                    AxisError::unparseable(
                        axis,
                        ValueOrigin::Directive("remote".to_string()),
                        token,
                        TRANSPORT_TOKENS,
                    )
                })?,
                None => match global {
                    Some(p) => p,
                    None => continue,
                },
            };
            if !seen.contains(&proto) {
                seen.push(proto);
            }
        }
        if seen.is_empty() {
            if let Some(p) = global {
                seen.push(p);
            }
        }

        match seen.as_slice() {
            [] => self.builtin(axis, parse_transport, TRANSPORT_TOKENS),
            [single] => {
                let single = *single;
                self.record(axis, AxisSource::Profile);
                Ok(single)
            }
            _ => {
                self.record(axis, AxisSource::Profile);
                Ok(TransportProtocol::Adaptive)
            }
        }
    }

    fn ipv6(&mut self) -> Result<Ipv6Preference, AxisError> {
        let axis = Axis::Ipv6Preference;
        let forced = match self.overrides.ipv6 {
            Ipv6Override::Enabled => Some(Ipv6Preference::Enabled),
            Ipv6Override::Disabled => Some(Ipv6Preference::Disabled),
            Ipv6Override::Default => None,
        };
        if let Some(v) = forced {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }
        self.builtin(axis, parse_ipv6, IPV6_TOKENS)
    }

    fn compression(&mut self) -> Result<CompressionMode, AxisError> {
        let axis = Axis::CompressionMode;
        let forced = match self.overrides.compression_mode {
            CompressionOverride::Enabled => Some(CompressionMode::Enabled),
            CompressionOverride::Disabled => Some(CompressionMode::Disabled),
            CompressionOverride::Asymmetric => Some(CompressionMode::Asymmetric),
            CompressionOverride::Default => None,
        };
        if let Some(v) = forced {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }

        let mut mentioned = false;
        let mut requested = false;
        if let Some(raw) = self.profile.last("compress") {
            mentioned = true;
            let token = tokens(raw).first().copied().unwrap_or_default();
            requested |= match token {
                "" | "stub" | "stub-v2" => false,
                "lzo" | "lz4" | "lz4-v2" => true,
                other => {
                    return Err(AxisError::unparseable(
                        axis,
                        ValueOrigin::Directive("compress".to_string()),
                        other,
                        COMPRESS_TOKENS,
                    ));
                }
            };
        }
        if let Some(raw) = self.profile.last("comp-lzo") {
            mentioned = true;
            let token = tokens(raw).first().copied().unwrap_or_default();
            requested |= match token {
                "" | "yes" | "adaptive" => true,
                "no" => false,
                other => {
                    return Err(AxisError::unparseable(
                        axis,
                        ValueOrigin::Directive("comp-lzo".to_string()),
                        other,
                        COMP_LZO_TOKENS,
                    ));
                }
            };
        }

        let mode = fallback(axis, parse_compression, &["enabled", "disabled", "asymmetric"])?;
        let source = if requested {
            AxisSource::Suppressed
        } else if mentioned {
            AxisSource::Profile
        } else {
            AxisSource::BuiltIn
        };
        self.record(axis, source);
        Ok(mode)
    }

    fn min_tls(&mut self) -> Result<TlsVersion, AxisError> {
        let axis = Axis::MinTlsVersion;
        let forced = match self.overrides.min_tls_version {
            MinTlsOverride::Disabled => Some(TlsVersion::Disabled),
            MinTlsOverride::Tls1_0 => Some(TlsVersion::V1_0),
            MinTlsOverride::Tls1_1 => Some(TlsVersion::V1_1),
            MinTlsOverride::Tls1_2 => Some(TlsVersion::V1_2),
            MinTlsOverride::Default => None,
        };
        if let Some(v) = forced {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }

        if let Some(raw) = self.profile.last("tls-version-min") {
            let origin = || ValueOrigin::Directive("tls-version-min".to_string());
            let toks = tokens(raw);
            let version_token = toks.first().copied().unwrap_or_default();
            let version = parse_tls_version(version_token).ok_or_else(|| {
                AxisError::unparseable(axis, origin(), version_token, TLS_VERSION_TOKENS)
            })?;
            if let Some(flag) = toks.get(1).filter(|f| !TLS_VERSION_FLAGS.contains(*f)) {
                return Err(AxisError::unparseable(axis, origin(), flag, TLS_VERSION_FLAGS));
            }
            self.record(axis, AxisSource::Profile);
            return Ok(version);
        }
        self.builtin(axis, parse_tls_version, TLS_VERSION_TOKENS)
    }

    fn cert_profile(&mut self) -> Result<TlsCertProfile, AxisError> {
        let axis = Axis::TlsCertProfile;
        let (forced, fallback) = match self.overrides.tls_cert_profile {
            TlsCertProfileOverride::Legacy => (Some(TlsCertProfile::Legacy), None),
            TlsCertProfileOverride::Preferred => (Some(TlsCertProfile::Preferred), None),
            TlsCertProfileOverride::SuiteB => (Some(TlsCertProfile::SuiteB), None),
            TlsCertProfileOverride::LegacyDefault => (None, Some(TlsCertProfile::Legacy)),
            TlsCertProfileOverride::PreferredDefault => (None, Some(TlsCertProfile::Preferred)),
            TlsCertProfileOverride::Default => (None, None),
        };
        if let Some(v) = forced {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }

        if let Some(raw) = self.profile.last("tls-cert-profile") {
            let token = tokens(raw).first().copied().unwrap_or_default();
            let v = parse_cert_profile(token).ok_or_else(|| {
                AxisError::unparseable(
                    axis,
                    ValueOrigin::Directive("tls-cert-profile".to_string()),
                    token,
                    CERT_PROFILE_TOKENS,
                )
            })?;
            self.record(axis, AxisSource::Profile);
            return Ok(v);
        }

        if let Some(v) = fallback {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }
        self.builtin(axis, parse_cert_profile, CERT_PROFILE_TOKENS)
    }

    // ------------------------------------------------------------------------
    // Scalar axes
    // ------------------------------------------------------------------------

    fn server(&mut self) -> Result<Option<String>, AxisError> {
        let axis = Axis::Server;
        if let Some(host) = &self.overrides.server {
            let host = host.trim();
            if host.is_empty() {
                return Err(AxisError::out_of_domain(
                    axis,
                    ValueOrigin::Override,
                    host,
                    DomainRule::NonEmptyServer,
                ));
            }
            self.record(axis, AxisSource::Override);
            return Ok(Some(host.to_string()));
        }

        if let Some(raw) = self.profile.occurrences("remote").first() {
            let Some(host) = tokens(raw).first().copied() else {
                return Err(AxisError::out_of_domain(
                    axis,
                    ValueOrigin::Directive("remote".to_string()),
                    raw,
                    DomainRule::NonEmptyServer,
                ));
            };
            self.record(axis, AxisSource::Profile);
            return Ok(Some(host.to_string()));
        }

        self.record(axis, AxisSource::BuiltIn);
        Ok(None)
    }

    fn connection_timeout(&mut self) -> Result<u64, AxisError> {
        let axis = Axis::ConnectionTimeout;
        if let Some(secs) = self.overrides.connection_timeout {
            let secs = u64::try_from(secs).map_err(|_| {
                AxisError::out_of_domain(
                    axis,
                    ValueOrigin::Override,
                    secs,
                    DomainRule::NonNegativeTimeout,
                )
            })?;
            self.record(axis, AxisSource::Override);
            return Ok(secs);
        }
        self.builtin(axis, parse_count, &["0"])
    }

    fn tun_persist(&mut self) -> Result<bool, AxisError> {
        let axis = Axis::TunPersist;
        if let Some(v) = self.overrides.tun_persist {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }
        if self.profile.contains("persist-tun") {
            self.record(axis, AxisSource::Profile);
            return Ok(true);
        }
        self.builtin(axis, parse_bool, BOOL_TOKENS)
    }

    fn disable_client_cert(&mut self) -> Result<bool, AxisError> {
        let axis = Axis::DisableClientCert;
        if let Some(v) = self.overrides.disable_client_cert {
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }

        let client_cert = self
            .profile
            .occurrences("setenv")
            .iter()
            .rev()
            .map(|raw| tokens(raw))
            .find(|t| t.first().is_some_and(|name| *name == "CLIENT_CERT"));
        if let Some(toks) = client_cert {
            let token = toks.get(1).copied().unwrap_or_default();
            let disabled = match token {
                "0" => true,
                "1" => false,
                other => {
                    return Err(AxisError::unparseable(
                        axis,
                        ValueOrigin::Directive("setenv".to_string()),
                        other,
                        CLIENT_CERT_TOKENS,
                    ));
                }
            };
            self.record(axis, AxisSource::Profile);
            return Ok(disabled);
        }
        self.builtin(axis, parse_bool, BOOL_TOKENS)
    }

    fn ssl_debug_level(&mut self) -> Result<u32, AxisError> {
        let axis = Axis::SslDebugLevel;
        if let Some(level) = self.overrides.ssl_debug_level {
            let level = u32::try_from(level).map_err(|_| {
                AxisError::out_of_domain(
                    axis,
                    ValueOrigin::Override,
                    level,
                    DomainRule::NonNegativeDebugLevel,
                )
            })?;
            self.record(axis, AxisSource::Override);
            return Ok(level);
        }
        self.builtin(axis, parse_level, &["0"])
    }

    fn private_key_password(&mut self) -> Option<Secret> {
        let axis = Axis::PrivateKeyPassword;
        match &self.overrides.private_key_password {
            Some(secret) => {
                self.record(axis, AxisSource::Override);
                Some(secret.clone())
            }
            None => {
                self.record(axis, AxisSource::BuiltIn);
                None
            }
        }
    }

    fn key_direction(&mut self) -> Result<KeyDirection, AxisError> {
        let axis = Axis::KeyDirection;
        if let Some(dir) = self.overrides.key_direction {
            let v = KeyDirection::from_i64(dir).ok_or_else(|| {
                AxisError::out_of_domain(
                    axis,
                    ValueOrigin::Override,
                    dir,
                    DomainRule::KeyDirectionRange,
                )
            })?;
            self.record(axis, AxisSource::Override);
            return Ok(v);
        }

        if let Some(raw) = self.profile.last("key-direction") {
            let origin = || ValueOrigin::Directive("key-direction".to_string());
            let token = tokens(raw).first().copied().unwrap_or_default();
            let v = match parse_key_direction(token) {
                Some(v) => v,
                // Numeric but out of range is a domain error, anything else a parse error
                None if token.parse::<i64>().is_ok() => {
                    return Err(AxisError::out_of_domain(
                        axis,
                        origin(),
                        token,
                        DomainRule::KeyDirectionRange,
                    ));
                }
                None => {
                    return Err(AxisError::unparseable(
                        axis,
                        origin(),
                        token,
                        KEY_DIRECTION_TOKENS,
                    ));
                }
            };
            self.record(axis, AxisSource::Profile);
            return Ok(v);
        }
        self.builtin(axis, parse_key_direction, KEY_DIRECTION_TOKENS)
    }

    fn peer_info(&mut self) -> IndexMap<String, String> {
        let axis = Axis::PeerInfo;
        match &self.overrides.peer_info {
            Some(map) => {
                self.record(axis, AxisSource::Override);
                map.clone()
            }
            None => {
                self.record(axis, AxisSource::BuiltIn);
                IndexMap::new()
            }
        }
    }

    fn gui_version(&mut self) -> String {
        let axis = Axis::GuiVersion;
        match self.overrides.gui_version.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.record(axis, AxisSource::Override);
                v.to_string()
            }
            _ => {
                self.record(axis, AxisSource::BuiltIn);
                self.options.builtin_gui_version.clone()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::directives::ProfileDirectives;
    use crate::error::AxisErrorReason;

    fn run(
        overrides: &Overrides,
        profile: &ProfileDirectives,
    ) -> Result<PartiallyResolved, AxisError> {
        resolve(overrides, profile, &ResolverOptions::default())
    }

    fn profile(pairs: &[(&str, &str)]) -> ProfileDirectives {
        ProfileDirectives::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_every_builtin_token_parses() {
        let r = run(&Overrides::default(), &ProfileDirectives::new()).unwrap();
        assert_eq!(r.sources().len(), Axis::ALL.len());
        for (axis, source) in r.sources() {
            assert_eq!(*source, AxisSource::BuiltIn, "{axis}");
        }
    }

    #[test]
    fn test_sources_follow_axis_order() {
        let r = run(&Overrides::default(), &ProfileDirectives::new()).unwrap();
        let order: Vec<Axis> = r.sources().keys().copied().collect();
        assert_eq!(order, Axis::ALL.to_vec());
    }

    #[test]
    fn test_transport_from_remote() {
        let r = run(
            &Overrides::default(),
            &profile(&[("remote", "vpn.example.com 443 tcp")]),
        )
        .unwrap();
        assert_eq!(r.proto, TransportProtocol::Tcp);
        assert_eq!(r.source(Axis::TransportProtocol), Some(AxisSource::Profile));
    }

    #[test]
    fn test_transport_mixed_remotes_adaptive() {
        let p = profile(&[
            ("remote", "a.example.com 1194 udp"),
            ("remote", "b.example.com 443 tcp-client"),
        ]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert_eq!(r.proto, TransportProtocol::Adaptive);
        assert_eq!(r.source(Axis::TransportProtocol), Some(AxisSource::Profile));
    }

    #[test]
    fn test_transport_global_proto_fills_remote() {
        let p = profile(&[("proto", "udp6"), ("remote", "a.example.com 1194")]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert_eq!(r.proto, TransportProtocol::Udp);
    }

    #[test]
    fn test_transport_remote_without_proto_is_silent() {
        let p = profile(&[("remote", "a.example.com 1194")]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert_eq!(r.proto, TransportProtocol::Adaptive);
        assert_eq!(r.source(Axis::TransportProtocol), Some(AxisSource::BuiltIn));
    }

    #[test]
    fn test_transport_override_wins() {
        let overrides = Overrides {
            proto: TransportOverride::Udp,
            ..Overrides::default()
        };
        let r = run(&overrides, &profile(&[("remote", "vpn.example.com 443 tcp")])).unwrap();
        assert_eq!(r.proto, TransportProtocol::Udp);
        assert_eq!(r.source(Axis::TransportProtocol), Some(AxisSource::Override));
    }

    #[test]
    fn test_transport_unparseable_suggests() {
        let err = run(&Overrides::default(), &profile(&[("proto", "tpc")])).unwrap_err();
        assert_eq!(err.axis, Axis::TransportProtocol);
        assert_eq!(err.origin, ValueOrigin::Directive("proto".to_string()));
        assert!(matches!(
            err.reason,
            AxisErrorReason::Unparseable { suggestion: Some("tcp"), .. }
        ));
    }

    #[test]
    fn test_compression_request_suppressed() {
        let r = run(&Overrides::default(), &profile(&[("comp-lzo", "yes")])).unwrap();
        assert_eq!(r.compression_mode, CompressionMode::Disabled);
        assert_eq!(r.source(Axis::CompressionMode), Some(AxisSource::Suppressed));

        let r = run(&Overrides::default(), &profile(&[("compress", "lz4-v2")])).unwrap();
        assert_eq!(r.source(Axis::CompressionMode), Some(AxisSource::Suppressed));
    }

    #[test]
    fn test_compression_stub_is_profile() {
        let r = run(&Overrides::default(), &profile(&[("compress", "stub-v2")])).unwrap();
        assert_eq!(r.compression_mode, CompressionMode::Disabled);
        assert_eq!(r.source(Axis::CompressionMode), Some(AxisSource::Profile));

        let r = run(&Overrides::default(), &profile(&[("compress", "")])).unwrap();
        assert_eq!(r.source(Axis::CompressionMode), Some(AxisSource::Profile));
    }

    #[test]
    fn test_compression_override_enables() {
        let overrides = Overrides {
            compression_mode: CompressionOverride::Asymmetric,
            ..Overrides::default()
        };
        let r = run(&overrides, &profile(&[("comp-lzo", "no")])).unwrap();
        assert_eq!(r.compression_mode, CompressionMode::Asymmetric);
    }

    #[test]
    fn test_compression_unknown_algorithm() {
        let err = run(&Overrides::default(), &profile(&[("compress", "zstd")])).unwrap_err();
        assert_eq!(err.axis, Axis::CompressionMode);
    }

    #[test]
    fn test_min_tls_from_profile() {
        let r = run(
            &Overrides::default(),
            &profile(&[("tls-version-min", "1.2 or-highest")]),
        )
        .unwrap();
        assert_eq!(r.min_tls_version, TlsVersion::V1_2);
        let r = run(&Overrides::default(), &profile(&[("tls-version-min", "1.3")])).unwrap();
        assert_eq!(r.min_tls_version, TlsVersion::V1_3);
    }

    #[test]
    fn test_min_tls_bad_flag() {
        let err = run(
            &Overrides::default(),
            &profile(&[("tls-version-min", "1.2 or-lowest")]),
        )
        .unwrap_err();
        assert_eq!(err.value, "or-lowest");
    }

    #[test]
    fn test_min_tls_override_disables_profile_floor() {
        let overrides = Overrides {
            min_tls_version: MinTlsOverride::Disabled,
            ..Overrides::default()
        };
        let r = run(&overrides, &profile(&[("tls-version-min", "1.2")])).unwrap();
        assert_eq!(r.min_tls_version, TlsVersion::Disabled);
    }

    #[test]
    fn test_cert_profile_fallback_only_when_silent() {
        let overrides = Overrides {
            tls_cert_profile: TlsCertProfileOverride::PreferredDefault,
            ..Overrides::default()
        };
        let r = run(&overrides, &ProfileDirectives::new()).unwrap();
        assert_eq!(r.tls_cert_profile, TlsCertProfile::Preferred);

        let r = run(&overrides, &profile(&[("tls-cert-profile", "suiteb")])).unwrap();
        assert_eq!(r.tls_cert_profile, TlsCertProfile::SuiteB);
        assert_eq!(r.source(Axis::TlsCertProfile), Some(AxisSource::Profile));
    }

    #[test]
    fn test_cert_profile_hard_override() {
        let overrides = Overrides {
            tls_cert_profile: TlsCertProfileOverride::Legacy,
            ..Overrides::default()
        };
        let r = run(&overrides, &profile(&[("tls-cert-profile", "preferred")])).unwrap();
        assert_eq!(r.tls_cert_profile, TlsCertProfile::Legacy);
    }

    #[test]
    fn test_server_from_first_remote() {
        let p = profile(&[("remote", "a.example.com 1194"), ("remote", "b.example.com 1194")]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert_eq!(r.server.as_deref(), Some("a.example.com"));
    }

    #[test]
    fn test_server_empty_override_rejected() {
        let overrides = Overrides {
            server: Some("   ".to_string()),
            ..Overrides::default()
        };
        let err = run(&overrides, &ProfileDirectives::new()).unwrap_err();
        assert_eq!(err.reason, AxisErrorReason::OutOfDomain(DomainRule::NonEmptyServer));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let overrides = Overrides {
            connection_timeout: Some(-1),
            ..Overrides::default()
        };
        let err = run(&overrides, &ProfileDirectives::new()).unwrap_err();
        assert_eq!(err.axis, Axis::ConnectionTimeout);
        assert_eq!(err.reason, AxisErrorReason::OutOfDomain(DomainRule::NonNegativeTimeout));
    }

    #[test]
    fn test_negative_debug_level_rejected() {
        let overrides = Overrides {
            ssl_debug_level: Some(-3),
            ..Overrides::default()
        };
        let err = run(&overrides, &ProfileDirectives::new()).unwrap_err();
        assert_eq!(err.axis, Axis::SslDebugLevel);
    }

    #[test]
    fn test_key_direction_override_out_of_range() {
        let overrides = Overrides {
            key_direction: Some(2),
            ..Overrides::default()
        };
        let err = run(&overrides, &ProfileDirectives::new()).unwrap_err();
        assert_eq!(err.axis, Axis::KeyDirection);
        assert_eq!(err.origin, ValueOrigin::Override);
        assert_eq!(err.reason, AxisErrorReason::OutOfDomain(DomainRule::KeyDirectionRange));
    }

    #[test]
    fn test_key_direction_profile_forms() {
        let r = run(&Overrides::default(), &profile(&[("key-direction", "1")])).unwrap();
        assert_eq!(r.key_direction, KeyDirection::Inverse);
        let r = run(
            &Overrides::default(),
            &profile(&[("key-direction", "bidirectional")]),
        )
        .unwrap();
        assert_eq!(r.key_direction, KeyDirection::Bidirectional);

        let err = run(&Overrides::default(), &profile(&[("key-direction", "3")])).unwrap_err();
        assert_eq!(err.reason, AxisErrorReason::OutOfDomain(DomainRule::KeyDirectionRange));
        let err = run(&Overrides::default(), &profile(&[("key-direction", "up")])).unwrap_err();
        assert!(matches!(err.reason, AxisErrorReason::Unparseable { .. }));
    }

    #[test]
    fn test_setenv_client_cert() {
        let p = profile(&[("setenv", "UV_FOO bar"), ("setenv", "CLIENT_CERT 0")]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert!(r.disable_client_cert);
        assert_eq!(r.source(Axis::DisableClientCert), Some(AxisSource::Profile));

        let p = profile(&[("setenv", "UV_FOO bar")]);
        let r = run(&Overrides::default(), &p).unwrap();
        assert!(!r.disable_client_cert);
        assert_eq!(r.source(Axis::DisableClientCert), Some(AxisSource::BuiltIn));
    }

    #[test]
    fn test_persist_tun_flag() {
        let r = run(&Overrides::default(), &profile(&[("persist-tun", "")])).unwrap();
        assert!(r.tun_persist);
        let overrides = Overrides {
            tun_persist: Some(false),
            ..Overrides::default()
        };
        let r = run(&overrides, &profile(&[("persist-tun", "")])).unwrap();
        assert!(!r.tun_persist);
    }

    #[test]
    fn test_blank_gui_version_defers() {
        let overrides = Overrides {
            gui_version: Some("  ".to_string()),
            ..Overrides::default()
        };
        let opts = ResolverOptions::default().with_gui_version("acme 1.0");
        let r = resolve(&overrides, &ProfileDirectives::new(), &opts).unwrap();
        assert_eq!(r.gui_version(), "acme 1.0");
        assert_eq!(r.source(Axis::GuiVersion), Some(AxisSource::BuiltIn));
    }
}
