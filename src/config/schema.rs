//! Override set and resolved configuration types.
//!
//! Override enums carry a `Default` variant meaning "defer to the profile or
//! built-in policy"; scalar overrides use `None` for the same purpose. The
//! resolved types have no such variant, so a [`ResolvedConfiguration`] can
//! never hold an unresolved axis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::peer_info::PeerInfo;

// ============================================================================
// Axes
// ============================================================================

/// One independently configurable dimension of the connection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    /// Transport protocol (UDP, TCP, adaptive)
    TransportProtocol,
    /// IPv6 tunnel preference
    Ipv6Preference,
    /// Compression mode
    CompressionMode,
    /// Minimum TLS version
    MinTlsVersion,
    /// Certificate strength profile
    TlsCertProfile,
    /// Server host override
    Server,
    /// Connection timeout in seconds
    ConnectionTimeout,
    /// Keep the tun interface across pauses and reconnects
    TunPersist,
    /// Fall back to public DNS for redirect-gateway profiles without DNS
    GoogleDnsFallback,
    /// Autologin sessions
    AutologinSessions,
    /// Suppress sending the client certificate
    DisableClientCert,
    /// SSL library debug level
    SslDebugLevel,
    /// Private key password
    PrivateKeyPassword,
    /// tls-auth key direction
    KeyDirection,
    /// Restrict to DHE-RSA AES-CBC suites
    ForceAesCbcCiphersuites,
    /// Custom peer-info pairs
    PeerInfo,
    /// Pass through pushed `echo` directives
    EchoPassthrough,
    /// Pass through control channel INFO notifications
    InfoPassthrough,
    /// Client identity string sent as `IV_GUI_VER`
    GuiVersion,
}

impl Axis {
    /// Every axis, in resolution order.
    pub const ALL: [Self; 19] = [
        Self::TransportProtocol,
        Self::Ipv6Preference,
        Self::CompressionMode,
        Self::MinTlsVersion,
        Self::TlsCertProfile,
        Self::Server,
        Self::ConnectionTimeout,
        Self::TunPersist,
        Self::GoogleDnsFallback,
        Self::AutologinSessions,
        Self::DisableClientCert,
        Self::SslDebugLevel,
        Self::PrivateKeyPassword,
        Self::KeyDirection,
        Self::ForceAesCbcCiphersuites,
        Self::PeerInfo,
        Self::EchoPassthrough,
        Self::InfoPassthrough,
        Self::GuiVersion,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TransportProtocol => "transport-protocol",
            Self::Ipv6Preference => "ipv6-preference",
            Self::CompressionMode => "compression-mode",
            Self::MinTlsVersion => "min-tls-version",
            Self::TlsCertProfile => "tls-cert-profile",
            Self::Server => "server",
            Self::ConnectionTimeout => "connection-timeout",
            Self::TunPersist => "tun-persist",
            Self::GoogleDnsFallback => "google-dns-fallback",
            Self::AutologinSessions => "autologin-sessions",
            Self::DisableClientCert => "disable-client-cert",
            Self::SslDebugLevel => "ssl-debug-level",
            Self::PrivateKeyPassword => "private-key-password",
            Self::KeyDirection => "key-direction",
            Self::ForceAesCbcCiphersuites => "force-aes-cbc-ciphersuites",
            Self::PeerInfo => "peer-info",
            Self::EchoPassthrough => "echo-passthrough",
            Self::InfoPassthrough => "info-passthrough",
            Self::GuiVersion => "gui-version",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which precedence tier produced an axis value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSource {
    /// Explicit override
    Override,
    /// Profile directive
    Profile,
    /// Built-in policy, profile silent
    BuiltIn,
    /// Built-in policy replaced a value the profile asked for
    Suppressed,
}

// ============================================================================
// Override Enums
// ============================================================================

/// Transport protocol override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportOverride {
    /// Force UDP
    Udp,
    /// Force TCP
    Tcp,
    /// Try both
    Adaptive,
    /// Use the transport from the profile
    #[default]
    Default,
}

/// IPv6 preference override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ipv6Override {
    /// Request combined IPv4/IPv6 tunnel
    Enabled,
    /// IPv4-only tunnel
    Disabled,
    /// Leave the decision to the server
    #[default]
    Default,
}

/// Compression mode override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionOverride {
    /// Compression on uplink and downlink
    Enabled,
    /// Compression stubs only
    Disabled,
    /// Downlink-only compression (server to client)
    #[serde(alias = "asym")]
    Asymmetric,
    /// Built-in policy (stubs only)
    #[default]
    Default,
}

/// Minimum TLS version override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinTlsOverride {
    /// No minimum; disables any minimum set in the profile
    #[serde(rename = "disabled")]
    Disabled,
    /// TLS 1.0 minimum
    #[serde(rename = "1.0", alias = "tls1_0")]
    Tls1_0,
    /// TLS 1.1 minimum
    #[serde(rename = "1.1", alias = "tls1_1")]
    Tls1_1,
    /// TLS 1.2 minimum
    #[serde(rename = "1.2", alias = "tls1_2")]
    Tls1_2,
    /// Use the profile minimum
    #[default]
    #[serde(rename = "default")]
    Default,
}

/// Certificate profile override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsCertProfileOverride {
    /// Allow 1024-bit RSA certs signed with SHA1, overriding the profile
    Legacy,
    /// Require 2048-bit RSA with SHA256 or better, overriding the profile
    Preferred,
    /// Require NSA Suite B, overriding the profile
    #[serde(rename = "suiteb", alias = "suite_b")]
    SuiteB,
    /// Legacy only if the profile specifies nothing
    LegacyDefault,
    /// Preferred only if the profile specifies nothing
    PreferredDefault,
    /// Use the profile setting
    #[default]
    Default,
}

// ============================================================================
// Resolved Enums
// ============================================================================

/// Resolved transport protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportProtocol {
    /// UDP
    Udp,
    /// TCP
    Tcp,
    /// Try both
    Adaptive,
}

impl TransportProtocol {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
            Self::Adaptive => "adaptive",
        }
    }
}

/// Resolved IPv6 preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ipv6Preference {
    /// Request combined IPv4/IPv6 tunnel
    Enabled,
    /// IPv4-only tunnel
    Disabled,
    /// The server decides
    ServerDecides,
}

impl Ipv6Preference {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::ServerDecides => "server_decides",
        }
    }
}

/// Resolved compression mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    /// Compression on uplink and downlink
    Enabled,
    /// Compression stubs only
    Disabled,
    /// Downlink-only compression
    Asymmetric,
}

impl CompressionMode {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Asymmetric => "asymmetric",
        }
    }
}

/// Resolved TLS floor. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TlsVersion {
    /// No floor imposed
    #[serde(rename = "disabled")]
    Disabled,
    /// TLS 1.0
    #[serde(rename = "1.0")]
    V1_0,
    /// TLS 1.1
    #[serde(rename = "1.1")]
    V1_1,
    /// TLS 1.2
    #[serde(rename = "1.2")]
    V1_2,
    /// TLS 1.3 (profile only)
    #[serde(rename = "1.3")]
    V1_3,
}

impl std::fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Disabled => "disabled",
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
        })
    }
}

/// Resolved certificate profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsCertProfile {
    /// 1024-bit RSA with SHA1 allowed
    Legacy,
    /// 2048-bit RSA with SHA256 or better
    Preferred,
    /// NSA Suite B
    #[serde(rename = "suiteb")]
    SuiteB,
}

impl TlsCertProfile {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Preferred => "preferred",
            Self::SuiteB => "suiteb",
        }
    }
}

/// Resolved tls-auth key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i8")]
pub enum KeyDirection {
    /// -1, both keys used in both directions
    Bidirectional,
    /// 0
    Normal,
    /// 1
    Inverse,
}

impl KeyDirection {
    /// Numeric form used in profiles.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Bidirectional => -1,
            Self::Normal => 0,
            Self::Inverse => 1,
        }
    }

    /// Maps -1, 0 and 1; anything else is `None`.
    #[must_use]
    pub const fn from_i64(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Self::Bidirectional),
            0 => Some(Self::Normal),
            1 => Some(Self::Inverse),
            _ => None,
        }
    }
}

impl From<KeyDirection> for i8 {
    fn from(value: KeyDirection) -> Self {
        value.as_i8()
    }
}

// ============================================================================
// Secrets
// ============================================================================

/// A secret string that never shows up in `Debug` output or serialized
/// configurations.
#[derive(Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrows the secret for handing to the engine.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED])")
    }
}

// ============================================================================
// Override Set
// ============================================================================

/// Caller-supplied overrides. Every field defaults to "defer".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overrides {
    /// Client identity, `<gui_identifier> <version>`, sent as `IV_GUI_VER`
    pub gui_version: Option<String>,

    /// Server host used instead of the profile `remote`
    pub server: Option<String>,

    /// Transport protocol
    pub proto: TransportOverride,

    /// IPv6 preference
    pub ipv6: Ipv6Override,

    /// Connection timeout in seconds, 0 retries forever
    pub connection_timeout: Option<i64>,

    /// Keep tun interface during pauses or reconnections
    pub tun_persist: Option<bool>,

    /// Use public DNS when a redirect-gateway profile defines none
    pub google_dns_fallback: Option<bool>,

    /// Enable autologin sessions
    pub autologin_sessions: Option<bool>,

    /// Don't send client cert/key to the peer
    pub disable_client_cert: Option<bool>,

    /// SSL library debug level
    pub ssl_debug_level: Option<i64>,

    /// Compression mode
    pub compression_mode: CompressionOverride,

    /// Private key password
    pub private_key_password: Option<Secret>,

    /// tls-auth key direction (-1, 0 or 1)
    pub key_direction: Option<i64>,

    /// Force DHE-RSA AES-CBC suites and disable the TLS floor
    pub force_aes_cbc_ciphersuites: Option<bool>,

    /// Minimum TLS version
    pub min_tls_version: MinTlsOverride,

    /// Certificate profile
    pub tls_cert_profile: TlsCertProfileOverride,

    /// Custom peer-info pairs
    pub peer_info: Option<IndexMap<String, String>>,

    /// Pass through pushed `echo` directives
    pub echo: Option<bool>,

    /// Pass through control channel INFO notifications
    pub info: Option<bool>,
}

// ============================================================================
// Resolution Stages
// ============================================================================

/// Output of the axis resolver: every axis concrete, peer-info not yet
/// composed, cross-field rules not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartiallyResolved {
    pub(crate) gui_version: String,
    pub(crate) server: Option<String>,
    pub(crate) proto: TransportProtocol,
    pub(crate) ipv6: Ipv6Preference,
    pub(crate) connection_timeout: u64,
    pub(crate) tun_persist: bool,
    pub(crate) google_dns_fallback: bool,
    pub(crate) autologin_sessions: bool,
    pub(crate) disable_client_cert: bool,
    pub(crate) ssl_debug_level: u32,
    pub(crate) compression_mode: CompressionMode,
    pub(crate) private_key_password: Option<Secret>,
    pub(crate) key_direction: KeyDirection,
    pub(crate) force_aes_cbc_ciphersuites: bool,
    pub(crate) min_tls_version: TlsVersion,
    pub(crate) tls_cert_profile: TlsCertProfile,
    pub(crate) peer_info: IndexMap<String, String>,
    pub(crate) echo: bool,
    pub(crate) info: bool,
    pub(crate) sources: IndexMap<Axis, AxisSource>,
}

impl PartiallyResolved {
    /// Provenance of every axis, in resolution order.
    #[must_use]
    pub const fn sources(&self) -> &IndexMap<Axis, AxisSource> {
        &self.sources
    }

    /// Provenance of one axis.
    #[must_use]
    pub fn source(&self, axis: Axis) -> Option<AxisSource> {
        self.sources.get(&axis).copied()
    }

    /// Resolved TLS floor before cross-field rules.
    #[must_use]
    pub const fn min_tls_version(&self) -> TlsVersion {
        self.min_tls_version
    }

    /// Resolved certificate profile.
    #[must_use]
    pub const fn tls_cert_profile(&self) -> TlsCertProfile {
        self.tls_cert_profile
    }

    /// Resolved transport.
    #[must_use]
    pub const fn proto(&self) -> TransportProtocol {
        self.proto
    }

    /// Resolved compression mode.
    #[must_use]
    pub const fn compression_mode(&self) -> CompressionMode {
        self.compression_mode
    }

    /// Resolved client identity.
    #[must_use]
    pub fn gui_version(&self) -> &str {
        &self.gui_version
    }

    /// Caller peer-info pairs awaiting composition.
    #[must_use]
    pub const fn peer_info_overrides(&self) -> &IndexMap<String, String> {
        &self.peer_info
    }
}

/// The fully resolved, validated connection policy handed to the tunnel
/// engine. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    gui_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<String>,
    proto: TransportProtocol,
    ipv6: Ipv6Preference,
    connection_timeout: u64,
    tun_persist: bool,
    google_dns_fallback: bool,
    autologin_sessions: bool,
    disable_client_cert: bool,
    ssl_debug_level: u32,
    compression_mode: CompressionMode,
    #[serde(skip)]
    private_key_password: Option<Secret>,
    key_direction: KeyDirection,
    force_aes_cbc_ciphersuites: bool,
    min_tls_version: TlsVersion,
    tls_cert_profile: TlsCertProfile,
    peer_info: PeerInfo,
    echo: bool,
    info: bool,
}

impl ResolvedConfiguration {
    /// Seals a validated partial resolution together with its composed
    /// peer-info map.
    pub(crate) fn seal(partial: PartiallyResolved, peer_info: PeerInfo) -> Self {
        Self {
            gui_version: partial.gui_version,
            server: partial.server,
            proto: partial.proto,
            ipv6: partial.ipv6,
            connection_timeout: partial.connection_timeout,
            tun_persist: partial.tun_persist,
            google_dns_fallback: partial.google_dns_fallback,
            autologin_sessions: partial.autologin_sessions,
            disable_client_cert: partial.disable_client_cert,
            ssl_debug_level: partial.ssl_debug_level,
            compression_mode: partial.compression_mode,
            private_key_password: partial.private_key_password,
            key_direction: partial.key_direction,
            force_aes_cbc_ciphersuites: partial.force_aes_cbc_ciphersuites,
            min_tls_version: partial.min_tls_version,
            tls_cert_profile: partial.tls_cert_profile,
            peer_info,
            echo: partial.echo,
            info: partial.info,
        }
    }

    /// Client identity string.
    #[must_use]
    pub fn gui_version(&self) -> &str {
        &self.gui_version
    }

    /// Server host, when the override or profile names one.
    #[must_use]
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Transport protocol.
    #[must_use]
    pub const fn proto(&self) -> TransportProtocol {
        self.proto
    }

    /// IPv6 preference.
    #[must_use]
    pub const fn ipv6(&self) -> Ipv6Preference {
        self.ipv6
    }

    /// Connection timeout in seconds; 0 retries forever.
    #[must_use]
    pub const fn connection_timeout(&self) -> u64 {
        self.connection_timeout
    }

    /// Keep tun interface during pauses or reconnections.
    #[must_use]
    pub const fn tun_persist(&self) -> bool {
        self.tun_persist
    }

    /// Public DNS fallback.
    #[must_use]
    pub const fn google_dns_fallback(&self) -> bool {
        self.google_dns_fallback
    }

    /// Autologin sessions.
    #[must_use]
    pub const fn autologin_sessions(&self) -> bool {
        self.autologin_sessions
    }

    /// Client certificate suppression.
    #[must_use]
    pub const fn disable_client_cert(&self) -> bool {
        self.disable_client_cert
    }

    /// SSL library debug level.
    #[must_use]
    pub const fn ssl_debug_level(&self) -> u32 {
        self.ssl_debug_level
    }

    /// Compression mode.
    #[must_use]
    pub const fn compression_mode(&self) -> CompressionMode {
        self.compression_mode
    }

    /// Private key password.
    #[must_use]
    pub const fn private_key_password(&self) -> Option<&Secret> {
        self.private_key_password.as_ref()
    }

    /// tls-auth key direction.
    #[must_use]
    pub const fn key_direction(&self) -> KeyDirection {
        self.key_direction
    }

    /// DHE-RSA AES-CBC suite restriction.
    #[must_use]
    pub const fn force_aes_cbc_ciphersuites(&self) -> bool {
        self.force_aes_cbc_ciphersuites
    }

    /// Effective TLS floor.
    #[must_use]
    pub const fn min_tls_version(&self) -> TlsVersion {
        self.min_tls_version
    }

    /// Certificate profile.
    #[must_use]
    pub const fn tls_cert_profile(&self) -> TlsCertProfile {
        self.tls_cert_profile
    }

    /// Outbound peer-info map.
    #[must_use]
    pub const fn peer_info(&self) -> &PeerInfo {
        &self.peer_info
    }

    /// Pass through pushed `echo` directives.
    #[must_use]
    pub const fn echo(&self) -> bool {
        self.echo
    }

    /// Pass through INFO notifications.
    #[must_use]
    pub const fn info(&self) -> bool {
        self.info
    }

    /// Renders one axis for display. The private key password is never shown.
    #[must_use]
    pub fn display_value(&self, axis: Axis) -> String {
        match axis {
            Axis::TransportProtocol => self.proto.as_str().to_string(),
            Axis::Ipv6Preference => self.ipv6.as_str().to_string(),
            Axis::CompressionMode => self.compression_mode.as_str().to_string(),
            Axis::MinTlsVersion => self.min_tls_version.to_string(),
            Axis::TlsCertProfile => self.tls_cert_profile.as_str().to_string(),
            Axis::Server => self
                .server
                .clone()
                .unwrap_or_else(|| "(absent)".to_string()),
            Axis::ConnectionTimeout => self.connection_timeout.to_string(),
            Axis::TunPersist => self.tun_persist.to_string(),
            Axis::GoogleDnsFallback => self.google_dns_fallback.to_string(),
            Axis::AutologinSessions => self.autologin_sessions.to_string(),
            Axis::DisableClientCert => self.disable_client_cert.to_string(),
            Axis::SslDebugLevel => self.ssl_debug_level.to_string(),
            Axis::PrivateKeyPassword => match self.private_key_password {
                Some(_) => "(set)".to_string(),
                None => "(absent)".to_string(),
            },
            Axis::KeyDirection => self.key_direction.as_i8().to_string(),
            Axis::ForceAesCbcCiphersuites => self.force_aes_cbc_ciphersuites.to_string(),
            Axis::PeerInfo => self.peer_info.to_wire_lines().join(", "),
            Axis::EchoPassthrough => self.echo.to_string(),
            Axis::InfoPassthrough => self.info.to_string(),
            Axis::GuiVersion => self.gui_version.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_default_defers_everything() {
        let o = Overrides::default();
        assert_eq!(o.proto, TransportOverride::Default);
        assert_eq!(o.ipv6, Ipv6Override::Default);
        assert_eq!(o.compression_mode, CompressionOverride::Default);
        assert_eq!(o.min_tls_version, MinTlsOverride::Default);
        assert_eq!(o.tls_cert_profile, TlsCertProfileOverride::Default);
        assert!(o.server.is_none());
        assert!(o.key_direction.is_none());
        assert!(o.peer_info.is_none());
    }

    #[test]
    fn test_overrides_deserialize() {
        let yaml = r#"
proto: tcp
ipv6: disabled
compression_mode: asym
min_tls_version: "1.2"
tls_cert_profile: suiteb
key_direction: 1
private_key_password: hunter2
peer_info:
  UV_LANG: en
"#;
        let o: Overrides = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(o.proto, TransportOverride::Tcp);
        assert_eq!(o.ipv6, Ipv6Override::Disabled);
        assert_eq!(o.compression_mode, CompressionOverride::Asymmetric);
        assert_eq!(o.min_tls_version, MinTlsOverride::Tls1_2);
        assert_eq!(o.tls_cert_profile, TlsCertProfileOverride::SuiteB);
        assert_eq!(o.key_direction, Some(1));
        assert_eq!(
            o.private_key_password.as_ref().map(Secret::expose),
            Some("hunter2")
        );
        assert_eq!(o.peer_info.unwrap().get("UV_LANG").unwrap(), "en");
    }

    #[test]
    fn test_overrides_reject_unknown_field() {
        let result: Result<Overrides, _> = serde_yaml::from_str("protocol: udp");
        assert!(result.is_err());
    }

    #[test]
    fn test_cert_profile_fallback_variants_deserialize() {
        let v: TlsCertProfileOverride = serde_yaml::from_str("legacy_default").unwrap();
        assert_eq!(v, TlsCertProfileOverride::LegacyDefault);
        let v: TlsCertProfileOverride = serde_yaml::from_str("preferred_default").unwrap();
        assert_eq!(v, TlsCertProfileOverride::PreferredDefault);
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let s = Secret::new("hunter2".to_string());
        let debug = format!("{s:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_tls_version_ordering() {
        assert!(TlsVersion::Disabled < TlsVersion::V1_0);
        assert!(TlsVersion::V1_1 < TlsVersion::V1_2);
        assert!(TlsVersion::V1_2 < TlsVersion::V1_3);
    }

    #[test]
    fn test_key_direction_domain() {
        assert_eq!(KeyDirection::from_i64(-1), Some(KeyDirection::Bidirectional));
        assert_eq!(KeyDirection::from_i64(0), Some(KeyDirection::Normal));
        assert_eq!(KeyDirection::from_i64(1), Some(KeyDirection::Inverse));
        assert_eq!(KeyDirection::from_i64(2), None);
        assert_eq!(KeyDirection::from_i64(-2), None);
        assert_eq!(
            serde_json::to_string(&KeyDirection::Bidirectional).unwrap(),
            "-1"
        );
    }

    #[test]
    fn test_axis_names_unique() {
        let mut names: Vec<&str> = Axis::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Axis::ALL.len());
    }

    #[test]
    fn test_axis_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Axis::ForceAesCbcCiphersuites).unwrap(),
            "\"force-aes-cbc-ciphersuites\""
        );
    }
}
