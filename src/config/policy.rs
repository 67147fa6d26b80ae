//! Built-in default policy, one row per axis.
//!
//! The resolver consults this table when neither an override nor a profile
//! directive settles an axis. It is also what `ovpnconf policy` prints.

use serde::Serialize;

use crate::config::schema::Axis;

/// What an axis falls back to when the profile is silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fallback {
    /// A concrete token in the axis vocabulary
    Token(&'static str),
    /// The value is left unset
    Absent,
    /// An empty collection
    Empty,
    /// The builtin client identity string
    ClientIdentity,
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(t) => f.write_str(t),
            Self::Absent => f.write_str("(absent)"),
            Self::Empty => f.write_str("(empty)"),
            Self::ClientIdentity => f.write_str("(client identity)"),
        }
    }
}

/// One row of the default policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisPolicy {
    /// Axis this row governs
    pub axis: Axis,
    /// Profile directives consulted, in precedence order
    pub directives: &'static [&'static str],
    /// Built-in value
    pub fallback: Fallback,
    /// Special handling, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Default policy for every axis, in resolution order.
pub static DEFAULT_POLICY: [AxisPolicy; 19] = [
    AxisPolicy {
        axis: Axis::TransportProtocol,
        directives: &["remote", "proto"],
        fallback: Fallback::Token("adaptive"),
        note: Some("mixed remote protocols resolve to adaptive"),
    },
    AxisPolicy {
        axis: Axis::Ipv6Preference,
        directives: &[],
        fallback: Fallback::Token("server_decides"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::CompressionMode,
        directives: &["compress", "comp-lzo"],
        fallback: Fallback::Token("disabled"),
        note: Some("profile requests to compress are suppressed; only an override enables it"),
    },
    AxisPolicy {
        axis: Axis::MinTlsVersion,
        directives: &["tls-version-min"],
        fallback: Fallback::Token("disabled"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::TlsCertProfile,
        directives: &["tls-cert-profile"],
        fallback: Fallback::Token("legacy"),
        note: Some("legacy_default and preferred_default apply only when the profile is silent"),
    },
    AxisPolicy {
        axis: Axis::Server,
        directives: &["remote"],
        fallback: Fallback::Absent,
        note: Some("host of the first remote"),
    },
    AxisPolicy {
        axis: Axis::ConnectionTimeout,
        directives: &[],
        fallback: Fallback::Token("0"),
        note: Some("0 retries forever"),
    },
    AxisPolicy {
        axis: Axis::TunPersist,
        directives: &["persist-tun"],
        fallback: Fallback::Token("false"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::GoogleDnsFallback,
        directives: &[],
        fallback: Fallback::Token("false"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::AutologinSessions,
        directives: &[],
        fallback: Fallback::Token("true"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::DisableClientCert,
        directives: &["setenv"],
        fallback: Fallback::Token("false"),
        note: Some("setenv CLIENT_CERT 0 disables the client certificate"),
    },
    AxisPolicy {
        axis: Axis::SslDebugLevel,
        directives: &[],
        fallback: Fallback::Token("0"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::PrivateKeyPassword,
        directives: &[],
        fallback: Fallback::Absent,
        note: None,
    },
    AxisPolicy {
        axis: Axis::KeyDirection,
        directives: &["key-direction"],
        fallback: Fallback::Token("-1"),
        note: Some("-1 is bidirectional"),
    },
    AxisPolicy {
        axis: Axis::ForceAesCbcCiphersuites,
        directives: &[],
        fallback: Fallback::Token("false"),
        note: Some("when enabled the TLS floor is disabled"),
    },
    AxisPolicy {
        axis: Axis::PeerInfo,
        directives: &[],
        fallback: Fallback::Empty,
        note: Some("builtin identity keys are always sent"),
    },
    AxisPolicy {
        axis: Axis::EchoPassthrough,
        directives: &[],
        fallback: Fallback::Token("false"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::InfoPassthrough,
        directives: &[],
        fallback: Fallback::Token("false"),
        note: None,
    },
    AxisPolicy {
        axis: Axis::GuiVersion,
        directives: &[],
        fallback: Fallback::ClientIdentity,
        note: Some("sent as IV_GUI_VER"),
    },
];

/// Looks up the policy row for `axis`.
#[must_use]
pub fn policy_for(axis: Axis) -> &'static AxisPolicy {
    // Rows are laid out in `Axis::ALL` order
    let idx = Axis::ALL.iter().position(|a| *a == axis).unwrap_or(0);
    &DEFAULT_POLICY[idx]
}

/// Fallback token for `axis`, or `None` for non-token fallbacks.
#[must_use]
pub fn fallback_token(axis: Axis) -> Option<&'static str> {
    match policy_for(axis).fallback {
        Fallback::Token(t) => Some(t),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_axis_in_order() {
        for (row, axis) in DEFAULT_POLICY.iter().zip(Axis::ALL) {
            assert_eq!(row.axis, axis);
        }
    }

    #[test]
    fn test_policy_for_lookup() {
        for axis in Axis::ALL {
            assert_eq!(policy_for(axis).axis, axis);
        }
    }

    #[test]
    fn test_fallback_tokens() {
        assert_eq!(fallback_token(Axis::TransportProtocol), Some("adaptive"));
        assert_eq!(fallback_token(Axis::KeyDirection), Some("-1"));
        assert_eq!(fallback_token(Axis::AutologinSessions), Some("true"));
        assert_eq!(fallback_token(Axis::Server), None);
    }

    #[test]
    fn test_table_serializes() {
        let json = serde_json::to_value(DEFAULT_POLICY).unwrap();
        assert_eq!(json[0]["axis"], "transport-protocol");
        assert_eq!(json[0]["fallback"]["kind"], "token");
        assert_eq!(json[5]["fallback"]["kind"], "absent");
    }
}
