//! Resolver options and resource limits.

/// Options controlling a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Client identity used when the override set names none.
    pub builtin_gui_version: String,

    /// Size limits.
    pub limits: ResolverLimits,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            builtin_gui_version: default_gui_version(),
            limits: ResolverLimits::default(),
        }
    }
}

impl ResolverOptions {
    /// Replaces the builtin client identity.
    #[must_use]
    pub fn with_gui_version(mut self, gui_version: impl Into<String>) -> Self {
        self.builtin_gui_version = gui_version.into();
        self
    }

    /// Replaces the limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ResolverLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Limits that keep resolution input bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverLimits {
    /// Maximum number of caller peer-info entries.
    pub max_peer_info_entries: usize,

    /// Maximum request file size in bytes.
    pub max_request_size: usize,
}

impl Default for ResolverLimits {
    fn default() -> Self {
        Self {
            max_peer_info_entries: env_or("OVPNCONF_MAX_PEER_INFO_ENTRIES", 64),
            max_request_size: env_or("OVPNCONF_MAX_REQUEST_SIZE", 1024 * 1024),
        }
    }
}

/// `ovpnconf <crate version>`
#[must_use]
pub fn default_gui_version() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gui_version_format() {
        let v = default_gui_version();
        let (name, version) = v.split_once(' ').unwrap();
        assert_eq!(name, "ovpnconf");
        assert!(!version.is_empty());
    }

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(env_or("OVPNCONF_TEST_UNSET_VARIABLE", 7usize), 7);
    }

    #[test]
    fn test_builder_methods() {
        let limits = ResolverLimits {
            max_peer_info_entries: 2,
            max_request_size: 128,
        };
        let opts = ResolverOptions::default()
            .with_gui_version("acme 9.9")
            .with_limits(limits);
        assert_eq!(opts.builtin_gui_version, "acme 9.9");
        assert_eq!(opts.limits.max_peer_info_entries, 2);
    }
}
