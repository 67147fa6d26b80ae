//! Request file loading.
//!
//! A request file is a YAML document naming the profile directives, an
//! optional settings map appended after them, and the override set:
//!
//! ```yaml
//! profile:
//!   remote: vpn.example.com 1194 udp
//!   tls-version-min: "1.2"
//! settings:
//!   persist-tun:
//! overrides:
//!   tls_cert_profile: preferred
//!   private_key_password: ${VPN_KEY_PASSWORD:?key password required}
//! ```
//!
//! Environment references are expanded inside string values after parsing,
//! so a substituted value always stays one string. Fields that take numbers
//! or booleans need literal values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::value::{Mapping, TaggedValue, Value};

use crate::config::directives::ProfileDirectives;
use crate::config::options::ResolverLimits;
use crate::config::schema::Overrides;
use crate::error::ConfigError;

/// A parsed request file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestFile {
    /// Profile directives in profile order
    pub profile: ProfileDirectives,

    /// Extra directives appended after the profile
    pub settings: ProfileDirectives,

    /// Caller overrides
    pub overrides: Overrides,
}

impl RequestFile {
    /// Profile directives followed by the settings map.
    #[must_use]
    pub fn directives(&self) -> ProfileDirectives {
        let mut out = self.profile.clone();
        out.append(&self.settings);
        out
    }
}

/// Non-fatal finding raised while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Description of the finding
    pub message: String,
    /// File the finding refers to
    pub location: Option<String>,
}

/// Result of loading a request file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed request
    pub request: RequestFile,
    /// Warnings raised while loading
    pub warnings: Vec<LoadWarning>,
}

/// Loads request files from disk.
#[derive(Debug, Clone)]
pub struct RequestLoader {
    limits: ResolverLimits,
}

impl RequestLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: ResolverLimits) -> Self {
        Self { limits }
    }

    /// Creates a loader with limits read from the environment.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ResolverLimits::default())
    }

    /// Reads, substitutes and parses a request file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, too large, references a
    /// required environment variable that is unset, or fails to parse.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        self.check_size(file_size)?;

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: e.to_string(),
        })?;
        self.load_str(&raw, path)
    }

    /// Parses request text as if it were read from `path`.
    ///
    /// # Errors
    ///
    /// Same as [`RequestLoader::load`], minus the file system checks.
    pub fn load_str(&self, raw: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        self.check_size(raw.len())?;

        // Handle UTF-8 BOM
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let document: Value = serde_yaml::from_str(raw).map_err(|e| parse_error(path, &e))?;
        if document.is_null() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "request file is empty".to_string(),
            });
        }

        let mut env_sub = EnvSubstitution::new(path);
        let document = env_sub.expand(document)?;

        let request: RequestFile =
            serde_yaml::from_value(document).map_err(|e| parse_error(path, &e))?;

        tracing::debug!(
            path = %path.display(),
            directives = request.profile.len() + request.settings.len(),
            "request loaded"
        );

        Ok(LoadResult {
            request,
            warnings: env_sub.warnings,
        })
    }

    fn check_size(&self, size: usize) -> Result<(), ConfigError> {
        if size > self.limits.max_request_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{size} bytes"),
                expected: format!("at most {} bytes", self.limits.max_request_size),
            });
        }
        Ok(())
    }
}

fn parse_error(path: &Path, e: &serde_yaml::Error) -> ConfigError {
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Environment variable substitution over parsed string scalars.
///
/// Supports `${VAR}`, `${VAR:-default}`, `${VAR:?message}` and `$$`.
struct EnvSubstitution {
    path: PathBuf,
    warnings: Vec<LoadWarning>,
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

impl EnvSubstitution {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            warnings: Vec::new(),
        }
    }

    /// Expands references inside every string scalar of `value`.
    ///
    /// Substituted text stays a single string; it is never parsed as YAML.
    fn expand(&mut self, value: Value) -> Result<Value, ConfigError> {
        Ok(match value {
            Value::String(s) => Value::String(self.substitute(&s)?),
            Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| self.expand(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key, self.expand(item)?);
                }
                Value::Mapping(out)
            }
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Value::Tagged(Box::new(TaggedValue {
                    tag,
                    value: self.expand(value)?,
                }))
            }
            other => other,
        })
    }

    fn substitute(&mut self, raw: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = self.parse_var_spec(&mut chars)?;
                    match lookup_var(&spec.name) {
                        Some(value) => result.push_str(&value),
                        None => match spec.fallback {
                            Fallback::Default(value) => result.push_str(&value),
                            Fallback::Required(message) => {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: spec.name,
                                    location: message,
                                });
                            }
                            Fallback::Empty => self.warnings.push(LoadWarning {
                                message: format!(
                                    "environment variable '{}' is not set, using empty string",
                                    spec.name
                                ),
                                location: Some(self.path.display().to_string()),
                            }),
                        },
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    fn parse_var_spec(&self, chars: &mut Chars<'_>) -> Result<VarSpec, ConfigError> {
        let mut name = String::new();

        while let Some(&c) = chars.peek() {
            chars.next();
            match c {
                '}' => {
                    return Ok(VarSpec {
                        name,
                        fallback: Fallback::Empty,
                    });
                }
                ':' => match chars.peek() {
                    Some('-') => {
                        chars.next();
                        let value = self.read_until_close(chars)?;
                        return Ok(VarSpec {
                            name,
                            fallback: Fallback::Default(value),
                        });
                    }
                    Some('?') => {
                        chars.next();
                        let message = self.read_until_close(chars)?;
                        return Ok(VarSpec {
                            name,
                            fallback: Fallback::Required(message),
                        });
                    }
                    _ => name.push(':'),
                },
                _ => name.push(c),
            }
        }

        Err(self.unclosed(&name))
    }

    /// Reads up to the matching `}`, allowing nested braces.
    fn read_until_close(&self, chars: &mut Chars<'_>) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1usize;

        for c in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                }
                _ => {}
            }
            value.push(c);
        }

        Err(self.unclosed(&value))
    }

    fn unclosed(&self, fragment: &str) -> ConfigError {
        ConfigError::ParseError {
            path: self.path.clone(),
            line: None,
            message: format!("unclosed environment variable reference: ${{{fragment}"),
        }
    }
}

/// Reads an environment variable, treating names the OS cannot hold as unset.
fn lookup_var(name: &str) -> Option<String> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return None;
    }
    std::env::var(name).ok()
}

struct VarSpec {
    name: String,
    fallback: Fallback,
}

enum Fallback {
    Empty,
    Default(String),
    Required(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::directives::DirectiveLookup;
    use crate::config::schema::{Secret, TransportOverride};

    fn sub(raw: &str) -> (Result<String, ConfigError>, Vec<LoadWarning>) {
        let mut s = EnvSubstitution::new(Path::new("request.yaml"));
        let out = s.substitute(raw);
        (out, s.warnings)
    }

    fn loader() -> RequestLoader {
        RequestLoader::new(ResolverLimits {
            max_peer_info_entries: 64,
            max_request_size: 4096,
        })
    }

    #[test]
    fn test_env_substitution_simple() {
        let (out, _) = sub("path: ${PATH}");
        let out = out.unwrap();
        assert!(!out.contains("${PATH}"));
        assert!(out.len() > "path: ".len());
    }

    #[test]
    fn test_env_substitution_default() {
        let (out, _) = sub("value: ${OVPNCONF_TEST_NONEXISTENT_VAR_XYZ123:-udp}");
        assert_eq!(out.unwrap(), "value: udp");
    }

    #[test]
    fn test_env_substitution_nested_braces_in_default() {
        let (out, _) = sub("value: ${OVPNCONF_TEST_NONEXISTENT_VAR_XYZ123:-{a}}");
        assert_eq!(out.unwrap(), "value: {a}");
    }

    #[test]
    fn test_env_substitution_required_missing() {
        let (out, _) = sub("value: ${OVPNCONF_TEST_REQUIRED_XYZ123:?must be set}");
        match out {
            Err(ConfigError::EnvVarNotSet { var, location }) => {
                assert_eq!(var, "OVPNCONF_TEST_REQUIRED_XYZ123");
                assert_eq!(location, "must be set");
            }
            other => panic!("expected EnvVarNotSet, got {other:?}"),
        }
    }

    #[test]
    fn test_env_substitution_escaped_dollar() {
        let (out, _) = sub("price: $$100");
        assert_eq!(out.unwrap(), "price: $100");
    }

    #[test]
    fn test_env_substitution_missing_warning() {
        let (out, warnings) = sub("value: ${OVPNCONF_TEST_WARN_XYZ123}");
        assert_eq!(out.unwrap(), "value: ");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("OVPNCONF_TEST_WARN_XYZ123"));
    }

    #[test]
    fn test_env_substitution_unclosed() {
        let (out, _) = sub("value: ${OVPNCONF_UNCLOSED");
        assert!(matches!(out, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_str_full_request() {
        let yaml = concat!(
            "\u{feff}profile:\n  remote: vpn.example.com 1194 udp\n",
            "settings:\n  persist-tun:\noverrides:\n  proto: tcp\n",
        );
        let loaded = loader().load_str(yaml, Path::new("r.yaml")).unwrap();
        let directives = loaded.request.directives();
        assert_eq!(directives.last("remote"), Some("vpn.example.com 1194 udp"));
        assert!(directives.contains("persist-tun"));
        assert_eq!(loaded.request.overrides.proto, TransportOverride::Tcp);
    }

    #[test]
    fn test_substituted_hash_is_not_a_comment() {
        let yaml = "overrides:\n  gui_version: \"${OVPNCONF_TEST_UNSET_XYZ123:-hunter #2}\"\n";
        let loaded = loader().load_str(yaml, Path::new("r.yaml")).unwrap();
        assert_eq!(
            loaded.request.overrides.gui_version.as_deref(),
            Some("hunter #2")
        );
    }

    #[test]
    fn test_substituted_newline_stays_in_scalar() {
        let yaml = concat!(
            "overrides:\n",
            "  private_key_password: ",
            "\"${OVPNCONF_TEST_UNSET_XYZ123:-pw\\n  force_aes_cbc_ciphersuites: true}\"\n",
        );
        let loaded = loader().load_str(yaml, Path::new("r.yaml")).unwrap();
        let overrides = &loaded.request.overrides;
        assert_eq!(overrides.force_aes_cbc_ciphersuites, None);
        assert_eq!(
            overrides.private_key_password.as_ref().map(Secret::expose),
            Some("pw\n  force_aes_cbc_ciphersuites: true")
        );
    }

    #[test]
    fn test_expand_leaves_keys_and_scalars() {
        let mut env_sub = EnvSubstitution::new(Path::new("r.yaml"));
        let doc: Value = serde_yaml::from_str(concat!(
            "${OVPNCONF_TEST_UNSET_XYZ123:-k}: 1\n",
            "list: [\"${OVPNCONF_TEST_UNSET_XYZ123:-a}\", true]\n",
        ))
        .unwrap();
        let out = env_sub.expand(doc).unwrap();
        let map = out.as_mapping().unwrap();
        assert_eq!(
            map.get("${OVPNCONF_TEST_UNSET_XYZ123:-k}").and_then(Value::as_u64),
            Some(1)
        );
        let list = map.get("list").and_then(Value::as_sequence).unwrap();
        assert_eq!(list[0].as_str(), Some("a"));
        assert_eq!(list[1].as_bool(), Some(true));
    }

    #[test]
    fn test_load_str_rejects_unknown_top_level() {
        let err = loader()
            .load_str("profiles: {}\n", Path::new("r.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "{err:?}");
        assert!(err.to_string().contains("profiles"));
    }

    #[test]
    fn test_load_str_empty() {
        let err = loader().load_str("   \n", Path::new("r.yaml")).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_size_limit() {
        let big = "#".repeat(5000);
        let err = loader().load_str(&big, Path::new("r.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = loader()
            .load(Path::new("/nonexistent/ovpnconf/request.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.yaml");
        std::fs::write(&path, "overrides:\n  key_direction: 0\n").unwrap();
        let loaded = loader().load(&path).unwrap();
        assert_eq!(loaded.request.overrides.key_direction, Some(0));
        assert!(loaded.request.profile.is_empty());
    }
}
