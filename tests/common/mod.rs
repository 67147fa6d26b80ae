//! Shared integration-test harness for running the `ovpnconf` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for spawning `ovpnconf` as a child process.
pub struct OvpnConfProcess;

impl OvpnConfProcess {
    /// Runs the binary with `args` and waits for it to exit.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_with_env(args, &[])
    }

    /// Runs the binary with extra environment variables.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_ovpnconf");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .env_remove("OVPNCONF_LOG_LEVEL")
            .env_remove("OVPNCONF_GUI_VERSION")
            .env_remove("OVPNCONF_LOG_FORMAT")
            .env_remove("OVPNCONF_TEST_KEY_PASSWORD")
            .env("OVPNCONF_COLOR", "never");
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to spawn ovpnconf")
    }

    /// Absolute path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Runs `resolve --format json` on a fixture and parses stdout.
    #[allow(clippy::missing_panics_doc)]
    pub fn resolve_json(fixture: &str) -> serde_json::Value {
        let path = Self::fixture_path(fixture);
        let output =
            Self::spawn_command(&["resolve", "--format", "json", path.to_str().unwrap()]);
        assert!(
            output.status.success(),
            "resolve {fixture} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}
