#![no_main]

use libfuzzer_sys::fuzz_target;
use ovpnconf::config::{Overrides, ProfileDirectives, ResolverOptions, resolve_configuration};

fuzz_target!(|data: &[u8]| {
    // JSON object with optional "overrides" and "profile" members
    if let Ok(json_value) = serde_json::from_slice::<serde_json::Value>(data) {
        let overrides: Overrides = json_value
            .get("overrides")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let profile: ProfileDirectives = json_value
            .get("profile")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let _ = resolve_configuration(&overrides, &profile, &ResolverOptions::default());
    }
});
