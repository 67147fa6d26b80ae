#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use ovpnconf::config::{RequestLoader, ResolverOptions, resolve_configuration};

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        let loader = RequestLoader::with_defaults();

        // Any outcome is fine as long as nothing panics
        if let Ok(loaded) = loader.load_str(yaml_str, Path::new("fuzz.yaml")) {
            let request = loaded.request;
            let _ = resolve_configuration(
                &request.overrides,
                &request.directives(),
                &ResolverOptions::default(),
            );
        }
    }
});
