//! Fuzz target for wire type resolution.
//!
//! Resolution must never panic, and a string must always resolve to the same
//! rule. Exact names always resolve to their own rule.

#![no_main]

use libfuzzer_sys::fuzz_target;
use dbframe_core::default_registry;

fuzz_target!(|data: &[u8]| {
    let Ok(type_name) = std::str::from_utf8(data) else {
        return;
    };

    let registry = default_registry();
    let first = registry.resolve(type_name).map(|r| r.name());
    let second = registry.resolve(type_name).map(|r| r.name());
    assert_eq!(first, second);

    if let Some(rule) = registry.get(type_name) {
        assert_eq!(first, Some(rule.name()));
    }
});
