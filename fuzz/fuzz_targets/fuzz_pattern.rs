//! Fuzz target for search-pattern classification and matching.
//!
//! Arbitrary terms must classify without panicking, and matching a
//! compiled term against arbitrary names must terminate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pv_core::pattern;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut parts = text.splitn(2, '\n');
    let term = parts.next().unwrap_or("");
    let name = parts.next().unwrap_or("");

    // keep inputs near the CLI bound so the translation-buffer check is
    // the only rejection path exercised here
    let term: String = term.chars().take(200).collect();
    let name: String = name.chars().take(200).collect();

    if let Ok(classified) = pattern::classify(&term) {
        let _ = pattern::matches(&name, &classified);
    }
});
