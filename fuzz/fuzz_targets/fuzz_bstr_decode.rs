//! Fuzz target for the length-prefixed name decoder.
//!
//! Decoding must never panic or over-read, whatever the count byte
//! claims and whatever capacity the caller passes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pv_core::bstr;

fuzz_target!(|data: &[u8]| {
    let Some((cap, raw)) = data.split_first() else {
        return;
    };
    if let Ok(decoded) = bstr::decode(Some(raw), *cap as usize) {
        assert!(decoded.len <= (*cap as usize).saturating_sub(1));
    }
});
