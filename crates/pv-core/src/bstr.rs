//! Length-prefixed command-name codec.
//!
//! The host registry stores command names in a length-prefixed
//! representation: the first byte is a count `L` (0-255) followed by `L`
//! content bytes, with no terminator. This module is the only place that
//! understands that layout; everything else works with decoded strings.
//!
//! Decoding is truncation-safe: at most `capacity - 1` content bytes are
//! copied, and an oversized source is silently shortened to fit the display
//! column rather than treated as an error. A null source (the registry
//! entry never had a name attached) is an error the caller recovers from
//! with a placeholder.

use pv_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Decode buffer capacity used for command names throughout the walk.
///
/// Decoded text is at most `NAME_CAPACITY - 1` bytes.
pub const NAME_CAPACITY: usize = 128;

/// Result of decoding a raw length-prefixed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    /// Decoded text, lossy-converted to UTF-8.
    pub text: String,

    /// Number of content bytes copied.
    pub len: usize,

    /// Whether the source was longer than the copy.
    pub truncated: bool,
}

/// Length of a raw name source.
///
/// Returns `-1` for a null source, else the count byte `L`. A count of 0
/// means "no command name set", which is distinct from a null source.
pub fn length(source: Option<&[u8]>) -> i32 {
    match source {
        None => -1,
        Some(raw) => raw.first().map(|l| *l as i32).unwrap_or(0),
    }
}

/// Decode a raw length-prefixed name into a bounded string.
///
/// Copies at most `min(L, capacity - 1)` content bytes. A source slice
/// shorter than its own count is clamped to the bytes actually present.
pub fn decode(source: Option<&[u8]>, capacity: usize) -> Result<Decoded> {
    let raw = source.ok_or(Error::NullSource)?;

    let count = raw.first().map(|l| *l as usize).unwrap_or(0);
    let available = count.min(raw.len().saturating_sub(1));
    let copy = available.min(capacity.saturating_sub(1));

    Ok(Decoded {
        text: String::from_utf8_lossy(&raw[1..1 + copy]).into_owned(),
        len: copy,
        truncated: copy < count,
    })
}

/// Owned raw length-prefixed name, the registry's storage form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawName(Box<[u8]>);

impl RawName {
    /// Encode a string, truncating the content to 255 bytes.
    pub fn new(name: &str) -> RawName {
        let content = &name.as_bytes()[..name.len().min(255)];
        let mut buf = Vec::with_capacity(content.len() + 1);
        buf.push(content.len() as u8);
        buf.extend_from_slice(content);
        RawName(buf.into_boxed_slice())
    }

    /// The raw length-prefixed bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.0
    }

    /// Whether the encoded count is zero.
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_length_of_null_source() {
        assert_eq!(length(None), -1);
    }

    #[test]
    fn test_length_reads_count_byte() {
        let raw = RawName::new("Editor");
        assert_eq!(length(Some(raw.as_raw())), 6);
        assert_eq!(length(Some(RawName::new("").as_raw())), 0);
    }

    #[test]
    fn test_decode_null_source_is_error() {
        assert!(matches!(decode(None, NAME_CAPACITY), Err(Error::NullSource)));
    }

    #[test]
    fn test_decode_round() {
        let raw = RawName::new("Editor");
        let d = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
        assert_eq!(d.text, "Editor");
        assert_eq!(d.len, 6);
        assert!(!d.truncated);
    }

    #[test]
    fn test_decode_zero_count_is_empty_not_error() {
        let raw = RawName::new("");
        let d = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
        assert_eq!(d.text, "");
        assert_eq!(d.len, 0);
        assert!(!d.truncated);
    }

    #[test]
    fn test_decode_truncates_to_capacity() {
        let long = "x".repeat(200);
        let raw = RawName::new(&long);
        let d = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
        assert_eq!(d.len, NAME_CAPACITY - 1);
        assert_eq!(d.text.len(), NAME_CAPACITY - 1);
        assert!(d.truncated);
    }

    #[test]
    fn test_decode_clamps_short_source() {
        // count byte claims 10 content bytes, only 3 present
        let raw = [10u8, b'a', b'b', b'c'];
        let d = decode(Some(&raw), NAME_CAPACITY).unwrap();
        assert_eq!(d.text, "abc");
        assert_eq!(d.len, 3);
        assert!(d.truncated);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = RawName::new("Shell:");
        let a = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
        let b = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_truncates_content_to_255() {
        let raw = RawName::new(&"y".repeat(400));
        assert_eq!(raw.as_raw()[0], 255);
        assert_eq!(raw.as_raw().len(), 256);
    }

    proptest! {
        #[test]
        fn prop_decode_never_overflows(raw in proptest::collection::vec(any::<u8>(), 0..600), cap in 1usize..300) {
            let d = decode(Some(&raw), cap).unwrap();
            prop_assert!(d.len <= cap - 1);
            let count = raw.first().copied().unwrap_or(0) as usize;
            prop_assert!(d.len <= count);
            prop_assert_eq!(d.truncated, d.len < count);
        }

        #[test]
        fn prop_encode_decode_identity(name in "[ -~]{0,120}") {
            let raw = RawName::new(&name);
            let d = decode(Some(raw.as_raw()), NAME_CAPACITY).unwrap();
            prop_assert_eq!(d.text, name);
            prop_assert!(!d.truncated);
        }
    }
}
