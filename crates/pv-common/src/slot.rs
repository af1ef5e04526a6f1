//! Registry slot numbers.
//!
//! A slot is the 1-based index addressing a shell/command process in the
//! process registry. Slots are unique at snapshot time but not stable
//! across time; the registry reuses freed slots.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest addressable registry slot.
///
/// The process-number column is three digits wide, so the registry span is
/// capped at 999 regardless of how many entries the host could hold.
pub const MAX_SLOT: u16 = 999;

/// Validated 1-based registry slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(u16);

impl Slot {
    /// Create a slot from an in-range index, or `None` outside 1..=999.
    pub fn new(n: u16) -> Option<Slot> {
        (1..=MAX_SLOT).contains(&n).then_some(Slot(n))
    }

    /// Validate a user-supplied process number.
    pub fn validate(n: i64) -> Result<Slot> {
        u16::try_from(n)
            .ok()
            .and_then(Slot::new)
            .ok_or(Error::InvalidProcessNumber { given: n })
    }

    /// The underlying 1-based index.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert!(Slot::new(0).is_none());
        assert!(Slot::new(1).is_some());
        assert!(Slot::new(999).is_some());
        assert!(Slot::new(1000).is_none());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(matches!(
            Slot::validate(0),
            Err(Error::InvalidProcessNumber { given: 0 })
        ));
        assert!(matches!(
            Slot::validate(1000),
            Err(Error::InvalidProcessNumber { given: 1000 })
        ));
        assert!(matches!(
            Slot::validate(-3),
            Err(Error::InvalidProcessNumber { given: -3 })
        ));
        assert_eq!(Slot::validate(7).unwrap().get(), 7);
    }

    #[test]
    fn test_serde_transparent() {
        let slot = Slot::new(42).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "42");
    }
}
