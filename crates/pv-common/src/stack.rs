//! Stack extent of an execution unit.

use serde::{Deserialize, Serialize};

/// Used and total stack size of a process or task, in bytes.
///
/// The constructor enforces `used <= total`; a used figure larger than the
/// total (a torn read on a unit mid-teardown) is clamped to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackExtent {
    used: u64,
    total: u64,
}

impl StackExtent {
    pub fn new(used: u64, total: u64) -> StackExtent {
        StackExtent {
            used: used.min(total),
            total,
        }
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
