//! Scoped exclusion and priority handling for the snapshot pass.
//!
//! `SnapshotGuard` freezes the registry for the duration of one
//! enumeration: while it is alive, every mutator blocks, so no entry can
//! appear, vanish, or be relinked under the walk. Release happens on
//! every exit path, including early abort and cancellation, because the
//! guard is just an RAII lock handle. Code running under the guard must
//! stay bounded: no output I/O, nothing that waits on other work.
//!
//! `PriorityBoost` covers the window *around* the guard: the caller
//! raises its own scheduling priority for the whole inspection to shrink
//! (not eliminate) the chance that an in-scope entry disappears before
//! the freeze is taken, and restores the previous value unconditionally
//! on drop. The boost is advisory; running unprivileged it simply does
//! not apply.

use crate::registry::{ProcessEntry, Registry, RegistryState, TaskNode};
use pv_common::{Slot, MAX_SLOT};
use std::sync::MutexGuard;
use tracing::debug;

/// Exclusive, read-only view of the registry for one enumeration pass.
pub struct SnapshotGuard<'a> {
    state: MutexGuard<'a, RegistryState>,
}

impl Registry {
    /// Freeze the registry for enumeration.
    pub fn freeze(&self) -> SnapshotGuard<'_> {
        SnapshotGuard { state: self.lock() }
    }
}

impl SnapshotGuard<'_> {
    /// Current span of the slot table (the high-water slot number).
    pub fn max_slot(&self) -> u16 {
        (self.state.slots.len() as u16).min(MAX_SLOT)
    }

    /// Look up a live command process by slot.
    pub fn find_process(&self, slot: Slot) -> Option<&ProcessEntry> {
        self.state.slots.get(slot.get() as usize - 1)?.as_ref()
    }

    /// The ready task sequence, in list order.
    pub fn ready(&self) -> &[TaskNode] {
        &self.state.ready
    }

    /// The waiting task sequence, in list order.
    pub fn waiting(&self) -> &[TaskNode] {
        &self.state.waiting
    }
}

/// Scoped raise of the calling process's scheduling priority.
///
/// Saves the current nice value, steps it one level up, and restores the
/// saved value on drop. Inert when disabled or when the host refuses the
/// change.
pub struct PriorityBoost {
    previous: i32,
    applied: bool,
}

impl PriorityBoost {
    pub fn apply(enabled: bool) -> PriorityBoost {
        if !enabled {
            return PriorityBoost {
                previous: 0,
                applied: false,
            };
        }
        Self::raise()
    }

    #[cfg(unix)]
    fn raise() -> PriorityBoost {
        // getpriority(self) cannot fail for the calling process; -1 is a
        // real nice value, not an error here
        let previous = unsafe { libc::getpriority(libc::PRIO_PROCESS, 0) };
        let target = (previous - 1).max(-20);
        if target == previous {
            return PriorityBoost {
                previous,
                applied: false,
            };
        }

        let rc = unsafe { libc::setpriority(libc::PRIO_PROCESS, 0, target) };
        if rc != 0 {
            debug!(previous, target, "priority boost refused; continuing unboosted");
            return PriorityBoost {
                previous,
                applied: false,
            };
        }

        debug!(previous, target, "priority boosted for inspection");
        PriorityBoost {
            previous,
            applied: true,
        }
    }

    #[cfg(not(unix))]
    fn raise() -> PriorityBoost {
        PriorityBoost {
            previous: 0,
            applied: false,
        }
    }

    /// Whether the boost actually took effect.
    pub fn is_applied(&self) -> bool {
        self.applied
    }
}

impl Drop for PriorityBoost {
    fn drop(&mut self) {
        if self.applied {
            #[cfg(unix)]
            unsafe {
                libc::setpriority(libc::PRIO_PROCESS, 0, self.previous);
            }
            debug!(restored = self.previous, "priority restored");
        }
    }
}
