//! In-process registry of live execution units.
//!
//! The registry is the host side of the inspector: a table of shell
//! command processes addressed by 1-based slots, plus two ordered
//! scheduler task sequences ("ready" and "waiting"). An embedding runtime
//! registers its units here; the standalone binary registers its own
//! invocation so the tool always observes at least itself.
//!
//! All mutation and all enumeration go through one mutex. `freeze()`
//! (see [`crate::guard`]) hands out the enumeration guard; while it is
//! held no entry can be created, destroyed, or relinked underneath a
//! walk. Mutators never block on anything but that lock, so the guarded
//! section stays bounded.

use crate::bstr::{self, RawName, NAME_CAPACITY};
use pv_common::{Slot, StackExtent, MAX_SLOT};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Scheduler state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Invalid,
    Added,
    Running,
    Ready,
    Waiting,
    Exception,
    Removed,
    Undefined,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskState::Invalid => "Invalid",
            TaskState::Added => "Added",
            TaskState::Running => "Running",
            TaskState::Ready => "Ready",
            TaskState::Waiting => "Waiting",
            TaskState::Exception => "Exception",
            TaskState::Removed => "Removed",
            TaskState::Undefined => "Undefined",
        };
        write!(f, "{}", s)
    }
}

/// Whether a task-list node is a bare task or a full process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Task,
    Process,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Task => write!(f, "Task"),
            TaskKind::Process => write!(f, "Process"),
        }
    }
}

/// One shell command process in the slot table.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    /// Raw command-name source; `None` models a null source.
    pub command_name: Option<RawName>,
    pub priority: i8,
    /// Global vector address, 0 if none.
    pub global_vector: u32,
    pub stack: StackExtent,
    pub fail_level: i32,
    pub return_code: i32,
    pub background: bool,
}

impl ProcessEntry {
    pub(crate) fn name_source(&self) -> Option<&[u8]> {
        self.command_name.as_ref().map(|raw| raw.as_raw())
    }
}

/// One scheduler task.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Tasks always carry a name.
    pub name: RawName,
    pub priority: i8,
    pub stack: StackExtent,
    pub state: TaskState,
}

/// Node in a task sequence.
///
/// Every process is also a task; a process node carries the slot linking
/// it back to the command table.
#[derive(Debug, Clone)]
pub enum TaskNode {
    Task(TaskEntry),
    Process { slot: Slot, task: TaskEntry },
}

impl TaskNode {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskNode::Task(_) => TaskKind::Task,
            TaskNode::Process { .. } => TaskKind::Process,
        }
    }

    pub fn task(&self) -> &TaskEntry {
        match self {
            TaskNode::Task(task) => task,
            TaskNode::Process { task, .. } => task,
        }
    }
}

/// Capability-based field access for anything a task row can be built
/// from, so the walk never switches on the node tag to read fields.
pub trait Inspectable {
    fn display_name(&self) -> String;
    fn stack(&self) -> StackExtent;
    fn state(&self) -> TaskState;
    fn priority(&self) -> i8;
}

impl Inspectable for TaskEntry {
    fn display_name(&self) -> String {
        // task names are never null; decoding cannot fail here
        bstr::decode(Some(self.name.as_raw()), NAME_CAPACITY)
            .map(|d| d.text)
            .unwrap_or_default()
    }

    fn stack(&self) -> StackExtent {
        self.stack
    }

    fn state(&self) -> TaskState {
        self.state
    }

    fn priority(&self) -> i8 {
        self.priority
    }
}

pub(crate) struct RegistryState {
    /// Slot table; index 0 holds slot 1. Freed slots stay in place as
    /// `None` so the table span behaves like the host's high-water mark.
    pub(crate) slots: Vec<Option<ProcessEntry>>,
    pub(crate) ready: Vec<TaskNode>,
    pub(crate) waiting: Vec<TaskNode>,
}

/// The process/task registry.
pub struct Registry {
    pub(crate) state: Mutex<RegistryState>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Registry {
        Registry {
            state: Mutex::new(RegistryState {
                slots: Vec::new(),
                ready: Vec::new(),
                waiting: Vec::new(),
            }),
        }
    }

    /// The process-wide registry an embedding application populates.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // a poisoned registry is still readable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a command process in the first free slot.
    ///
    /// Returns `None` when all 999 slots are live.
    pub fn register_process(&self, entry: ProcessEntry) -> Option<Slot> {
        let mut state = self.lock();
        if let Some(free) = state.slots.iter().position(Option::is_none) {
            state.slots[free] = Some(entry);
            return Slot::new(free as u16 + 1);
        }
        if state.slots.len() < MAX_SLOT as usize {
            state.slots.push(Some(entry));
            return Slot::new(state.slots.len() as u16);
        }
        None
    }

    /// Remove a command process, leaving its slot free for reuse.
    pub fn unregister_process(&self, slot: Slot) -> Option<ProcessEntry> {
        let mut state = self.lock();
        state
            .slots
            .get_mut(slot.get() as usize - 1)
            .and_then(Option::take)
    }

    /// Append a node to the ready sequence.
    pub fn enqueue_ready(&self, node: TaskNode) {
        self.lock().ready.push(node);
    }

    /// Append a node to the waiting sequence.
    pub fn enqueue_waiting(&self, node: TaskNode) {
        self.lock().waiting.push(node);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
