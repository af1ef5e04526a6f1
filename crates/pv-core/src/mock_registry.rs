//! Mock registry builders for testing.
//!
//! Builder-pattern factories for populating a [`Registry`] with known
//! processes and tasks. All fields have sensible defaults, so a test only
//! sets what it asserts on.
//!
//! # Example
//!
//! ```ignore
//! use pv_core::mock_registry::{MockProcess, MockTask, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .process_at(7, MockProcess::new("Editor").background().build())
//!     .ready(MockTask::new("input.device").build_node())
//!     .build();
//! ```

use crate::bstr::RawName;
use crate::registry::{ProcessEntry, Registry, TaskEntry, TaskNode, TaskState};
use pv_common::{Slot, StackExtent};

/// Builder for a mock [`ProcessEntry`].
#[derive(Debug, Clone)]
pub struct MockProcess {
    command_name: Option<RawName>,
    priority: i8,
    global_vector: u32,
    stack: StackExtent,
    fail_level: i32,
    return_code: i32,
    background: bool,
}

impl MockProcess {
    pub fn new(name: &str) -> MockProcess {
        MockProcess {
            command_name: Some(RawName::new(name)),
            priority: 0,
            global_vector: 0,
            stack: StackExtent::new(2048, 8192),
            fail_level: 10,
            return_code: 0,
            background: false,
        }
    }

    /// Model a null name source.
    pub fn null_name(mut self) -> MockProcess {
        self.command_name = None;
        self
    }

    pub fn priority(mut self, priority: i8) -> MockProcess {
        self.priority = priority;
        self
    }

    pub fn global_vector(mut self, address: u32) -> MockProcess {
        self.global_vector = address;
        self
    }

    pub fn stack(mut self, used: u64, total: u64) -> MockProcess {
        self.stack = StackExtent::new(used, total);
        self
    }

    pub fn fail_level(mut self, level: i32) -> MockProcess {
        self.fail_level = level;
        self
    }

    pub fn return_code(mut self, code: i32) -> MockProcess {
        self.return_code = code;
        self
    }

    pub fn background(mut self) -> MockProcess {
        self.background = true;
        self
    }

    pub fn build(self) -> ProcessEntry {
        ProcessEntry {
            command_name: self.command_name,
            priority: self.priority,
            global_vector: self.global_vector,
            stack: self.stack,
            fail_level: self.fail_level,
            return_code: self.return_code,
            background: self.background,
        }
    }
}

/// Builder for a mock [`TaskEntry`].
#[derive(Debug, Clone)]
pub struct MockTask {
    name: String,
    priority: i8,
    stack: StackExtent,
    state: TaskState,
}

impl MockTask {
    pub fn new(name: &str) -> MockTask {
        MockTask {
            name: name.to_string(),
            priority: 0,
            stack: StackExtent::new(256, 4096),
            state: TaskState::Ready,
        }
    }

    pub fn priority(mut self, priority: i8) -> MockTask {
        self.priority = priority;
        self
    }

    pub fn stack(mut self, used: u64, total: u64) -> MockTask {
        self.stack = StackExtent::new(used, total);
        self
    }

    pub fn state(mut self, state: TaskState) -> MockTask {
        self.state = state;
        self
    }

    pub fn build(self) -> TaskEntry {
        TaskEntry {
            name: RawName::new(&self.name),
            priority: self.priority,
            stack: self.stack,
            state: self.state,
        }
    }

    pub fn build_node(self) -> TaskNode {
        TaskNode::Task(self.build())
    }
}

/// Builder for a populated [`Registry`].
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> RegistryBuilder {
        RegistryBuilder {
            registry: Registry::new(),
        }
    }

    /// Register a process in the first free slot.
    pub fn process(self, entry: ProcessEntry) -> RegistryBuilder {
        self.registry.register_process(entry);
        self
    }

    /// Install a process at an exact slot, leaving gaps empty.
    pub fn process_at(self, slot: u16, entry: ProcessEntry) -> RegistryBuilder {
        let slot = Slot::new(slot).expect("mock slot out of range");
        {
            let mut state = self.registry.lock();
            let index = slot.get() as usize - 1;
            if state.slots.len() <= index {
                state.slots.resize_with(index + 1, || None);
            }
            state.slots[index] = Some(entry);
        }
        self
    }

    pub fn ready(self, node: TaskNode) -> RegistryBuilder {
        self.registry.enqueue_ready(node);
        self
    }

    pub fn waiting(self, node: TaskNode) -> RegistryBuilder {
        self.registry.enqueue_waiting(node);
        self
    }

    /// Append a process-backed node to the ready sequence.
    pub fn ready_process(self, slot: u16, task: TaskEntry) -> RegistryBuilder {
        let slot = Slot::new(slot).expect("mock slot out of range");
        self.registry.enqueue_ready(TaskNode::Process { slot, task });
        self
    }

    /// Append a process-backed node to the waiting sequence.
    pub fn waiting_process(self, slot: u16, task: TaskEntry) -> RegistryBuilder {
        let slot = Slot::new(slot).expect("mock slot out of range");
        self.registry.enqueue_waiting(TaskNode::Process { slot, task });
        self
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        RegistryBuilder::new()
    }
}
