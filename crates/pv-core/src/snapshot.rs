//! Snapshot records and the guarded enumeration walk.
//!
//! `capture` produces one immutable [`Snapshot`] per invocation: it
//! freezes the registry, visits the selected entries, decodes names, and
//! returns the rows. Rendering happens elsewhere, after the guard is
//! gone; nothing in this module writes output.
//!
//! Local conditions stay local. A slot with no live entry is only worth a
//! row when that exact slot was requested; a command name that cannot be
//! decoded becomes a placeholder; a task node whose slot link went stale
//! becomes a condition row. None of these stop the walk or reach the exit
//! code. Only a bad search pattern aborts, before the guard is taken.

use crate::bstr::{self, NAME_CAPACITY};
use crate::guard::SnapshotGuard;
use crate::pattern::{self, Classified};
use crate::registry::{Inspectable, Registry, TaskKind, TaskNode, TaskState};
use crate::view::{Format, Mode, SlotRange, ViewSpec};
use pv_common::{Result, Slot, StackExtent};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, span, Level};

/// Decoded command name of a process record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    /// A command is loaded in this slot.
    Loaded(String),
    /// The name source is present but holds nothing.
    NotLoaded,
    /// The name source was null; placeholder per the recovery policy.
    Unreadable,
}

impl CommandName {
    pub fn as_loaded(&self) -> Option<&str> {
        match self {
            CommandName::Loaded(name) => Some(name),
            _ => None,
        }
    }
}

/// One live shell/command process.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRecord {
    pub slot: Slot,
    pub command_name: CommandName,
    pub priority: i8,
    pub global_vector: u32,
    pub stack: StackExtent,
    pub fail_level: i32,
    pub return_code: i32,
    pub background: bool,
}

/// One live scheduler task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Sequential walk counter, 1-based; a distinct numbering scheme from
    /// the process registry slot.
    pub index: u32,
    pub name: String,
    pub kind: TaskKind,
    /// Present only for registry-backed processes.
    pub cli_slot: Option<Slot>,
    pub state: TaskState,
    pub priority: i8,
    pub stack: StackExtent,
}

/// One presentable line of a snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Row {
    Process(ProcessRecord),
    Task(TaskRecord),
    /// A specifically requested slot had no live entry.
    NoSuchProcess(Slot),
    /// A task node's slot link no longer resolves to a live process.
    Unresolved { index: u32, slot: Slot },
}

/// How the walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOutcome {
    Complete,
    /// Stopped early by the cancel signal; rows already produced stand.
    Cancelled,
    /// Search found this slot.
    Matched(Slot),
    /// Search exhausted the registry without a hit.
    NoMatch,
}

/// Ordered result of one guarded enumeration pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub rows: Vec<Row>,
    pub outcome: WalkOutcome,
}

/// Cooperative cancellation, checked once per emitted entry.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

/// Shared cancellation flag, set from a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl CancelSignal for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Take one snapshot of the registry under the enumeration guard.
///
/// Fails only on an uncompilable search pattern; that is checked before
/// the guard is taken so the critical section never aborts.
pub fn capture(
    registry: &Registry,
    spec: &ViewSpec,
    cancel: &dyn CancelSignal,
) -> Result<Snapshot> {
    let _span = span!(Level::DEBUG, "capture").entered();

    let classified = match spec.format {
        Format::Search => Some(pattern::classify(spec.pattern.as_deref().unwrap_or(""))?),
        _ => None,
    };

    let guard = registry.freeze();

    let snapshot = if let Some(classified) = &classified {
        search_slots(&guard, classified, cancel)
    } else {
        let mut rows = Vec::new();
        let cancelled = match spec.mode {
            Mode::ShellOnly => walk_slots(&guard, spec.range, cancel, &mut rows),
            Mode::SystemOnly => walk_tasks(&guard, cancel, &mut rows),
            Mode::All => {
                walk_slots(&guard, spec.range, cancel, &mut rows)
                    || walk_tasks(&guard, cancel, &mut rows)
            }
        };
        Snapshot {
            rows,
            outcome: if cancelled {
                WalkOutcome::Cancelled
            } else {
                WalkOutcome::Complete
            },
        }
    };

    debug!(rows = snapshot.rows.len(), outcome = ?snapshot.outcome, "snapshot taken");
    Ok(snapshot)
}

/// Walk the slot table in ascending order. Returns true if cancelled.
fn walk_slots(
    guard: &SnapshotGuard<'_>,
    range: SlotRange,
    cancel: &dyn CancelSignal,
    rows: &mut Vec<Row>,
) -> bool {
    let (start, finish) = match range {
        SlotRange::One(slot) => (slot.get(), slot.get()),
        SlotRange::Full => (1, guard.max_slot()),
    };
    let single = start == finish;

    for number in start..=finish {
        let Some(slot) = Slot::new(number) else { break };

        match guard.find_process(slot) {
            None => {
                // an empty slot only matters when it was asked for by name
                if !single {
                    continue;
                }
                rows.push(Row::NoSuchProcess(slot));
            }
            Some(entry) => {
                let command_name = match bstr::decode(entry.name_source(), NAME_CAPACITY) {
                    Err(_) => CommandName::Unreadable,
                    Ok(decoded) if decoded.len == 0 => CommandName::NotLoaded,
                    Ok(decoded) => CommandName::Loaded(decoded.text),
                };
                rows.push(Row::Process(ProcessRecord {
                    slot,
                    command_name,
                    priority: entry.priority,
                    global_vector: entry.global_vector,
                    stack: entry.stack,
                    fail_level: entry.fail_level,
                    return_code: entry.return_code,
                    background: entry.background,
                }));
            }
        }

        if cancel.is_cancelled() {
            return true;
        }
    }
    false
}

/// Walk the ready sequence, then the waiting sequence.
fn walk_tasks(guard: &SnapshotGuard<'_>, cancel: &dyn CancelSignal, rows: &mut Vec<Row>) -> bool {
    let mut index = 0u32;

    for node in guard.ready().iter().chain(guard.waiting().iter()) {
        index += 1;
        match node {
            TaskNode::Task(task) => {
                rows.push(Row::Task(task_record(index, task, TaskKind::Task, None)));
            }
            TaskNode::Process { slot, task } => {
                if guard.find_process(*slot).is_some() {
                    rows.push(Row::Task(task_record(
                        index,
                        task,
                        TaskKind::Process,
                        Some(*slot),
                    )));
                } else {
                    rows.push(Row::Unresolved { index, slot: *slot });
                }
            }
        }

        if cancel.is_cancelled() {
            return true;
        }
    }
    false
}

fn task_record(
    index: u32,
    source: &dyn Inspectable,
    kind: TaskKind,
    cli_slot: Option<Slot>,
) -> TaskRecord {
    TaskRecord {
        index,
        name: source.display_name(),
        kind,
        cli_slot,
        state: source.state(),
        priority: source.priority(),
        stack: source.stack(),
    }
}

/// Scan the full slot span for the first command name matching the
/// classified term.
fn search_slots(
    guard: &SnapshotGuard<'_>,
    classified: &Classified,
    cancel: &dyn CancelSignal,
) -> Snapshot {
    for number in 1..=guard.max_slot() {
        let Some(slot) = Slot::new(number) else { break };
        let Some(entry) = guard.find_process(slot) else {
            continue;
        };
        // a process without a readable name cannot match anything
        let Ok(decoded) = bstr::decode(entry.name_source(), NAME_CAPACITY) else {
            continue;
        };

        if pattern::matches(&decoded.text, classified) {
            return Snapshot {
                rows: Vec::new(),
                outcome: WalkOutcome::Matched(slot),
            };
        }

        if cancel.is_cancelled() {
            return Snapshot {
                rows: Vec::new(),
                outcome: WalkOutcome::Cancelled,
            };
        }
    }

    Snapshot {
        rows: Vec::new(),
        outcome: WalkOutcome::NoMatch,
    }
}
