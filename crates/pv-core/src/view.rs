//! View selection: parsed CLI intent to a concrete view specification.
//!
//! `select` is a pure function; everything it rejects is rejected before
//! any enumeration starts. Option precedence mirrors the layered
//! semantics of the original surface: format flags never conflict, the
//! strongest one wins, and a search request overrides everything else.

use crate::bstr::NAME_CAPACITY;
use pv_common::{Error, Result, Slot};
use serde::{Deserialize, Serialize};

/// Which registries the walk covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Both the slot table and the task sequences.
    All,
    /// Slot table only.
    ShellOnly,
    /// Task sequences only.
    SystemOnly,
}

/// Which attributes a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Every column (default).
    Verbose,
    /// Control-block columns, no command name.
    Tcb,
    /// Slot number and command name only.
    Short,
    /// Emit only the slot number of the first matching process.
    Search,
}

/// Slot span the walk covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRange {
    /// The full registry span at snapshot time.
    Full,
    /// Exactly one requested slot.
    One(Slot),
}

/// Immutable description of one view, built once from parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub mode: Mode,
    pub format: Format,
    pub range: SlotRange,
    /// Set iff `format == Search`.
    pub pattern: Option<String>,
}

/// Parsed CLI intent, decoupled from the argument parser.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub process: Option<i64>,
    pub full: bool,
    pub short: bool,
    pub tcb: bool,
    pub all: bool,
    pub shell: bool,
    pub system: bool,
    pub command: Option<String>,
}

/// Resolve parsed intent into a view specification.
pub fn select(request: &Request) -> Result<ViewSpec> {
    // validation happens before anything else; a bad argument must never
    // reach the walk
    let single = request.process.map(Slot::validate).transpose()?;

    if let Some(term) = &request.command {
        let length = term.chars().count();
        if length > NAME_CAPACITY - 1 {
            return Err(Error::InvalidCommandName {
                length,
                max: NAME_CAPACITY - 1,
            });
        }
    }

    // format precedence, lowest to highest: Short < Tcb < Verbose < Search
    let format = if request.command.is_some() {
        Format::Search
    } else if request.full {
        Format::Verbose
    } else if request.tcb {
        Format::Tcb
    } else if request.short {
        Format::Short
    } else {
        Format::Verbose
    };

    // base mode is SystemOnly; All beats the explicit shell/system flags;
    // a direct slot request or a search forces ShellOnly over everything
    let mut mode = match (request.all, request.shell, request.system) {
        (true, _, _) => Mode::All,
        (false, true, _) => Mode::ShellOnly,
        _ => Mode::SystemOnly,
    };
    if single.is_some() || format == Format::Search {
        mode = Mode::ShellOnly;
    }

    // a search always scans the full registry span
    let range = match (format, single) {
        (Format::Search, _) | (_, None) => SlotRange::Full,
        (_, Some(slot)) => SlotRange::One(slot),
    };

    Ok(ViewSpec {
        mode,
        format,
        range,
        pattern: request.command.clone().filter(|_| format == Format::Search),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = select(&Request::default()).unwrap();
        assert_eq!(spec.mode, Mode::SystemOnly);
        assert_eq!(spec.format, Format::Verbose);
        assert_eq!(spec.range, SlotRange::Full);
        assert!(spec.pattern.is_none());
    }

    #[test]
    fn test_tcb_beats_short() {
        let spec = select(&Request {
            tcb: true,
            short: true,
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.format, Format::Tcb);
    }

    #[test]
    fn test_full_beats_tcb() {
        let spec = select(&Request {
            full: true,
            tcb: true,
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.format, Format::Verbose);
    }

    #[test]
    fn test_search_beats_full() {
        let spec = select(&Request {
            command: Some("x".into()),
            full: true,
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.format, Format::Search);
        assert_eq!(spec.mode, Mode::ShellOnly);
        assert_eq!(spec.range, SlotRange::Full);
        assert_eq!(spec.pattern.as_deref(), Some("x"));
    }

    #[test]
    fn test_search_forces_full_range_over_slot_request() {
        let spec = select(&Request {
            command: Some("edit*".into()),
            process: Some(4),
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.range, SlotRange::Full);
        assert_eq!(spec.mode, Mode::ShellOnly);
    }

    #[test]
    fn test_slot_request_forces_shell_mode() {
        let spec = select(&Request {
            process: Some(7),
            all: true,
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.mode, Mode::ShellOnly);
        assert_eq!(spec.range, SlotRange::One(Slot::new(7).unwrap()));
    }

    #[test]
    fn test_all_beats_shell_and_system() {
        let spec = select(&Request {
            all: true,
            shell: true,
            ..Request::default()
        })
        .unwrap();
        assert_eq!(spec.mode, Mode::All);
    }

    #[test]
    fn test_explicit_shell_and_system() {
        assert_eq!(
            select(&Request { shell: true, ..Request::default() }).unwrap().mode,
            Mode::ShellOnly
        );
        assert_eq!(
            select(&Request { system: true, ..Request::default() }).unwrap().mode,
            Mode::SystemOnly
        );
    }

    #[test]
    fn test_process_number_bounds() {
        for given in [0, 1000, -2] {
            let err = select(&Request {
                process: Some(given),
                ..Request::default()
            })
            .unwrap_err();
            assert!(matches!(err, Error::InvalidProcessNumber { .. }));
        }
        assert!(select(&Request { process: Some(999), ..Request::default() }).is_ok());
    }

    #[test]
    fn test_oversized_pattern_rejected_before_compilation() {
        let err = select(&Request {
            command: Some("a".repeat(128)),
            ..Request::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidCommandName { length: 128, max: 127 }));

        assert!(select(&Request {
            command: Some("a".repeat(127)),
            ..Request::default()
        })
        .is_ok());
    }
}
