//! The top-level inspection operation.
//!
//! Glues the pieces in the contractual order: raise priority for the
//! whole inspection, take the guarded snapshot, let the guard go, then
//! render. The priority restore and guard release are drop-driven, so
//! they hold on every path out of here, including the error ones.

use crate::exit_codes::ExitCode;
use crate::guard::PriorityBoost;
use crate::registry::Registry;
use crate::render;
use crate::snapshot::{self, CancelSignal, WalkOutcome};
use crate::view::ViewSpec;
use std::io::Write;
use tracing::warn;

/// Run one inspection and report its exit code.
///
/// Validation errors never reach this function; the spec is already
/// resolved. What can still go wrong here is an uncompilable search
/// pattern and the output stream itself.
pub fn run<W: Write>(
    registry: &Registry,
    spec: &ViewSpec,
    cancel: &dyn CancelSignal,
    boost: bool,
    out: &mut W,
) -> ExitCode {
    // the boost brackets the whole inspection, not just the guarded walk
    let _boost = PriorityBoost::apply(boost);

    let snapshot = match snapshot::capture(registry, spec, cancel) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::Fail;
        }
    };

    if let Err(err) = render::render(spec, &snapshot, out) {
        eprintln!("I/O error: {err}");
        return ExitCode::Fail;
    }

    match snapshot.outcome {
        WalkOutcome::Complete | WalkOutcome::Matched(_) => ExitCode::Ok,
        WalkOutcome::NoMatch => ExitCode::Warn,
        WalkOutcome::Cancelled => {
            warn!("walk interrupted; partial output kept");
            ExitCode::Warn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_registry::{MockProcess, RegistryBuilder};
    use crate::snapshot::CancelToken;
    use crate::view::{Format, Mode, SlotRange, ViewSpec};

    fn search(term: &str) -> ViewSpec {
        ViewSpec {
            mode: Mode::ShellOnly,
            format: Format::Search,
            range: SlotRange::Full,
            pattern: Some(term.to_string()),
        }
    }

    #[test]
    fn test_search_match_exits_ok_with_single_line() {
        let registry = RegistryBuilder::new()
            .process_at(7, MockProcess::new("Editor").build())
            .build();

        let mut out = Vec::new();
        let code = run(&registry, &search("edi*"), &CancelToken::new(), false, &mut out);
        assert_eq!(code, ExitCode::Ok);
        assert_eq!(String::from_utf8(out).unwrap(), " 7\n");
    }

    #[test]
    fn test_search_miss_exits_warn_with_no_output() {
        let registry = RegistryBuilder::new()
            .process_at(7, MockProcess::new("Editor").build())
            .build();

        let mut out = Vec::new();
        let code = run(&registry, &search("zzz"), &CancelToken::new(), false, &mut out);
        assert_eq!(code, ExitCode::Warn);
        assert!(out.is_empty());
    }

    #[test]
    fn test_uncompilable_pattern_exits_fail() {
        let registry = RegistryBuilder::new().build();
        let mut out = Vec::new();
        let code = run(
            &registry,
            &search(&"*".repeat(129)),
            &CancelToken::new(),
            false,
            &mut out,
        );
        assert_eq!(code, ExitCode::Fail);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cancelled_walk_exits_warn() {
        let registry = RegistryBuilder::new()
            .process_at(1, MockProcess::new("Shell").build())
            .build();

        let cancel = CancelToken::new();
        cancel.cancel();
        let spec = ViewSpec {
            mode: Mode::ShellOnly,
            format: Format::Verbose,
            range: SlotRange::Full,
            pattern: None,
        };
        let mut out = Vec::new();
        let code = run(&registry, &spec, &cancel, false, &mut out);
        assert_eq!(code, ExitCode::Warn);
        // header plus the one row emitted before the signal was seen
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_table_walk_exits_ok() {
        let registry = RegistryBuilder::new()
            .process_at(1, MockProcess::new("Shell").build())
            .build();

        let spec = ViewSpec {
            mode: Mode::ShellOnly,
            format: Format::Verbose,
            range: SlotRange::Full,
            pattern: None,
        };
        let mut out = Vec::new();
        let code = run(&registry, &spec, &CancelToken::new(), false, &mut out);
        assert_eq!(code, ExitCode::Ok);
        assert!(String::from_utf8(out).unwrap().contains("Shell"));
    }
}
