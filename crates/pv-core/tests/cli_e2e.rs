//! End-to-end CLI tests for the procview binary.
//!
//! The standalone binary registers its own invocation as slot 1, so every
//! run observes at least one live command process. These tests verify the
//! exit-code contract and the output surface without any mock plumbing.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the procview binary.
fn procview() -> Command {
    Command::cargo_bin("procview").expect("procview binary should exist")
}

// ============================================================================
// Version and help
// ============================================================================

mod version_and_help {
    use super::*;

    #[test]
    fn version_flag_prints_and_exits_ok() {
        procview()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("procview"));
    }

    #[test]
    fn help_flag_exits_ok() {
        procview()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--process"));
    }
}

// ============================================================================
// Argument validation
// ============================================================================

mod invalid_arguments {
    use super::*;

    #[test]
    fn process_zero_fails_without_rows() {
        procview()
            .args(["--process", "0"])
            .assert()
            .code(20)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("between 1 and 999"));
    }

    #[test]
    fn process_one_thousand_fails_without_rows() {
        procview()
            .args(["--process", "1000"])
            .assert()
            .code(20)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("between 1 and 999"));
    }

    #[test]
    fn non_numeric_process_fails() {
        procview()
            .args(["--process", "seven"])
            .assert()
            .code(20)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn unknown_flag_fails() {
        procview()
            .arg("--nonexistent-flag")
            .assert()
            .code(20)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn shell_and_system_conflict() {
        procview()
            .args(["--shell", "--system"])
            .assert()
            .code(20)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn oversized_pattern_fails_before_search() {
        let term = "a".repeat(128);
        procview()
            .args(["--command", &term])
            .assert()
            .code(20)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Command name"));
    }
}

// ============================================================================
// Table views
// ============================================================================

mod table_views {
    use super::*;

    #[test]
    fn default_view_is_the_task_table() {
        procview()
            .assert()
            .success()
            .stdout(predicate::str::contains("Task Name"));
    }

    #[test]
    fn shell_view_shows_own_slot() {
        procview()
            .arg("--shell")
            .assert()
            .success()
            .stdout(predicate::str::contains("Command Name"))
            .stdout(predicate::str::contains("procview"));
    }

    #[test]
    fn short_view_drops_the_info_columns() {
        procview()
            .args(["--shell", "--short"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Command Name"))
            .stdout(predicate::str::contains("Pri").not());
    }

    #[test]
    fn tcb_wins_over_short() {
        procview()
            .args(["--shell", "--tcb", "--short"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Pri"))
            .stdout(predicate::str::contains("Command Name").not());
    }

    #[test]
    fn all_view_has_both_sections() {
        procview()
            .arg("--all")
            .assert()
            .success()
            .stdout(predicate::str::contains("Shell processes:"))
            .stdout(predicate::str::contains("System tasks:"));
    }

    #[test]
    fn own_slot_by_number() {
        procview()
            .args(["--process", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("procview"));
    }

    #[test]
    fn empty_requested_slot_reports_no_such_process() {
        procview()
            .args(["--process", "7"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No such process"));
    }
}

// ============================================================================
// Search
// ============================================================================

mod search {
    use super::*;

    #[test]
    fn literal_search_finds_own_slot() {
        procview()
            .args(["--command", "procview"])
            .assert()
            .success()
            .stdout(" 1\n");
    }

    #[test]
    fn wildcard_search_finds_own_slot() {
        procview()
            .args(["--command", "proc*"])
            .assert()
            .success()
            .stdout(" 1\n");
    }

    #[test]
    fn search_is_case_insensitive() {
        procview()
            .args(["--command", "PROCVIEW"])
            .assert()
            .success()
            .stdout(" 1\n");
    }

    #[test]
    fn search_miss_emits_nothing_and_warns() {
        procview()
            .args(["--command", "zzz"])
            .assert()
            .code(5)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn search_suppresses_headers() {
        procview()
            .args(["--command", "proc*"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Command Name").not());
    }
}
