//! Presentation of a snapshot.
//!
//! Stateless formatting over `(ViewSpec, Snapshot)` into any writer.
//! Every non-search view gets a three-line header block (top annotation,
//! column titles, divider) followed by one fixed-width line per row;
//! numeric fields are zero-padded, text fields are left-justified and
//! hard-truncated to the column. The search view prints nothing but the
//! matched slot number.
//!
//! This module runs strictly outside the snapshot guard.

use crate::snapshot::{CommandName, ProcessRecord, Row, Snapshot, TaskRecord, WalkOutcome};
use crate::view::{Format, Mode, ViewSpec};
use std::io::{self, Write};

const STR_YES: &str = "Yes";
const STR_NO: &str = "No";
const STR_NO_COMMAND: &str = "No command loaded";
const STR_NO_PROCESS: &str = "No such process";
const STR_ERR_GET_CMD: &str = "Error getting command name";
const STR_ERR_GET_CLI: &str = "Error getting CLI info";

const NAME_DIV: &str = "-----------------------------------";

/// Render one snapshot according to the selected view.
pub fn render<W: Write>(spec: &ViewSpec, snapshot: &Snapshot, out: &mut W) -> io::Result<()> {
    if spec.format == Format::Search {
        if let WalkOutcome::Matched(slot) = snapshot.outcome {
            writeln!(out, "{:2}", slot.get())?;
        }
        return Ok(());
    }

    match spec.mode {
        Mode::ShellOnly => {
            process_header(spec.format, out)?;
            for row in &snapshot.rows {
                write_row(spec.format, row, out)?;
            }
        }
        Mode::SystemOnly => {
            task_header(spec.format, out)?;
            for row in &snapshot.rows {
                write_row(spec.format, row, out)?;
            }
        }
        Mode::All => {
            writeln!(out, "Shell processes:")?;
            process_header(spec.format, out)?;
            for row in &snapshot.rows {
                if matches!(row, Row::Process(_) | Row::NoSuchProcess(_)) {
                    write_row(spec.format, row, out)?;
                }
            }

            writeln!(out)?;
            writeln!(out, "System tasks:")?;
            task_header(spec.format, out)?;
            for row in &snapshot.rows {
                if matches!(row, Row::Task(_) | Row::Unresolved { .. }) {
                    write_row(spec.format, row, out)?;
                }
            }
        }
    }

    Ok(())
}

fn write_row<W: Write>(format: Format, row: &Row, out: &mut W) -> io::Result<()> {
    match row {
        Row::Process(record) => process_row(format, record, out),
        Row::NoSuchProcess(slot) => writeln!(out, " {:03} {}", slot.get(), STR_NO_PROCESS),
        Row::Task(record) => task_row(format, record, out),
        Row::Unresolved { index, .. } => writeln!(out, " {:03} {}", index, STR_ERR_GET_CLI),
    }
}

fn name_text(name: &CommandName) -> &str {
    match name {
        CommandName::Loaded(text) => text,
        CommandName::NotLoaded => STR_NO_COMMAND,
        CommandName::Unreadable => STR_ERR_GET_CMD,
    }
}

fn process_header<W: Write>(format: Format, out: &mut W) -> io::Result<()> {
    match format {
        Format::Verbose => {
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "", "", "", "", "Stack", "Stack", "Fail", "", ""
            )?;
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "Num", "Command Name", "Pri", "GV", "Used", "Size", "Lvl", "RC", "BG"
            )?;
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "---", NAME_DIV, "---", "----", "------", "------", "----", "----", "----"
            )
        }
        Format::Tcb => {
            writeln!(
                out,
                " {:>3.3} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "", "", "", "Stack", "Stack", "Fail", "", ""
            )?;
            writeln!(
                out,
                " {:>3.3} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "Num", "Pri", "GV", "Used", "Size", "Lvl", "RC", "BG"
            )?;
            writeln!(
                out,
                " {:>3.3} {:>3.3} {:>4.4} {:>6.6} {:>6.6} {:>4.4} {:>4.4} {:>4.4}",
                "---", "---", "----", "------", "------", "----", "----", "----"
            )
        }
        Format::Short => {
            writeln!(out, " {:>3.3} {:<35.35}", "", "")?;
            writeln!(out, " {:>3.3} {:<35.35}", "Num", "Command Name")?;
            writeln!(out, " {:>3.3} {:<35.35}", "---", NAME_DIV)
        }
        Format::Search => Ok(()),
    }
}

fn process_row<W: Write>(format: Format, record: &ProcessRecord, out: &mut W) -> io::Result<()> {
    let background = if record.background { STR_YES } else { STR_NO };
    match format {
        Format::Verbose => writeln!(
            out,
            " {:03} {:<35.35} {:03} {:04} {:06} {:06} {:04} {:04} {:>4.3}",
            record.slot.get(),
            name_text(&record.command_name),
            record.priority,
            record.global_vector,
            record.stack.used(),
            record.stack.total(),
            record.fail_level,
            record.return_code,
            background
        ),
        Format::Tcb => writeln!(
            out,
            " {:03} {:03} {:04} {:06} {:06} {:04} {:04} {:>4.3}",
            record.slot.get(),
            record.priority,
            record.global_vector,
            record.stack.used(),
            record.stack.total(),
            record.fail_level,
            record.return_code,
            background
        ),
        Format::Short => writeln!(
            out,
            " {:03} {:<35.35}",
            record.slot.get(),
            name_text(&record.command_name)
        ),
        Format::Search => Ok(()),
    }
}

fn task_header<W: Write>(format: Format, out: &mut W) -> io::Result<()> {
    match format {
        Format::Verbose => {
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "", "", "", "", "", "", "Stack", "Stack"
            )?;
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "Num", "Task Name", "Type", "CLI", "State", "Pri", "Used", "Size"
            )?;
            writeln!(
                out,
                " {:>3.3} {:<35.35} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "---", NAME_DIV, "-------", "---", "---------", "---", "------", "------"
            )
        }
        Format::Tcb => {
            writeln!(
                out,
                " {:>3.3} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "", "", "", "", "", "Stack", "Stack"
            )?;
            writeln!(
                out,
                " {:>3.3} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "Num", "Type", "CLI", "State", "Pri", "Used", "Size"
            )?;
            writeln!(
                out,
                " {:>3.3} {:<7.7} {:>3.3} {:<9.9} {:>3.3} {:>6.6} {:>6.6}",
                "---", "-------", "---", "---------", "---", "------", "------"
            )
        }
        Format::Short => {
            writeln!(out, " {:>3.3} {:<35.35} {:<7.7}", "", "", "")?;
            writeln!(out, " {:>3.3} {:<35.35} {:<7.7}", "Num", "Task Name", "Type")?;
            writeln!(out, " {:>3.3} {:<35.35} {:<7.7}", "---", NAME_DIV, "-------")
        }
        Format::Search => Ok(()),
    }
}

fn task_row<W: Write>(format: Format, record: &TaskRecord, out: &mut W) -> io::Result<()> {
    let cli = match record.cli_slot {
        Some(slot) => format!("{:03}", slot.get()),
        None => "  -".to_string(),
    };
    let kind = record.kind.to_string();
    let state = record.state.to_string();
    match format {
        Format::Verbose => writeln!(
            out,
            " {:03} {:<35.35} {:<7.7} {:>3.3} {:<9.9} {:03} {:06} {:06}",
            record.index,
            record.name,
            kind,
            cli,
            state,
            record.priority,
            record.stack.used(),
            record.stack.total()
        ),
        Format::Tcb => writeln!(
            out,
            " {:03} {:<7.7} {:>3.3} {:<9.9} {:03} {:06} {:06}",
            record.index,
            kind,
            cli,
            state,
            record.priority,
            record.stack.used(),
            record.stack.total()
        ),
        Format::Short => writeln!(
            out,
            " {:03} {:<35.35} {:<7.7}",
            record.index, record.name, kind
        ),
        Format::Search => Ok(()),
    }
}
