//! procview - point-in-time process and task inspector.
//!
//! Enumerates the live execution units of the in-process registry and
//! renders one static snapshot per invocation: the shell command table,
//! the scheduler task sequences, or both, with an optional glob search
//! that prints only the slot number of the first matching command.

use clap::error::ErrorKind;
use clap::Parser;
use pv_core::bstr::RawName;
use pv_core::exit_codes::ExitCode;
use pv_core::inspect;
use pv_core::logging::{init_logging, LogConfig};
use pv_core::registry::{ProcessEntry, Registry};
use pv_core::snapshot::CancelToken;
use pv_core::view::{self, Request};
use pv_common::StackExtent;
use std::io;
use std::process;
use tracing::debug;

/// Default FAILAT level a fresh command process starts with.
const DEFAULT_FAIL_LEVEL: i32 = 10;

/// Point-in-time process and task inspector
#[derive(Parser, Debug)]
#[command(name = "procview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show a single process slot (1-999)
    #[arg(short = 'p', long, value_name = "N")]
    process: Option<i64>,

    /// Full listing with every column (default)
    #[arg(short = 'f', long)]
    full: bool,

    /// Slot number and command name only
    #[arg(short = 's', long)]
    short: bool,

    /// Control-block columns, without the command name
    #[arg(long)]
    tcb: bool,

    /// Walk both the shell registry and the scheduler task lists
    #[arg(long)]
    all: bool,

    /// Shell command processes only
    #[arg(long, conflicts_with = "system")]
    shell: bool,

    /// Scheduler tasks only
    #[arg(long)]
    system: bool,

    /// Find a process by command name; glob pattern, case-insensitive
    #[arg(short = 'c', long, value_name = "PATTERN")]
    command: Option<String>,

    /// Do not raise scheduling priority during the snapshot
    #[arg(long, env = "PROCVIEW_NO_BOOST")]
    no_boost: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help/--version are early exits, not failures; everything
            // else maps onto the FAIL return level
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Ok,
                _ => ExitCode::Fail,
            };
            let _ = err.print();
            process::exit(code.as_i32());
        }
    };

    init_logging(&LogConfig {
        verbose: cli.verbose,
        quiet: cli.quiet,
    });

    let request = Request {
        process: cli.process,
        full: cli.full,
        short: cli.short,
        tcb: cli.tcb,
        all: cli.all,
        shell: cli.shell,
        system: cli.system,
        command: cli.command.clone(),
    };
    let spec = match view::select(&request) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("{err}");
            process::exit(ExitCode::Fail.as_i32());
        }
    };

    let registry = Registry::global();
    bootstrap(registry);

    let cancel = CancelToken::new();
    {
        let handler = cancel.clone();
        if let Err(err) = ctrlc::set_handler(move || handler.cancel()) {
            debug!(%err, "no break handler installed");
        }
    }

    let mut stdout = io::stdout().lock();
    let code = inspect::run(registry, &spec, &cancel, !cli.no_boost, &mut stdout);
    drop(stdout);
    process::exit(code.as_i32());
}

/// Register this invocation in the registry it is about to inspect.
///
/// The inspector is itself a command process of the host it runs in, so
/// a snapshot always observes at least its own slot.
fn bootstrap(registry: &Registry) {
    let entry = ProcessEntry {
        command_name: Some(RawName::new("procview")),
        priority: 0,
        global_vector: 0,
        // nominal main-thread extent; the host does not expose live
        // stack pointers for the calling unit
        stack: StackExtent::new(16 * 1024, 8 * 1024 * 1024),
        fail_level: DEFAULT_FAIL_LEVEL,
        return_code: 0,
        background: false,
    };
    match registry.register_process(entry) {
        Some(slot) => debug!(slot = slot.get(), "registered own invocation"),
        None => debug!("registry full; own invocation not registered"),
    }
}
