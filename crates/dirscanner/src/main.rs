// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! dirscanner - a plugin-based directory scanner.
//!
//! This is the binary entry point. Plugins are discovered and initialized
//! before the command line is fully parsed, since they supply the scan
//! subcommands.

mod cli;
mod console;
mod host;
mod orchestrator;

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use cli::{GlobalArgs, Invocation};
use console::ConsoleReporter;
use orchestrator::Orchestrator;

/// Scan completed cleanly, or nothing to scan.
const EXIT_OK: u8 = 0;
/// Scan completed with per-file errors or failed outright.
const EXIT_SCAN_FAILED: u8 = 1;
/// Config or plugin bring-up failed before any command ran.
const EXIT_BRING_UP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let globals = cli::pre_parse(&argv);

    let config = match dirscanner_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            dirscanner_config::render_errors(&errors);
            return ExitCode::from(EXIT_BRING_UP);
        }
    };
    init_tracing(host::log_level(&globals, &config));

    let settings = host::settings(&globals, &config);
    let orchestrator = match Orchestrator::bring_up(
        &settings,
        host::builtin_catalog(),
        host::entry_point_loader(),
    )
    .await
    {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("dirscanner: {e}");
            return ExitCode::from(EXIT_BRING_UP);
        }
    };

    let commands = orchestrator.commands();
    let code = match cli::build_command(&commands)
        .try_get_matches_from(&argv)
        .and_then(|matches| cli::interpret(&matches, &commands))
    {
        Ok((globals, invocation)) => dispatch(&orchestrator, &globals, invocation),
        Err(e) => {
            let _ = e.print();
            u8::try_from(e.exit_code()).unwrap_or(EXIT_BRING_UP)
        }
    };

    orchestrator.shutdown().await;
    ExitCode::from(code)
}

fn dispatch(orchestrator: &Orchestrator, globals: &GlobalArgs, invocation: Invocation) -> u8 {
    match invocation {
        Invocation::Overview => {
            let mut out = io::stdout().lock();
            let listed = orchestrator
                .write_listing(&mut out)
                .and_then(|()| writeln!(out, "\nRun 'dirscanner --help' for available commands"));
            if listed.is_ok() { EXIT_OK } else { EXIT_SCAN_FAILED }
        }
        Invocation::ListPlugins => match orchestrator.write_listing(&mut io::stdout().lock()) {
            Ok(()) => EXIT_OK,
            Err(_) => EXIT_SCAN_FAILED,
        },
        Invocation::Scan { plugin, command, args } => {
            tracing::debug!(%plugin, %command, "dispatching scan command");
            let mut reporter = ConsoleReporter::stdio(args.verbosity(), globals.use_color());
            match orchestrator.run_scan(&plugin, &args.to_request(), &mut reporter) {
                0 => EXIT_OK,
                _ => EXIT_SCAN_FAILED,
            }
        }
    }
}

/// Diagnostics go to stderr so stdout stays a clean scan report.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dirscanner={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
