// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line surface.
//!
//! Scan subcommands come from the discovered plugins, so the full parser is
//! only built after discovery. Global options are read beforehand with a
//! lenient pre-parse, which is why they must precede the subcommand.

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{ArgAction, ArgMatches, Args, Command, FromArgMatches};
use dirscanner_core::{ScanRequest, Verbosity};
use dirscanner_plugin::CommandDescriptor;
use tracing::warn;

pub const PLUGINS_COMMAND: &str = "plugins";

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Plugin configuration file consulted before `<plugin>.toml`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding external plugin packages
    #[arg(long, value_name = "DIR")]
    pub ext_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log filter for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

/// Arguments shared by every plugin scan command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Directory to scan
    pub directory: PathBuf,

    /// Directory to write output files
    #[arg(long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Write one consolidated index file instead of one file per input
    #[arg(long, value_name = "FILE")]
    pub index_file: Option<PathBuf>,

    /// Show what would be done without writing files
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Overwrite existing files
    #[arg(short = 'c', long)]
    pub clobber: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity (-vv for error causes)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ScanArgs {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    pub fn to_request(&self) -> ScanRequest {
        ScanRequest::builder(&self.directory)
            .output_directory(self.output_directory.clone())
            .index_path(self.index_file.clone())
            .dry_run(self.dry_run)
            .overwrite(self.clobber)
            .verbosity(self.verbosity())
            .build()
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No subcommand given.
    Overview,
    /// `plugins`
    ListPlugins,
    /// A plugin's scan command.
    Scan {
        plugin: String,
        command: String,
        args: ScanArgs,
    },
}

fn base_command() -> Command {
    GlobalArgs::augment_args(
        Command::new("dirscanner")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A plugin-based directory scanning framework"),
    )
}

/// Read global options without knowing the subcommands yet. Anything
/// unparsable falls back to defaults; the full parse reports it later.
pub fn pre_parse(argv: &[OsString]) -> GlobalArgs {
    base_command()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .allow_external_subcommands(true)
        .ignore_errors(true)
        .try_get_matches_from(argv)
        .ok()
        .and_then(|m| GlobalArgs::from_arg_matches(&m).ok())
        .unwrap_or_default()
}

/// The full parser: `plugins` plus one subcommand per plugin command.
///
/// Commands whose names are already taken are dropped with a warning.
pub fn build_command(commands: &[CommandDescriptor]) -> Command {
    let mut cmd = base_command().subcommand(
        Command::new(PLUGINS_COMMAND).about("List discovered plugins and their status"),
    );
    let mut taken = vec![PLUGINS_COMMAND.to_string()];
    for descriptor in commands {
        if taken.contains(&descriptor.name) {
            warn!(
                command = %descriptor.name,
                plugin = %descriptor.plugin,
                "command name already in use, ignoring"
            );
            continue;
        }
        taken.push(descriptor.name.clone());
        cmd = cmd.subcommand(ScanArgs::augment_args(
            Command::new(descriptor.name.clone()).about(descriptor.about.clone()),
        ));
    }
    cmd
}

/// Map parsed matches onto an [`Invocation`].
pub fn interpret(
    matches: &ArgMatches,
    commands: &[CommandDescriptor],
) -> Result<(GlobalArgs, Invocation), clap::Error> {
    let globals = GlobalArgs::from_arg_matches(matches)?;
    let invocation = match matches.subcommand() {
        None => Invocation::Overview,
        Some((PLUGINS_COMMAND, _)) => Invocation::ListPlugins,
        Some((name, sub)) => {
            let args = ScanArgs::from_arg_matches(sub)?;
            let plugin = commands
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.plugin.clone())
                .unwrap_or_default();
            Invocation::Scan {
                plugin,
                command: name.to_string(),
                args,
            }
        }
    };
    Ok((globals, invocation))
}
