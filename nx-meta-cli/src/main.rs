//! nx-meta CLI
//!
//! Command-line editor for title metadata documents.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};
use commands::CliContext;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = nx_meta_lib::settings::load_settings();
    let mode = cli.mode_override().unwrap_or(settings.validation.mode);
    let ctx = CliContext { settings, mode };

    if let Err(e) = run(&ctx, cli.command) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::New { base, version, out } => commands::document::run_new(ctx, &base, &version, out),
        Commands::Show { file, filter } => commands::document::run_show(&file, filter.as_deref()),
        Commands::Check { file } => commands::document::run_check(ctx, &file),
        Commands::Derive { base, suffixes } => commands::document::run_derive(&base, &suffixes),
        Commands::AddUpdate { target, version } => {
            commands::edit::run_add_update(ctx, &target, version.as_deref())
        }
        Commands::BumpUpdate { target, index } => commands::edit::run_bump_update(ctx, &target, index),
        Commands::AddDlc {
            target,
            suffix,
            version,
        } => commands::edit::run_add_dlc(ctx, &target, suffix.as_deref(), version.as_deref()),
        Commands::SetDlcSuffix {
            target,
            index,
            suffix,
        } => commands::edit::run_set_dlc_suffix(ctx, &target, index, &suffix),
        Commands::RemoveUpdate { target, index } => {
            commands::edit::run_remove_update(ctx, &target, index)
        }
        Commands::RemoveDlc { target, index } => commands::edit::run_remove_dlc(ctx, &target, index),
        Commands::Link {
            target,
            entity,
            url,
            label,
            kind,
        } => commands::edit::run_link(ctx, &target, entity, &url, label.as_deref(), kind),
        Commands::Pack { target, remove } => commands::edit::run_pack(ctx, &target, !remove),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(ctx);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetMode { mode } => commands::config::run_config_set_mode(ctx, mode),
            ConfigAction::SetOutput { dir } => commands::config::run_config_set_output(ctx, dir),
        },
    }
}

/// Route `log` output to stdout.
///
/// Normal output is printed bare at info level; `--verbose` adds
/// timestamps and debug messages, `--quiet` keeps only warnings and errors.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    builder.init();
}
