use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use nx_meta_document::ValidationMode;
use nx_meta_lib::settings::{save_settings, settings_path};

use super::CliContext;
use crate::CliError;

/// Show the settings in effect and where they come from.
pub(crate) fn run_config_show(ctx: &CliContext) {
    let path = settings_path();

    log::info!("{}", "nx-meta Configuration".if_supports_color(Stdout, |t| t.bold()));
    log::info!("");
    log::info!(
        "  Config file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        },
    );
    log::info!("");

    let saved = ctx.settings.validation.mode;
    if ctx.mode == saved {
        log::info!("  Validation mode: {}", saved);
    } else {
        log::info!(
            "  Validation mode: {} {}",
            ctx.mode,
            format!("(saved: {})", saved).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    match &ctx.settings.export.output_dir {
        Some(dir) => log::info!("  Export directory: {}", dir.display()),
        None => log::info!(
            "  Export directory: {}",
            "(alongside the input file)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

pub(crate) fn run_config_set_mode(ctx: &CliContext, mode: ValidationMode) -> Result<(), CliError> {
    let mut settings = ctx.settings.clone();
    settings.validation.mode = mode;
    save_settings(&settings)?;
    log::info!("Validation mode set to {}", mode);
    Ok(())
}

pub(crate) fn run_config_set_output(ctx: &CliContext, dir: Option<PathBuf>) -> Result<(), CliError> {
    let mut settings = ctx.settings.clone();
    settings.export.output_dir = dir;
    save_settings(&settings)?;
    match &settings.export.output_dir {
        Some(d) => log::info!("Export directory set to {}", d.display()),
        None => log::info!("Export directory cleared"),
    }
    Ok(())
}
