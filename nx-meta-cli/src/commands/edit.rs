//! Commands that change a document file: import, one edit, export.

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use nx_meta_document::{DocumentError, GameDocument, LinkTarget, LinkType};
use nx_meta_lib::EditingSession;
use nx_meta_lib::settings::resolve_output_dir;

use super::CliContext;
use crate::CliError;
use crate::cli_types::FileArgs;

pub(crate) fn run_add_update(
    ctx: &CliContext,
    target: &FileArgs,
    version: Option<&str>,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(GameDocument::with_update_added)?;
        if let Some(version) = version {
            session.apply(|doc| doc.with_update_version(0, version))?;
        }
        let update = &session.document().updates[0];
        log::info!("Added update {} v{}", update.id, update.version);
        Ok(())
    })
}

pub(crate) fn run_bump_update(
    ctx: &CliContext,
    target: &FileArgs,
    index: usize,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(|doc| doc.with_update_bumped(index))?;
        log::info!(
            "Update {} is now v{}",
            index,
            session.document().updates[index].version
        );
        Ok(())
    })
}

pub(crate) fn run_add_dlc(
    ctx: &CliContext,
    target: &FileArgs,
    suffix: Option<&str>,
    version: Option<&str>,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(GameDocument::with_dlc_added)?;
        let index = session.document().dlcs.len() - 1;
        if let Some(suffix) = suffix {
            session.apply(|doc| doc.with_dlc_suffix(index, suffix))?;
        }
        if let Some(version) = version {
            session.apply(|doc| doc.with_dlc_version(index, version))?;
        }
        let dlc = &session.document().dlcs[index];
        log::info!("Added DLC {} v{}", dlc.id, dlc.version);
        Ok(())
    })
}

pub(crate) fn run_set_dlc_suffix(
    ctx: &CliContext,
    target: &FileArgs,
    index: usize,
    suffix: &str,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(|doc| doc.with_dlc_suffix(index, suffix))?;
        log::info!("DLC {} is now {}", index, session.document().dlcs[index].id);
        Ok(())
    })
}

pub(crate) fn run_remove_update(
    ctx: &CliContext,
    target: &FileArgs,
    index: usize,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(|doc| doc.without_update(index))?;
        log::info!("Removed update {}", index);
        Ok(())
    })
}

pub(crate) fn run_remove_dlc(
    ctx: &CliContext,
    target: &FileArgs,
    index: usize,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(|doc| doc.without_dlc(index))?;
        log::info!("Removed DLC {}", index);
        Ok(())
    })
}

pub(crate) fn run_link(
    ctx: &CliContext,
    target: &FileArgs,
    entity: LinkTarget,
    url: &str,
    label: Option<&str>,
    kind: Option<LinkType>,
) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        let draft = session.drafts_mut().add();
        session.drafts_mut().set_url(draft, url)?;
        if let Some(label) = label {
            session.drafts_mut().set_label(draft, label)?;
        }
        if let Some(kind) = kind {
            session.drafts_mut().set_kind(draft, kind)?;
        }
        session.commit_link(draft, entity)?;
        log::info!("Added link to {}: {}", entity, url);
        Ok(())
    })
}

pub(crate) fn run_pack(ctx: &CliContext, target: &FileArgs, enabled: bool) -> Result<(), CliError> {
    edit_file(ctx, target, |session| {
        session.apply(|doc| Ok(doc.with_dlc_pack(enabled)))?;
        log::info!("DLC pack {}", if enabled { "enabled" } else { "removed" });
        Ok(())
    })
}

/// Import `target.file`, run `edit`, and export the result.
///
/// Nothing is written if the edit fails or the result does not validate.
fn edit_file<F>(ctx: &CliContext, target: &FileArgs, edit: F) -> Result<(), CliError>
where
    F: FnOnce(&mut EditingSession) -> Result<(), DocumentError>,
{
    let mut session = EditingSession::new(ctx.mode);
    session.import_file(&target.file)?;
    edit(&mut session)?;

    let fallback = target
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let dir: PathBuf = resolve_output_dir(target.out.clone(), &ctx.settings, fallback);
    let path = session.export(Some(&dir))?;
    log::info!(
        "{} {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
