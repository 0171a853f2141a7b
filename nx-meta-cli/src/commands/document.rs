use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use nx_meta_core::{BaseTid, tid};
use nx_meta_document::{ContentEntry, GameDocument, Links, import_file};
use nx_meta_lib::EditingSession;
use nx_meta_lib::settings::resolve_output_dir;

use super::CliContext;
use crate::CliError;

/// Create a document for `base` and write it out.
pub(crate) fn run_new(
    ctx: &CliContext,
    base: &str,
    version: &str,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let base: BaseTid = tid::format(base.trim()).parse()?;

    let mut session = EditingSession::new(ctx.mode);
    session.apply(|_| Ok(GameDocument::new(&base).with_base_version(version)))?;

    let dir = resolve_output_dir(out, &ctx.settings, Path::new("."));
    let path = session.export(Some(&dir))?;
    log::info!(
        "{} {}",
        "Created".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print a document in display order.
pub(crate) fn run_show(file: &Path, filter: Option<&str>) -> Result<(), CliError> {
    let doc = import_file(file)?;

    log::info!(
        "{} {}",
        "Base".if_supports_color(Stdout, |t| t.bold()),
        doc.base.id.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Version: {}", doc.base.version);
    log::info!("  Added:   {}", doc.base.added_date);
    print_links(&doc.base.links, "  ");

    if let Some(pack) = &doc.dlc_pack {
        log::info!("");
        log::info!("{}", "DLC pack".if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Added:   {}", pack.added_date);
        print_links(&pack.links, "  ");
    }

    log::info!("");
    log::info!(
        "{} ({})",
        "Updates".if_supports_color(Stdout, |t| t.bold()),
        doc.updates.len(),
    );
    for update in doc.updates_newest_first() {
        let index = position(&doc.updates, update);
        print_entry(index, update);
    }

    let dlcs = doc.dlcs_matching(filter.unwrap_or_default());
    log::info!("");
    log::info!(
        "{} ({} of {})",
        "DLC".if_supports_color(Stdout, |t| t.bold()),
        dlcs.len(),
        doc.dlcs.len(),
    );
    for dlc in dlcs {
        let index = position(&doc.dlcs, dlc);
        print_entry(index, dlc);
    }
    Ok(())
}

/// List every violation; fails when there is at least one.
pub(crate) fn run_check(ctx: &CliContext, file: &Path) -> Result<(), CliError> {
    let doc = import_file(file)?;
    let violations = nx_meta_document::validate(&doc, ctx.mode);

    if violations.is_empty() {
        log::info!(
            "{} {} ({} mode)",
            "OK".if_supports_color(Stdout, |t| t.green()),
            doc.base.id,
            ctx.mode,
        );
        return Ok(());
    }

    for violation in &violations {
        log::warn!("{}", violation);
    }
    Err(CliError::Invalid(violations.len()))
}

/// Print the update ID, DLC prefix and any requested DLC IDs for a base.
pub(crate) fn run_derive(base: &str, suffixes: &[String]) -> Result<(), CliError> {
    let base: BaseTid = tid::format(base.trim()).parse()?;

    log::info!("Base:       {}", base.as_str().if_supports_color(Stdout, |t| t.cyan()));
    log::info!("Update:     {}", base.update_id());
    log::info!(
        "DLC prefix: {}{}",
        base.prefix(),
        base.dlc_type_char().if_supports_color(Stdout, |t| t.yellow()),
    );
    for suffix in suffixes {
        log::info!("DLC {:>6}: {}", suffix, base.dlc_id(suffix));
    }
    Ok(())
}

fn print_entry(index: usize, entry: &ContentEntry) {
    log::info!(
        "  [{}] {} v{} {}",
        index,
        entry.id.if_supports_color(Stdout, |t| t.cyan()),
        entry.version,
        entry.added_date.if_supports_color(Stdout, |t| t.dimmed()),
    );
    print_links(&entry.links, "      ");
}

fn print_links(links: &Links, indent: &str) {
    for (label, link) in links {
        log::info!(
            "{}{} [{}] {}",
            indent,
            label.if_supports_color(Stdout, |t| t.bold()),
            link.kind.if_supports_color(Stdout, |t| t.yellow()),
            link.url,
        );
    }
}

/// Index of `entry` in the stored list, for use with the edit commands.
fn position(entries: &[ContentEntry], entry: &ContentEntry) -> usize {
    entries
        .iter()
        .position(|e| std::ptr::eq(e, entry))
        .unwrap_or_default()
}
