//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nx_meta_document::{LinkTarget, LinkType, ValidationMode};

#[derive(Parser)]
#[command(name = "nx-meta")]
#[command(about = "Edit and validate title metadata documents", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Check that child IDs are derived from the base ID (overrides settings)
    #[arg(long, global = true, conflicts_with = "legacy")]
    pub strict: bool,

    /// Only check the shape of child IDs (overrides settings)
    #[arg(long, global = true)]
    pub legacy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Validation mode requested on the command line, if any.
    pub fn mode_override(&self) -> Option<ValidationMode> {
        if self.strict {
            Some(ValidationMode::Strict)
        } else if self.legacy {
            Some(ValidationMode::Legacy)
        } else {
            None
        }
    }
}

/// The document to edit and where to write the result.
#[derive(Args, Clone)]
pub(crate) struct FileArgs {
    /// Document file, named `<BASE TID>.json`
    pub file: PathBuf,

    /// Output directory (defaults to the saved export directory, then the
    /// file's own directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a new document for a base title ID
    New {
        /// Base title ID (16 hex digits ending with 000)
        base: String,

        /// Base version
        #[arg(long, default_value = "0")]
        version: String,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print a document
    Show {
        file: PathBuf,

        /// Only list DLC whose ID contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Report every validation problem in a document
    Check { file: PathBuf },

    /// Print the IDs derived from a base title ID
    Derive {
        base: String,

        /// DLC suffixes to compose IDs for (e.g., 1,2,a)
        #[arg(short, long, value_delimiter = ',')]
        suffixes: Vec<String>,
    },

    /// Add an update with the next version
    AddUpdate {
        #[command(flatten)]
        target: FileArgs,

        /// Version to use instead of the next step (rounded up to a multiple of 65536)
        #[arg(long)]
        version: Option<String>,
    },

    /// Advance an update's version by one step
    BumpUpdate {
        #[command(flatten)]
        target: FileArgs,

        /// Index of the update in the file
        index: usize,
    },

    /// Add a DLC with the next free suffix
    AddDlc {
        #[command(flatten)]
        target: FileArgs,

        /// Suffix to use instead of the next free one
        #[arg(long)]
        suffix: Option<String>,

        /// DLC version
        #[arg(long)]
        version: Option<String>,
    },

    /// Change the last three digits of a DLC's ID
    SetDlcSuffix {
        #[command(flatten)]
        target: FileArgs,

        index: usize,

        suffix: String,
    },

    /// Remove an update
    RemoveUpdate {
        #[command(flatten)]
        target: FileArgs,

        index: usize,
    },

    /// Remove a DLC
    RemoveDlc {
        #[command(flatten)]
        target: FileArgs,

        index: usize,
    },

    /// Add a download link to the base, an update, a DLC or the DLC pack
    Link {
        #[command(flatten)]
        target: FileArgs,

        /// base, pack, update:<index> or dlc:<index>
        #[arg(value_parser = parse_link_target)]
        entity: LinkTarget,

        url: String,

        /// Link label (defaults to the URL's domain)
        #[arg(short, long)]
        label: Option<String>,

        /// Container format (defaults to the URL's file extension)
        #[arg(short = 't', long = "type")]
        kind: Option<LinkType>,
    },

    /// Enable or remove the DLC pack
    Pack {
        #[command(flatten)]
        target: FileArgs,

        /// Remove the pack and its links
        #[arg(long)]
        remove: bool,
    },

    /// Manage editor settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings
    Show,

    /// Print the settings file path
    Path,

    /// Set the default validation mode (strict or legacy)
    SetMode { mode: ValidationMode },

    /// Set the default export directory (omit to clear it)
    SetOutput { dir: Option<PathBuf> },
}

fn parse_link_target(s: &str) -> Result<LinkTarget, String> {
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "base" => return Ok(LinkTarget::Base),
        "pack" | "dlc_pack" | "dlc-pack" => return Ok(LinkTarget::DlcPack),
        _ => {}
    }

    let (kind, index) = lower
        .split_once(':')
        .ok_or_else(|| format!("unknown link target: '{}'", s))?;
    let index: usize = index
        .parse()
        .map_err(|_| format!("invalid index in '{}'", s))?;
    match kind {
        "update" => Ok(LinkTarget::Update(index)),
        "dlc" => Ok(LinkTarget::Dlc(index)),
        _ => Err(format!(
            "unknown link target: '{}' (expected base, pack, update:N or dlc:N)",
            s
        )),
    }
}
