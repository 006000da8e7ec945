//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "retbro")]
#[command(about = "Browse ROM catalogs, look up game info, and hand titles to a player", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never contact the metadata service; every title gets placeholder info
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the catalog from.
#[derive(Args, Clone)]
pub(crate) struct SourceArgs {
    /// Catalog file (.json or .retbrorl), catalog URL, or a page URL
    /// carrying `?retbrorl=<url>`
    pub source: String,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the systems in a catalog
    Systems {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the titles of one system
    Titles {
        #[command(flatten)]
        source: SourceArgs,

        /// System name as it appears in the catalog
        system: String,

        /// Only show titles whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Look up game info for a title
    Info {
        #[command(flatten)]
        source: SourceArgs,

        /// System name as it appears in the catalog
        system: String,

        /// Title name, or `#N` for the Nth title listed by `titles`
        title: String,
    },

    /// Print the player URL that launches a title
    Launch {
        #[command(flatten)]
        source: SourceArgs,

        /// System name as it appears in the catalog
        system: String,

        /// Title name, or `#N` for the Nth title listed by `titles`
        title: String,

        /// Player page to hand the title to (overrides settings)
        #[arg(long)]
        page: Option<String>,
    },

    /// Browse a catalog interactively from the terminal
    Browse {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Build a one-system catalog from the ROM links on a listing page
    Extract {
        /// URL of the file listing page
        url: String,

        /// System name to file the links under
        #[arg(short, long)]
        system: String,

        /// Write the catalog here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage settings and metadata credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and credential sources
    Show,
    /// Print the settings and credentials file paths
    Path,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
