use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tripsync")]
#[command(about = "Shared travel itinerary, synced through the cloud")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local cache directory
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one section, or all of them
    Show {
        /// Section tab: prep, harbin, qiqihar or tips
        tab: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Skip the remote fetch and show the cached plan
        #[arg(long)]
        offline: bool,
    },
    /// Add a new itinerary item to a section
    #[command(alias = "new")]
    Add {
        /// Section tab: prep, harbin, qiqihar or tips
        tab: String,
    },
    /// Edit fields of an existing item
    Edit {
        /// Section tab the item lives in
        tab: String,
        /// Item id (as shown by `show`)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        /// Human-readable time label
        #[arg(long)]
        time: Option<String>,
        /// Short content for the list view
        #[arg(long)]
        content: Option<String>,
        /// Long-form content for the detail view
        #[arg(long)]
        detail: Option<String>,
        /// Map search keyword for the item's location
        #[arg(long, value_name = "KEYWORD")]
        location: Option<String>,
        /// Comma-separated tag list (replaces existing tags)
        #[arg(long)]
        tags: Option<String>,
        /// Image URL, or a local file to embed as a data URL
        #[arg(long, value_name = "URL_OR_PATH")]
        image: Option<String>,
        /// Display category
        #[arg(long, value_enum)]
        kind: Option<ItemKindArg>,
    },
    /// Delete an item from a section
    Delete {
        /// Section tab the item lives in
        tab: String,
        /// Item id (as shown by `show`)
        id: String,
    },
    /// Replace the hero image
    Hero {
        /// Image URL, or a local file to embed as a data URL
        #[arg(value_name = "URL_OR_PATH")]
        image: String,
    },
    /// Export the whole plan (the printable view)
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormatArg::Markdown)]
        format: ExportFormatArg,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Keep the plan in sync (poll + realtime) until interrupted
    Watch,
    /// Configure the Supabase connection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update the connection parameters
    Init {
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/publishable key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
    },
    /// Show the active configuration and its source
    Show,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ItemKindArg {
    Alert,
    Itinerary,
    Hotel,
    Food,
    Activity,
    Tips,
}

impl From<ItemKindArg> for tripsync_core::ItemKind {
    fn from(value: ItemKindArg) -> Self {
        match value {
            ItemKindArg::Alert => Self::Alert,
            ItemKindArg::Itinerary => Self::Itinerary,
            ItemKindArg::Hotel => Self::Hotel,
            ItemKindArg::Food => Self::Food,
            ItemKindArg::Activity => Self::Activity,
            ItemKindArg::Tips => Self::Tips,
        }
    }
}
