// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// A small link shelf: named bookmarks with cached link previews
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Never fetch link previews
    #[arg(long = "offline", global = true)]
    pub offline: bool,

    /// Print the default configuration and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a bookmark
    Add {
        url: String,
        #[arg(short = 'n', long = "name", help = "display name", default_value = "")]
        name: String,
    },
    /// Edit a bookmark, omitted fields keep their current value
    Edit {
        /// bookmark id or unique id prefix
        id: String,
        #[arg(short = 'n', long = "name", help = "new name")]
        name: Option<String>,
        #[arg(short = 'u', long = "url", help = "new url")]
        url: Option<String>,
    },
    /// Delete bookmarks
    Delete {
        /// list of ids or prefixes, separated by comma, no blanks
        ids: String,
    },
    /// List one page of bookmarks with their previews
    List {
        #[arg(short = 'p', long = "page", help = "page number, starting at 1", default_value_t = 1)]
        page: usize,
        #[arg(long = "json", help = "output the page as json")]
        is_json: bool,
    },
    /// Show a bookmark with its full preview data
    Show {
        /// bookmark id or unique id prefix
        id: String,
    },
    /// Refresh stale previews, or all given ones with --force
    Refresh {
        /// list of ids or prefixes, separated by comma; all bookmarks when omitted
        ids: Option<String>,
        #[arg(short = 'f', long = "force", help = "fetch even when the cache is fresh")]
        force: bool,
    },
    /// Open a bookmark in the default browser
    Open {
        /// bookmark id or unique id prefix
        id: String,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
