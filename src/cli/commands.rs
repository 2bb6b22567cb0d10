//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fmtags")]
#[command(about = "Keep note tags in YAML front matter", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Add a tag to a note
    Add {
        /// Note file
        note: PathBuf,

        /// Tag path, e.g. projects/alpha
        tag: String,
    },

    /// Remove a tag from a note
    Remove {
        /// Note file
        note: PathBuf,

        /// Tag path, e.g. projects/alpha
        tag: String,
    },

    /// Rename a tag in a note and in the tag tree
    Rename {
        /// Note file
        note: PathBuf,

        /// Tag path of the tag being renamed
        tag: String,

        /// New name for the last path segment
        new_name: String,
    },

    /// List the tags stored in a note
    List {
        /// Note file
        note: PathBuf,
    },

    /// Print the note's HTML preview without its tag block
    Preview {
        /// Note file
        note: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
