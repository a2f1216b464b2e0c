//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Tree of named coordinate frames: express points given in one frame in another
#[derive(Parser, Debug)]
#[command(name = "frametree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Frame definition file (default: `definition` from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the frame tree with each frame's transform
    Tree {
        /// Digits after the decimal point
        #[arg(long)]
        precision: Option<usize>,
        /// Spaces per tree level
        #[arg(long)]
        indent: Option<usize>,
        /// Only show frame names
        #[arg(long)]
        names_only: bool,
    },

    /// Express a point given in SRC coordinates in DEST coordinates
    Transform {
        /// Frame the point is given in
        src: String,
        /// Frame to express the point in
        dest: String,
        /// Point coordinates
        #[arg(num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        point: Vec<f64>,
    },

    /// Show the ancestor chain of a frame up to the root
    Chain {
        /// Frame name
        frame: String,
    },

    /// Show frame count, depth and leaf frames
    Info,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
