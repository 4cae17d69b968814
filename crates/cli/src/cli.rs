use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fitshdr", version, about = "Query, log and group FITS-style header files")]
pub struct Cli {
    /// Config file with default inputs and keywords.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Globs, header files, or list files naming headers one per line.
    #[arg(short = 'i', long = "input", num_args = 1..)]
    pub input: Vec<String>,
    /// Use only the first found file.
    #[arg(short = 's', long, action = ArgAction::SetTrue)]
    pub single: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search tokens: KWD=value, bare KWD (present) or KWD! (absent).
    #[arg(value_name = "KWD=value")]
    pub keywords: Vec<String>,
    /// Treat values as regular expressions matched at the value start.
    #[arg(long = "re", action = ArgAction::SetTrue)]
    pub regex: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the files whose headers match the given criteria.
    List {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Write a full log table, not just the matching file names.
        #[arg(short = 'l', long, action = ArgAction::SetTrue)]
        log: bool,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Tabulate the searched keywords for every matching file.
    Log {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Group files by identical values of the searched keywords.
    Group {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Collapse an image cube into one image, honoring a pixel mask.
    Combine {
        /// JSON cube file: planes, rows, cols, data.
        cube: PathBuf,
        /// JSON mask cube of the same shape; zero means unmasked.
        #[arg(long)]
        mask: Option<PathBuf>,
        #[arg(long, default_value = "mean")]
        method: String,
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}
