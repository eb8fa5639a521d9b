use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "outline-curator")]
#[command(
    about = "Upload course materials to the outline service, curate the extracted \
             segments and generate the final course outline."
)]
pub struct Cli {
    /// Outline service base URL (overrides OUTLINE_SERVICE_URL).
    #[arg(long = "service-url", global = true)]
    pub service_url: Option<String>,

    /// Enable debug logging.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload the plan, slides and assignments and save the extracted outline.
    Extract(ExtractArgs),
    /// Print an outline snapshot, optionally with a selection applied.
    Show(ShowArgs),
    /// Apply a selection to an outline snapshot and generate the final outline.
    Finalize(FinalizeArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Course plan document (.docx).
    #[arg(short = 'p', long = "plan")]
    pub plan: PathBuf,

    /// Slide decks (.pptx), repeatable.
    #[arg(short = 's', long = "slides", num_args(1..))]
    pub slides: Vec<PathBuf>,

    /// Assignment files (.docx, .pdf, .txt), repeatable.
    #[arg(short = 'a', long = "assignments", num_args(1..))]
    pub assignments: Vec<PathBuf>,

    /// Where to write the extracted outline snapshot.
    #[arg(short = 'o', long = "out", default_value = "outline.json")]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Outline snapshot written by `extract`.
    #[arg(long = "outline", default_value = "outline.json")]
    pub outline: PathBuf,

    /// Selection file (TOML) to apply before printing.
    #[arg(long = "selection")]
    pub selection: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FinalizeArgs {
    /// Outline snapshot written by `extract`.
    #[arg(long = "outline", default_value = "outline.json")]
    pub outline: PathBuf,

    /// Selection file (TOML) listing the segments to keep.
    #[arg(long = "selection")]
    pub selection: PathBuf,

    /// Download the generated file to this path or directory.
    /// Without a value the file goes to the configured output directory.
    #[arg(short = 'd', long = "download", num_args = 0..=1)]
    pub download: Option<Option<PathBuf>>,
}
