use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ratemystartup",
    version,
    about = "Classify a startup's funding stage from its metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a submission file and print the detected stage
    Assess(AssessArgs),
    /// Write a default ratemystartup.toml into the current directory
    Init(InitArgs),
    /// Browse saved submissions
    Submissions {
        #[command(subcommand)]
        command: SubmissionsSubcommand,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AssessArgs {
    /// Submission file (.toml or .json)
    #[arg(long, short)]
    pub input: PathBuf,
    /// Persist the scored submission
    #[arg(long)]
    pub save: bool,
    /// Owner of the saved submission (defaults to general.default_user)
    #[arg(long)]
    pub user: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum SubmissionsSubcommand {
    List(ListArgs),
    Show(ShowArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[arg(long)]
    pub user: Option<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    pub id: String,
    #[command(flatten)]
    pub common: CommonArgs,
}
