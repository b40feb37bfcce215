use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "jcs-props",
    about = "Read and edit JCamStream properties files without losing comments or key order",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the value of a key
    Get(GetArgs),
    /// Set a key, optionally placing a new key next to another one
    Set(SetArgs),
    /// Remove a key
    Remove(RemoveArgs),
    /// List keys in file order
    Keys(FileArgs),
    /// Show every line with its position
    Lines(FileArgs),
    /// Show the mail notification settings
    Mail(FileArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Properties file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub key: String,
    /// Printed when the key is not set
    #[arg(long)]
    pub default: Option<String>,
}

#[derive(Args)]
pub struct SetArgs {
    pub file: PathBuf,
    pub key: String,
    pub value: String,
    /// Put a new key on the line after this key
    #[arg(long, value_name = "KEY", conflicts_with = "before")]
    pub after: Option<String>,
    /// Put a new key on the line before this key
    #[arg(long, value_name = "KEY")]
    pub before: Option<String>,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub file: PathBuf,
    pub key: String,
}
