// Wed Jan 21 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dexprobe")]
#[command(author = "Alex")]
#[command(version = "0.1.0")]
#[command(about = "Resolves obfuscated app methods against a class index and plans hooks", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every target and print what was found
    Resolve(ResolveArgs),
    /// Dry-run hook installation and list the hook points
    Hooks(HooksArgs),
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[arg(short, long)]
    pub index: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct HooksArgs {
    #[arg(short, long)]
    pub index: PathBuf,

    /// Report detector signals for false values as well as true
    #[arg(long)]
    pub log_both: bool,
}

impl ResolveArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_index(&self.index)?;
        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(format!("Output path is a directory: {}", output.display()));
            }
        }
        Ok(())
    }
}

impl HooksArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_index(&self.index)
    }
}

fn validate_index(index: &Path) -> Result<(), String> {
    if !index.is_file() {
        return Err(format!("Index file does not exist: {}", index.display()));
    }
    Ok(())
}
