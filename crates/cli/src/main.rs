//! CLI for generating slide indexes and TOC documents from a tree of
//! presentation files.

mod index;
mod reader;
mod toc;
mod walk;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate slide indexes and table-of-contents documents from
/// PowerPoint files.
#[derive(Parser, Debug)]
#[command(name = "slidetoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a tab-separated `<base>.index.txt` next to every deck
    Index {
        /// Root directory scanned recursively for presentation files
        root: PathBuf,
    },
    /// Write a formatted `<base>.toc.docx` next to every deck
    Toc {
        /// Root directory scanned recursively for presentation files
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let reader = reader::AutoDeckReader::new();

    let summary = match &args.command {
        Command::Index { root } => {
            walk::process_tree(root, &reader, &index::IndexGenerator::new())?
        }
        Command::Toc { root } => walk::process_tree(root, &reader, &toc::TocGenerator::new())?,
    };

    println!(
        "{} generated, {} skipped",
        summary.generated, summary.skipped
    );

    Ok(())
}
