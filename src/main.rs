//! schemagen CLI.
//!
//! Reads a Postgres schema dump (file argument or stdin) and writes one
//! gofmt-formatted Go file per CREATE TABLE statement into the output
//! directory.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schemagen::catalog::TypeCatalog;
use schemagen::gofmt::Gofmt;
use schemagen::runtime::{run, run_with_io, DuplicatePolicy, Options};

#[derive(Parser, Debug)]
#[command(version, about = "Generate Go structs and sql accessors from CREATE TABLE dumps", long_about = None)]
struct Cli {
    /// Schema dump to read; stdin when omitted.
    schema: Option<PathBuf>,

    /// Directory generated files are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Go package name for generated files; inferred from existing .go
    /// files in the output directory when omitted.
    #[arg(short, long)]
    package: Option<String>,

    /// Fail if one document defines the same table twice instead of letting
    /// the later definition overwrite the earlier file.
    #[arg(long)]
    deny_duplicates: bool,

    /// Keep generating remaining tables after one fails, then exit non-zero.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schemagen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let options = Options {
        out_dir: cli.out_dir,
        package: cli.package,
        duplicates: if cli.deny_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Overwrite
        },
        keep_going: cli.keep_going,
    };

    match cli.schema {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open schema file {}", path.display()))?;
            run_with_io(file, &TypeCatalog::postgres_defaults(), &Gofmt, &options)?;
        }
        None => run(&options)?,
    }
    Ok(())
}
