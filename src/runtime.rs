//! End-to-end generation driver: read a schema dump, assemble every table
//! definition, and write one formatted Go file per table.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::catalog::TypeCatalog;
use crate::error::Error;
use crate::gen::{emit, Formatter};
use crate::gofmt::{resolve_go_package, Gofmt};
use crate::schema::{assemble_all, TableSchema};

/// How to treat two definitions sharing a table name in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Generate both; the later definition's file wins.
    #[default]
    Overwrite,
    /// Fail before any file is written.
    Reject,
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Directory generated files are written to, and the directory scanned
    /// for an existing package declaration.
    pub out_dir: PathBuf,
    /// Explicit package name, bypassing the resolver.
    pub package: Option<String>,
    pub duplicates: DuplicatePolicy,
    /// When set, a failure generating one table's file is logged and the
    /// remaining tables are still generated; the run then fails with a
    /// summary. Off by default: the first failure aborts.
    pub keep_going: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            package: None,
            duplicates: DuplicatePolicy::default(),
            keep_going: false,
        }
    }
}

/// Read a schema dump from stdin and generate with the default catalog and
/// gofmt.
pub fn run(options: &Options) -> Result<(), Error> {
    let stdin = std::io::stdin();
    run_with_io(
        stdin.lock(),
        &TypeCatalog::postgres_defaults(),
        &Gofmt,
        options,
    )
}

/// Driver with injectable input, catalog, and formatter.
///
/// The document is read in full before processing. Assembly failures
/// (unknown types, malformed columns, no schema at all) surface before any
/// file is written.
pub fn run_with_io<R, F>(
    mut reader: R,
    catalog: &TypeCatalog,
    formatter: &F,
    options: &Options,
) -> Result<(), Error>
where
    R: Read,
    F: Formatter,
{
    let mut document = String::new();
    reader.read_to_string(&mut document)?;

    let schemas = assemble_all(&document, catalog)?;
    if options.duplicates == DuplicatePolicy::Reject {
        check_duplicates(&schemas)?;
    }

    let package = match &options.package {
        Some(package) => package.clone(),
        None => resolve_go_package(&options.out_dir),
    };

    let mut failed = 0;
    for schema in &schemas {
        info!(table = %schema.name, "generating accessors");
        match generate_file(schema, &package, formatter, &options.out_dir) {
            Ok(path) => info!(file = %path.display(), "wrote generated file"),
            Err(err) if options.keep_going => {
                error!(table = %schema.name, %err, "generation failed, continuing");
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        return Err(Error::Failed {
            failed,
            total: schemas.len(),
        });
    }
    Ok(())
}

fn check_duplicates(schemas: &[TableSchema]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for schema in schemas {
        if !seen.insert(schema.name.as_str()) {
            return Err(Error::DuplicateTable {
                table: schema.name.clone(),
            });
        }
    }
    Ok(())
}

/// Emit one schema and write it as `<table>_sql.go`. Nothing is written
/// unless rendering and formatting both succeed.
fn generate_file<F: Formatter>(
    schema: &TableSchema,
    package: &str,
    formatter: &F,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    let text = emit(schema, package, formatter)?;
    let path = out_dir.join(format!("{}_sql.go", schema.name));
    fs::write(&path, text)?;
    Ok(path)
}
