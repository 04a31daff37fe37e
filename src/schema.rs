//! Column parsing and schema assembly.
//!
//! The column parser splits a matched column block into `(name, spelling)`
//! pairs and resolves each spelling through the type catalog. The assembler
//! drives the scanner over a whole document, yielding table schemas in
//! source order.

use std::collections::BTreeSet;

use crate::catalog::{GoType, TypeCatalog};
use crate::error::Error;
use crate::scanner::scan_one;

/// One table column in its Go form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Declared column name, as it appears in the DDL and in the generated
    /// INSERT column list.
    pub name: String,
    /// Exported Go field name: the declared name with its first character
    /// upper-cased. No other transformation is applied.
    pub accessor: String,
    pub ty: GoType,
}

/// One fully-resolved table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    /// Column order is declaration order; it drives both the scan and the
    /// insert renderers, which must agree.
    pub columns: Vec<Column>,
    /// Import paths the resolved types require, deduplicated and ordered.
    pub imports: BTreeSet<String>,
}

/// Split a column block into resolved columns and their required imports.
///
/// Entries are comma-separated; each is trimmed and split at the first
/// whitespace run into the declared name and the rest verbatim as the type
/// spelling (embedded spaces are part of the spelling). Unknown spellings
/// are collected across the whole block and reported in one error rather
/// than aborting on the first.
pub fn parse_columns(
    table: &str,
    block: &str,
    catalog: &TypeCatalog,
) -> Result<(Vec<Column>, BTreeSet<String>), Error> {
    let mut columns = Vec::new();
    let mut imports = BTreeSet::new();
    let mut unknown = Vec::new();

    for raw in block.split(',') {
        let entry = raw.trim();
        let Some((name, spelling)) = split_entry(entry) else {
            return Err(Error::MalformedColumn {
                table: table.to_string(),
                entry: entry.to_string(),
            });
        };
        match catalog.resolve(spelling) {
            Some(ty) => {
                if let Some(import) = &ty.import {
                    imports.insert(import.clone());
                }
                columns.push(Column {
                    name: name.to_string(),
                    accessor: accessor_name(name),
                    ty: ty.clone(),
                });
            }
            None => unknown.push((name.to_string(), spelling.to_string())),
        }
    }

    if !unknown.is_empty() {
        return Err(Error::UnknownTypes {
            table: table.to_string(),
            columns: unknown,
        });
    }
    Ok((columns, imports))
}

/// `(name, spelling)` for one trimmed entry, or `None` when either part is
/// missing.
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let name_end = entry.find(char::is_whitespace)?;
    let (name, rest) = entry.split_at(name_end);
    let spelling = rest.trim_start();
    if name.is_empty() || spelling.is_empty() {
        return None;
    }
    Some((name, spelling))
}

fn accessor_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lazy single-pass iterator over the table definitions in a document.
pub struct Schemas<'a> {
    cursor: &'a str,
    catalog: &'a TypeCatalog,
}

impl Iterator for Schemas<'_> {
    type Item = Result<TableSchema, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let matched = scan_one(self.cursor)?;
        self.cursor = matched.remainder;
        let schema = parse_columns(matched.table, matched.columns, self.catalog).map(
            |(columns, imports)| TableSchema {
                name: matched.table.to_string(),
                columns,
                imports,
            },
        );
        Some(schema)
    }
}

/// Iterate over `document`'s table definitions in source order.
pub fn schemas<'a>(document: &'a str, catalog: &'a TypeCatalog) -> Schemas<'a> {
    Schemas {
        cursor: document,
        catalog,
    }
}

/// Collect every table definition in `document`, strictly in source order.
///
/// No deduplication or cross-table validation happens here; a repeated table
/// name yields two independent schemas. An input with no recognizable
/// definition at all is `Error::NoSchemaFound`.
pub fn assemble_all(document: &str, catalog: &TypeCatalog) -> Result<Vec<TableSchema>, Error> {
    let collected: Result<Vec<_>, _> = schemas(document, catalog).collect();
    let collected = collected?;
    if collected.is_empty() {
        return Err(Error::NoSchemaFound);
    }
    Ok(collected)
}
