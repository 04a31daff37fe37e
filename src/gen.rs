//! Go source rendering.
//!
//! Each renderer is a pure function of its schema; the assembled file is
//! passed through an external formatter exactly once, and a formatter
//! rejection is a generation failure — invalid text is never emitted.

use std::collections::BTreeSet;

use crate::error::Error;
use crate::schema::TableSchema;

/// Imports every generated file needs regardless of its column types.
const BASE_IMPORTS: [&str; 2] = ["database/sql", "fmt"];

/// Canonical source formatter, invoked as a black box on the assembled file.
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String, Error>;
}

/// Render the record struct: one exported field per column, declaration
/// order.
pub fn render_struct(schema: &TableSchema) -> Result<String, Error> {
    guard(schema, "struct")?;
    let mut out = format!("type {} struct {{\n", schema.name);
    for column in &schema.columns {
        out.push_str(&format!("\t{} {}\n", column.accessor, column.ty.name));
    }
    out.push_str("}\n");
    Ok(out)
}

/// Render the row-scan method. Scan arguments are the fields' addresses in
/// declaration order, which must match the insert column order for
/// round-trip correctness.
pub fn render_scan(schema: &TableSchema) -> Result<String, Error> {
    guard(schema, "scan method")?;
    let r = receiver(schema);
    let mut out = format!(
        "func ({r} *{}) Scan(row *sql.Row) error {{\n\treturn row.Scan(\n",
        schema.name
    );
    for column in &schema.columns {
        out.push_str(&format!("\t\t&{r}.{},\n", column.accessor));
    }
    out.push_str("\t)\n}\n");
    Ok(out)
}

/// Render the insert method.
///
/// Three lists are built in lock-step over the columns: the literal column
/// names for the SQL clause, the 1-based `$n` placeholders, and the bind
/// expressions applied to the receiver's fields. Equal length and index
/// correspondence across the three is the invariant everything else rests
/// on.
pub fn render_insert(schema: &TableSchema) -> Result<String, Error> {
    guard(schema, "insert method")?;
    let r = receiver(schema);

    let mut names = Vec::with_capacity(schema.columns.len());
    let mut placeholders = Vec::with_capacity(schema.columns.len());
    let mut values = Vec::with_capacity(schema.columns.len());
    for (i, column) in schema.columns.iter().enumerate() {
        names.push(column.name.as_str());
        placeholders.push(format!("${}", i + 1));
        values.push(column.ty.bind(&format!("{r}.{}", column.accessor)));
    }

    let mut out = format!(
        "func ({r} {0}) Insert(db *sql.DB) error {{\n\tquery := \"INSERT INTO {0} ({1}) VALUES ({2})\"\n\t_, err := db.Exec(\n\t\tquery,\n",
        schema.name,
        names.join(", "),
        placeholders.join(", "),
    );
    for value in &values {
        out.push_str(&format!("\t\t{value},\n"));
    }
    out.push_str(&format!(
        "\t)\n\tif err != nil {{\n\t\treturn fmt.Errorf(\"Failed to insert {}, %#v, => %s\", {r}, err.Error())\n\t}}\n\treturn nil\n}}\n",
        schema.name
    ));
    Ok(out)
}

/// Render the import block: the base imports plus the schema's accumulated
/// requirements, each listed at most once, in sorted order.
pub fn render_imports(schema: &TableSchema) -> String {
    let mut paths: BTreeSet<&str> = BASE_IMPORTS.into_iter().collect();
    paths.extend(schema.imports.iter().map(String::as_str));

    let mut out = String::from("import (\n");
    for path in paths {
        out.push_str(&format!("\t\"{path}\"\n"));
    }
    out.push_str(")\n");
    out
}

/// Assemble the full unformatted file body.
pub fn render_file(schema: &TableSchema, package: &str) -> Result<String, Error> {
    let sections = [
        format!("package {package}\n"),
        render_imports(schema),
        render_struct(schema)?,
        render_scan(schema)?,
        render_insert(schema)?,
    ];
    Ok(sections.join("\n"))
}

/// Render and canonically format one schema's file.
pub fn emit<F: Formatter>(
    schema: &TableSchema,
    package: &str,
    formatter: &F,
) -> Result<String, Error> {
    let body = render_file(schema, package)?;
    formatter.format(&body)
}

fn guard(schema: &TableSchema, part: &'static str) -> Result<(), Error> {
    if schema.name.is_empty() || schema.columns.is_empty() {
        return Err(Error::EmptyRender {
            table: schema.name.clone(),
            part,
        });
    }
    Ok(())
}

/// Method receiver: the table name's first character.
fn receiver(schema: &TableSchema) -> String {
    schema.name.chars().take(1).collect()
}
