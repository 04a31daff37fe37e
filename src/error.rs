use thiserror::Error;

/// Failures surfaced by the generation pipeline.
///
/// All variants carry enough context (table, column, offending spelling) to
/// be actionable; none are transient, so nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contained no recognizable table definition.
    #[error("no sql table schemas found in input")]
    NoSchemaFound,

    /// A column entry could not be split into a name/type pair.
    #[error("table {table}: malformed column entry {entry:?}")]
    MalformedColumn { table: String, entry: String },

    /// One or more column type spellings have no catalog entry. Collected
    /// across the whole table so every offender is reported at once.
    #[error("table {table}: unsupported column types: {}", format_unknown(.columns))]
    UnknownTypes {
        table: String,
        columns: Vec<(String, String)>,
    },

    /// Two definitions share a table name and the duplicate policy rejects
    /// that.
    #[error("table {table} is defined more than once")]
    DuplicateTable { table: String },

    /// A renderer produced empty intermediate text.
    #[error("table {table}: rendered {part} is empty")]
    EmptyRender { table: String, part: &'static str },

    /// The external formatter rejected the generated source.
    #[error("gofmt rejected generated source: {reason}")]
    Format { reason: String },

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Summary failure when `keep_going` is set and some schemas failed.
    #[error("failed to generate {failed} of {total} files")]
    Failed { failed: usize, total: usize },
}

fn format_unknown(columns: &[(String, String)]) -> String {
    columns
        .iter()
        .map(|(name, spelling)| format!("{name} ({spelling})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_types_lists_every_offender() {
        let err = Error::UnknownTypes {
            table: "courses_t".to_string(),
            columns: vec![
                ("starttime1".to_string(), "time with time zone".to_string()),
                ("blob".to_string(), "bytea".to_string()),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("courses_t"));
        assert!(message.contains("starttime1 (time with time zone)"));
        assert!(message.contains("blob (bytea)"));
    }
}
