//! CREATE TABLE extraction.
//!
//! Recognizes exactly the shape `CREATE TABLE <name> (<columns>);` — a bare
//! identifier, a space, and a parenthesized column block terminated by `);`.
//! The block is matched up to the first terminator rather than the first
//! close paren, since type spellings embed parentheses
//! (`character varying(32)`). Anything after the terminator is returned for
//! re-scanning, which is how multi-table dumps are consumed.

const CREATE_TABLE: &str = "CREATE TABLE ";
const TERMINATOR: &str = ");";

/// One matched table definition, borrowed from the input document.
#[derive(Debug, PartialEq, Eq)]
pub struct ScanMatch<'a> {
    pub table: &'a str,
    pub columns: &'a str,
    pub remainder: &'a str,
}

/// Extract the first table definition from `input`.
///
/// `None` means the input holds no further recognizable definition; it is
/// the assembler's loop-termination condition, not an error. A keyword
/// occurrence that does not complete the shape is stepped over and the scan
/// continues.
pub fn scan_one(input: &str) -> Option<ScanMatch<'_>> {
    let mut offset = 0;
    while let Some(pos) = input[offset..].find(CREATE_TABLE) {
        let name_start = offset + pos + CREATE_TABLE.len();
        let rest = &input[name_start..];
        if let Some(matched) = match_definition(rest) {
            return Some(matched);
        }
        offset = name_start;
    }
    None
}

/// Match `<name> (<columns>);` at the start of `rest`.
fn match_definition(rest: &str) -> Option<ScanMatch<'_>> {
    let name_len = rest
        .find(|c: char| !is_word_char(c))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let after_name = &rest[name_len..];
    let block = after_name.strip_prefix(" (")?;
    let close = block.find(TERMINATOR)?;
    Some(ScanMatch {
        table: &rest[..name_len],
        columns: &block[..close],
        remainder: &block[close + TERMINATOR.len()..],
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_table() {
        let input = "CREATE TABLE users (id integer, name text);";
        let m = scan_one(input).unwrap();
        assert_eq!(m.table, "users");
        assert_eq!(m.columns, "id integer, name text");
        assert_eq!(m.remainder, "");
    }

    #[test]
    fn block_may_span_lines() {
        let input = "CREATE TABLE courses_t (\n    term character varying(32),\n    callnumber integer\n);\n";
        let m = scan_one(input).unwrap();
        assert_eq!(m.table, "courses_t");
        assert!(m.columns.contains("term character varying(32)"));
        assert_eq!(m.remainder, "\n");
    }

    #[test]
    fn embedded_parens_do_not_end_the_block() {
        let input = "CREATE TABLE t (a character varying(64) NOT NULL);";
        let m = scan_one(input).unwrap();
        assert_eq!(m.columns, "a character varying(64) NOT NULL");
    }

    #[test]
    fn remainder_holds_the_next_definition() {
        let input = "CREATE TABLE a (x text);\nCREATE TABLE b (y integer);";
        let first = scan_one(input).unwrap();
        assert_eq!(first.table, "a");
        let second = scan_one(first.remainder).unwrap();
        assert_eq!(second.table, "b");
        assert_eq!(second.columns, "y integer");
        assert!(scan_one(second.remainder).is_none());
    }

    #[test]
    fn leading_prose_is_skipped() {
        let input = "-- schema dump\nSET search_path = public;\nCREATE TABLE t (a text);";
        let m = scan_one(input).unwrap();
        assert_eq!(m.table, "t");
    }

    #[test]
    fn unterminated_definition_is_no_match() {
        assert!(scan_one("CREATE TABLE t (a text").is_none());
        assert!(scan_one("CREATE TABLE t").is_none());
        assert!(scan_one("").is_none());
    }

    #[test]
    fn incomplete_keyword_is_stepped_over() {
        let input = "CREATE TABLE ; nope\nCREATE TABLE real (a text);";
        let m = scan_one(input).unwrap();
        assert_eq!(m.table, "real");
    }
}
