//! External collaborators: the gofmt formatter and the Go package-name
//! resolver. Both live at the edge of the pipeline; the core only sees a
//! `Formatter` impl and an opaque package-name string.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::warn;

use crate::error::Error;
use crate::gen::Formatter;

/// Fallback when no package declaration can be found.
const DEFAULT_PACKAGE: &str = "main";

/// Formats generated source by piping it through the `gofmt` binary.
///
/// gofmt doubles as a syntax gate: a non-zero exit means the generated text
/// was not valid Go, which is reported as a generation failure.
pub struct Gofmt;

impl Formatter for Gofmt {
    fn format(&self, source: &str) -> Result<String, Error> {
        let mut child = Command::new("gofmt")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(Error::Format {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|e| Error::Format {
            reason: e.to_string(),
        })
    }
}

/// Best-effort package-name inference: the first `package <ident>`
/// declaration found in the directory's `.go` files, or `"main"` when
/// nothing turns up. Read failures degrade to the default rather than
/// aborting the run.
pub fn resolve_go_package(dir: &Path) -> String {
    match find_go_package(dir) {
        Some(package) => package,
        None => {
            warn!(
                dir = %dir.display(),
                "no Go package declaration found, defaulting to {DEFAULT_PACKAGE:?}"
            );
            DEFAULT_PACKAGE.to_string()
        }
    }
}

fn find_go_package(dir: &Path) -> Option<String> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "go"))
        .collect();
    // deterministic pick when several files declare a package
    paths.sort();

    for path in paths {
        let Ok(text) = fs::read_to_string(&path) else {
            continue;
        };
        if let Some(package) = package_declaration(&text) {
            return Some(package);
        }
    }
    None
}

fn package_declaration(source: &str) -> Option<String> {
    for line in source.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("package ") {
            let name: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_package_declaration() {
        let src = "// generated\npackage models\n\nimport \"fmt\"\n";
        assert_eq!(package_declaration(src).unwrap(), "models");
    }

    #[test]
    fn ignores_files_without_declaration() {
        assert!(package_declaration("// nothing here\n").is_none());
        assert!(package_declaration("package \n").is_none());
    }

    #[test]
    fn resolves_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "package nope\n").unwrap();
        fs::write(dir.path().join("b.go"), "package models\n").unwrap();
        assert_eq!(resolve_go_package(dir.path()), "models");
    }

    #[test]
    fn first_file_by_name_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package alpha\n").unwrap();
        fs::write(dir.path().join("z.go"), "package zeta\n").unwrap();
        assert_eq!(resolve_go_package(dir.path()), "alpha");
    }

    #[test]
    fn defaults_to_main_when_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_go_package(dir.path()), "main");
        assert_eq!(resolve_go_package(Path::new("/nonexistent/path")), "main");
    }
}
