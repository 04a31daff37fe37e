//! schemagen core library.
//!
//! Provides:
//! - `catalog`: Postgres type spelling to Go type mappings
//! - `scanner`: CREATE TABLE extraction from schema dumps
//! - `schema`: column parsing and schema assembly
//! - `gen`: Go source rendering
//! - `gofmt`: gofmt and Go package-name collaborators
//! - `runtime`: end-to-end generation driver

pub mod catalog;
pub mod error;
pub mod gen;
pub mod gofmt;
pub mod runtime;
pub mod scanner;
pub mod schema;

pub mod prelude {
    pub use crate::catalog::{GoType, TypeCatalog};
    pub use crate::error::Error;
    pub use crate::gen::{emit, Formatter};
    pub use crate::gofmt::{resolve_go_package, Gofmt};
    pub use crate::runtime::{run, run_with_io, DuplicatePolicy, Options};
    pub use crate::schema::{assemble_all, schemas, Column, TableSchema};
}
