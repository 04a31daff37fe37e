//! Mapping from Postgres type spellings to Go type descriptors.
//!
//! Lookup is an exact string match: length and nullability qualifiers such
//! as `character varying(32) NOT NULL` are distinct keys, never parsed as
//! structured metadata. The catalog is passed into the parser explicitly so
//! tests and other dialects can swap it out.

use std::collections::HashMap;

/// The Go-side description of one source column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoType {
    /// Go type name used in the generated struct field.
    pub name: String,
    /// Bind-expression template applied to `receiver.Field` when the value
    /// is passed to the insert statement. `{}` marks the field reference.
    pub bind_expr: String,
    /// Import path the generated file needs for this type, if any.
    pub import: Option<String>,
}

impl GoType {
    /// Apply the bind-expression template to a field reference.
    pub fn bind(&self, field: &str) -> String {
        self.bind_expr.replace("{}", field)
    }
}

/// Immutable table of known source-type spellings.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, GoType>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one catalog entry. `name` must be non-empty.
    pub fn with_type(
        mut self,
        spelling: &str,
        name: &str,
        bind_expr: &str,
        import: Option<&str>,
    ) -> Self {
        self.types.insert(
            spelling.to_string(),
            GoType {
                name: name.to_string(),
                bind_expr: bind_expr.to_string(),
                import: import.map(str::to_string),
            },
        );
        self
    }

    /// The spellings produced by Postgres schema dumps that the generator
    /// understands out of the box.
    pub fn postgres_defaults() -> Self {
        let mut catalog = Self::new();
        for spelling in [
            "text",
            "character varying(32)",
            "character varying(64)",
            "character varying(32) NOT NULL",
            "character varying(64) NOT NULL",
        ] {
            catalog = catalog.with_type(spelling, "string", "{}", None);
        }
        catalog
            .with_type("boolean", "bool", "{}", None)
            .with_type("double precision", "float64", "{}", None)
            .with_type(
                "time without time zone",
                "time.Time",
                "{}.Format(\"15:04\")",
                Some("time"),
            )
            .with_type("integer", "int", "{}", None)
    }

    /// Exact-spelling lookup. `None` means the type is unsupported; callers
    /// decide whether that is fatal.
    pub fn resolve(&self, spelling: &str) -> Option<&GoType> {
        self.types.get(spelling)
    }
}
