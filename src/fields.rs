use std::collections::HashMap;

/// How a selected column's values are surfaced by the mapper.
///
/// Decided once when the statement is prepared, then consulted with a plain
/// match per value. `Temporal` columns keep the lexical string form the
/// transport was asked to preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Ordinary column; generic value conversion applies.
    #[default]
    Scalar,
    /// Timestamp/datetime/date column surfaced as its original string.
    Temporal,
}

/// Metadata for one output column of a SELECT, in projection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    /// Logical name of the field, possibly nested (`["address", "city"]`).
    pub path: Vec<String>,
    /// Source table alias; `None` for flat, unqualified projections.
    pub table: Option<String>,
    /// Value handling tag for this column.
    pub kind: ColumnKind,
}

impl SelectField {
    /// A flat top-level field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
            table: None,
            kind: ColumnKind::Scalar,
        }
    }

    /// A field belonging to a table alias.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
            table: Some(table.into()),
            kind: ColumnKind::Scalar,
        }
    }

    /// Replace the field's path with a nested one.
    #[must_use]
    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    /// Set the column kind tag.
    #[must_use]
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Which table aliases collapse to a single `null` when an outer join finds no
/// match. Aliases absent from the map are treated as not nullable.
#[derive(Debug, Clone, Default)]
pub struct JoinNullability(HashMap<String, bool>);

impl JoinNullability {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an alias as join-nullable (or not).
    #[must_use]
    pub fn with(mut self, alias: impl Into<String>, nullable: bool) -> Self {
        self.0.insert(alias.into(), nullable);
        self
    }

    pub fn set(&mut self, alias: impl Into<String>, nullable: bool) {
        self.0.insert(alias.into(), nullable);
    }

    #[must_use]
    pub fn is_nullable(&self, alias: &str) -> bool {
        self.0.get(alias).copied().unwrap_or(false)
    }
}

/// The ordered field descriptors for a statement together with the
/// join-nullability of the aliases they reference. The two always travel as a
/// unit; the mapper needs both.
#[derive(Debug, Clone, Default)]
pub struct SelectSchema {
    pub fields: Vec<SelectField>,
    pub joins: JoinNullability,
}

impl SelectSchema {
    #[must_use]
    pub fn new(fields: Vec<SelectField>) -> Self {
        Self {
            fields,
            joins: JoinNullability::default(),
        }
    }

    #[must_use]
    pub fn with_joins(mut self, joins: JoinNullability) -> Self {
        self.joins = joins;
        self
    }
}
