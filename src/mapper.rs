use std::collections::HashSet;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::RemoteSqlError;
use crate::fields::{ColumnKind, SelectSchema};
use crate::types::RowValues;

/// Reshape one positional raw row into a structured record.
///
/// Fields are walked in projection order and grouped by their table alias,
/// keeping first-seen group order. A join-nullable alias whose selected values
/// are all NULL collapses to a single `null` rather than an object of nulls.
/// Flat fields land at the top level by name; multi-segment paths nest.
///
/// # Errors
/// Returns [`RemoteSqlError::MappingMismatch`] when the row carries fewer
/// values than the statement selected fields.
pub fn map_result_row(
    schema: &SelectSchema,
    row: &[RowValues],
) -> Result<JsonValue, RemoteSqlError> {
    if row.len() < schema.fields.len() {
        return Err(RemoteSqlError::MappingMismatch {
            expected: schema.fields.len(),
            actual: row.len(),
        });
    }

    // Aliases that contributed at least one non-NULL value in this row.
    let mut live_aliases: HashSet<&str> = HashSet::new();
    for (field, value) in schema.fields.iter().zip(row) {
        if let Some(alias) = &field.table {
            if !value.is_null() {
                live_aliases.insert(alias.as_str());
            }
        }
    }

    let mut record = JsonMap::new();
    for (field, value) in schema.fields.iter().zip(row) {
        // An empty path means the dialect compiled a field it cannot name.
        debug_assert!(
            !field.path.is_empty(),
            "selected field has an empty path"
        );
        let Some(alias) = &field.table else {
            insert_path(&mut record, &field.path, column_value(field.kind, value));
            continue;
        };

        if schema.joins.is_nullable(alias) && !live_aliases.contains(alias.as_str()) {
            // Outer join with no match: the whole group is one null.
            record.insert(alias.clone(), JsonValue::Null);
            continue;
        }

        let group = record
            .entry(alias.clone())
            .or_insert_with(|| JsonValue::Object(JsonMap::new()));
        if let JsonValue::Object(group) = group {
            insert_path(group, &field.path, column_value(field.kind, value));
        }
    }

    Ok(JsonValue::Object(record))
}

/// Map a whole row-set, one record per row, preserving row order.
///
/// # Errors
/// Fails on the first [`RemoteSqlError::MappingMismatch`]; no partial result
/// is returned.
pub fn map_result_rows(
    schema: &SelectSchema,
    rows: &[Vec<RowValues>],
) -> Result<Vec<JsonValue>, RemoteSqlError> {
    rows.iter()
        .map(|row| map_result_row(schema, row))
        .collect()
}

fn insert_path(target: &mut JsonMap<String, JsonValue>, path: &[String], value: JsonValue) {
    match path {
        [] => {}
        [leaf] => {
            target.insert(leaf.clone(), value);
        }
        [head, rest @ ..] => {
            let child = target
                .entry(head.clone())
                .or_insert_with(|| JsonValue::Object(JsonMap::new()));
            if let JsonValue::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}

fn column_value(kind: ColumnKind, value: &RowValues) -> JsonValue {
    match kind {
        // The transport preserves the lexical form of temporal columns; keep
        // it, and render any driver that parsed anyway back to text.
        ColumnKind::Temporal => match value {
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Timestamp(dt) => JsonValue::String(dt.format("%F %T%.f").to_string()),
            other => value_to_json(other),
        },
        ColumnKind::Scalar => value_to_json(value),
    }
}

fn value_to_json(value: &RowValues) -> JsonValue {
    match value {
        RowValues::Int(i) => JsonValue::from(*i),
        RowValues::Float(f) => serde_json::Number::from_f64(*f)
            .map_or(JsonValue::Null, JsonValue::Number),
        RowValues::Text(s) => JsonValue::String(s.clone()),
        RowValues::Bool(b) => JsonValue::Bool(*b),
        RowValues::Timestamp(dt) => JsonValue::String(dt.format("%F %T%.f").to_string()),
        RowValues::Null => JsonValue::Null,
        RowValues::JSON(j) => j.clone(),
        RowValues::Blob(bytes) => JsonValue::Array(bytes.iter().map(|b| (*b).into()).collect()),
    }
}
