use crate::error::RemoteSqlError;
use crate::types::{ParamValue, PlaceholderValues, RowValues};

/// Resolve a parameter template into a fully concrete parameter list.
///
/// Concrete entries pass through untouched; placeholder markers are looked up
/// by name in `values`. Binding order is positional, so the output preserves
/// the template's order exactly.
///
/// # Errors
/// Returns [`RemoteSqlError::MissingPlaceholderValue`] if a marker's name is
/// absent from `values`. Nothing is dispatched on failure.
pub fn fill_placeholders(
    template: &[ParamValue],
    values: &PlaceholderValues,
) -> Result<Vec<RowValues>, RemoteSqlError> {
    template
        .iter()
        .map(|param| match param {
            ParamValue::Value(value) => Ok(value.clone()),
            ParamValue::Placeholder(name) => values
                .get(name)
                .cloned()
                .ok_or_else(|| RemoteSqlError::MissingPlaceholderValue(name.clone())),
        })
        .collect()
}
