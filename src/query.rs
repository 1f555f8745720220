use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::RemoteSqlError;
use crate::fields::SelectSchema;
use crate::logger::QueryLogger;
use crate::mapper::map_result_rows;
use crate::placeholders::fill_placeholders;
use crate::transport::{FetchMode, RemoteTransport, TransportResponse, TransportRows};
use crate::types::{ParamValue, PlaceholderValues};

/// Result of [`PreparedQuery::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteOutcome {
    /// Column-mapped records, one per raw row, in row order.
    Rows(Vec<JsonValue>),
    /// Transport response passed through unmapped: either the statement had no
    /// field descriptors, or it was DML and produced no rows to shape.
    Raw(TransportResponse),
}

impl ExecuteOutcome {
    /// Borrow the mapped records, if this outcome carries any.
    #[must_use]
    pub fn rows(&self) -> Option<&[JsonValue]> {
        match self {
            ExecuteOutcome::Rows(rows) => Some(rows),
            ExecuteOutcome::Raw(_) => None,
        }
    }
}

/// Reusable handle for one logical statement.
///
/// Immutable after construction: each invocation fills its own parameter list
/// and builds its own result, so one handle can serve concurrent calls without
/// locking. Owns no connection resources; there is nothing to release.
pub struct PreparedQuery {
    transport: Arc<dyn RemoteTransport>,
    sql: String,
    params: Vec<ParamValue>,
    schema: Option<SelectSchema>,
    name: Option<String>,
    logger: Arc<dyn QueryLogger>,
}

impl std::fmt::Debug for PreparedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedQuery")
            .field("sql", &self.sql)
            .field("params", &self.params)
            .field("schema", &self.schema)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PreparedQuery {
    pub(crate) fn new(
        transport: Arc<dyn RemoteTransport>,
        sql: String,
        params: Vec<ParamValue>,
        schema: Option<SelectSchema>,
        name: Option<String>,
        logger: Arc<dyn QueryLogger>,
    ) -> Self {
        Self {
            transport,
            sql,
            params,
            schema,
            name,
            logger,
        }
    }

    /// The finalized SQL text this handle dispatches.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Statement name, kept for plan-cache-naming symmetry with
    /// connection-based sessions. Nothing in this layer keys off it.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Execute in shaped mode.
    ///
    /// Fills the parameter template, logs once, dispatches in
    /// [`FetchMode::Array`] when field descriptors are bound, and maps every
    /// returned row. Without descriptors this degrades to raw passthrough —
    /// statements prepared without a projection have nothing to map.
    ///
    /// # Errors
    /// [`RemoteSqlError::MissingPlaceholderValue`] before dispatch,
    /// [`RemoteSqlError::MappingMismatch`] on a short row, or whatever the
    /// transport failed with, unchanged.
    pub async fn execute(
        &self,
        values: &PlaceholderValues,
    ) -> Result<ExecuteOutcome, RemoteSqlError> {
        let params = fill_placeholders(&self.params, values)?;
        self.logger.log_query(&self.sql, &params);

        let Some(schema) = &self.schema else {
            let response = self
                .transport
                .run(&self.sql, &params, FetchMode::Raw)
                .await?;
            return Ok(ExecuteOutcome::Raw(response));
        };

        let response = self
            .transport
            .run(&self.sql, &params, FetchMode::Array)
            .await?;
        match response.rows {
            TransportRows::RowSet(rows) => {
                Ok(ExecuteOutcome::Rows(map_result_rows(schema, &rows)?))
            }
            TransportRows::AffectedRows(_) => Ok(ExecuteOutcome::Raw(response)),
        }
    }

    /// Execute in raw/passthrough mode.
    ///
    /// Fills the parameter template, logs once, dispatches in
    /// [`FetchMode::Raw`], and returns the transport's response verbatim —
    /// field descriptors, if bound, are ignored.
    ///
    /// # Errors
    /// [`RemoteSqlError::MissingPlaceholderValue`] before dispatch, or the
    /// transport's own failure, unchanged.
    pub async fn all(
        &self,
        values: &PlaceholderValues,
    ) -> Result<TransportResponse, RemoteSqlError> {
        let params = fill_placeholders(&self.params, values)?;
        self.logger.log_query(&self.sql, &params);
        self.transport.run(&self.sql, &params, FetchMode::Raw).await
    }
}
