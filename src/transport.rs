use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RemoteSqlError;
use crate::types::RowValues;

/// Which result shape a dispatch requests from the transport.
///
/// Set per statement, not negotiated per call. Both modes ask the driver to
/// keep temporal columns (timestamp/datetime/date) in lexical string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Positional row arrays, for field-descriptor-driven mapping.
    Array,
    /// Driver-native rows, returned unmapped.
    Raw,
}

/// The data portion of a transport response.
///
/// Statement kind decides the variant: SELECTs produce a row set, DML produces
/// an affected-row count. Explicitly tagged so call sites never shape-sniff.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportRows {
    /// Ordered rows, each an ordered sequence of column values.
    RowSet(Vec<Vec<RowValues>>),
    /// Rows affected by a DML statement.
    AffectedRows(u64),
}

/// What the transport hands back for one dispatch: the rows plus the driver's
/// column metadata. This layer checks the metadata only for existence.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub rows: TransportRows,
    pub columns: Option<Arc<Vec<String>>>,
}

impl TransportResponse {
    /// A row-set response with column metadata.
    #[must_use]
    pub fn row_set(rows: Vec<Vec<RowValues>>, columns: Vec<String>) -> Self {
        Self {
            rows: TransportRows::RowSet(rows),
            columns: Some(Arc::new(columns)),
        }
    }

    /// A DML response carrying only an affected-row count.
    #[must_use]
    pub fn affected(count: u64) -> Self {
        Self {
            rows: TransportRows::AffectedRows(count),
            columns: None,
        }
    }

    /// Borrow the row set, if this response carries one.
    #[must_use]
    pub fn row_set_ref(&self) -> Option<&[Vec<RowValues>]> {
        match &self.rows {
            TransportRows::RowSet(rows) => Some(rows),
            TransportRows::AffectedRows(_) => None,
        }
    }

    /// The affected-row count, if this response carries one.
    #[must_use]
    pub fn affected_rows(&self) -> Option<u64> {
        match self.rows {
            TransportRows::RowSet(_) => None,
            TransportRows::AffectedRows(count) => Some(count),
        }
    }

    /// Position of a named column in this response's metadata.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .as_ref()
            .and_then(|cols| cols.iter().position(|col| col == name))
    }
}

/// The sole wire-level boundary: whoever implements this owns the actual round
/// trip to the database (HTTP endpoint, serverless function, out-of-process
/// proxy). This layer borrows the implementation and never opens, pools, or
/// closes a connection itself.
///
/// Contract for implementors:
/// - bind `params` positionally, in the order given, against the markers in
///   `sql`;
/// - in [`FetchMode::Array`], return [`TransportRows::RowSet`] rows whose
///   values align 1:1 with the statement's selected columns;
/// - return temporal columns as [`RowValues::Text`] in their lexical form;
/// - surface failures as [`RemoteSqlError`] (typically via
///   [`RemoteSqlError::transport`]); they reach the caller untouched.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    async fn run(
        &self,
        sql: &str,
        params: &[RowValues],
        mode: FetchMode,
    ) -> Result<TransportResponse, RemoteSqlError>;
}
