use std::fmt::Write as _;

use crate::types::RowValues;

/// Receives the final SQL text and the concrete, post-substitution parameter
/// list once per dispatch, before the transport runs.
pub trait QueryLogger: Send + Sync {
    fn log_query(&self, sql: &str, params: &[RowValues]);
}

/// Logger that discards everything. The default when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl QueryLogger for NoopLogger {
    fn log_query(&self, _sql: &str, _params: &[RowValues]) {}
}

/// Human-readable logger emitting one `tracing` event per dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLogger;

impl QueryLogger for DefaultLogger {
    fn log_query(&self, sql: &str, params: &[RowValues]) {
        let mut rendered = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                rendered.push_str(", ");
            }
            let _ = write!(rendered, "{param:?}");
        }
        tracing::debug!(target: "sql_remote_session", "Query: {sql} -- params: [{rendered}]");
    }
}
