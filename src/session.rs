use std::sync::Arc;

use crate::error::RemoteSqlError;
use crate::fields::SelectSchema;
use crate::logger::{DefaultLogger, NoopLogger, QueryLogger};
use crate::query::PreparedQuery;
use crate::transport::{FetchMode, RemoteTransport, TransportResponse};
use crate::types::{Query, RowValues};

/// How the session logs dispatched queries.
#[derive(Clone, Default)]
pub enum LoggerConfig {
    /// No logging.
    #[default]
    Disabled,
    /// The built-in human-readable logger.
    Default,
    /// A caller-supplied logger instance.
    Custom(Arc<dyn QueryLogger>),
}

impl std::fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerConfig::Disabled => f.write_str("Disabled"),
            LoggerConfig::Default => f.write_str("Default"),
            LoggerConfig::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Construction-time session options.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub logger: LoggerConfig,
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }
}

/// Session-level facade over an injected transport.
///
/// Stateless for its whole lifetime: it holds the transport and logger, hands
/// out [`PreparedQuery`] handles, and offers one-shot dispatch for
/// internal/administrative statements. It never opens, pools, or closes a
/// physical connection — that is entirely the transport owner's concern.
#[derive(Clone)]
pub struct RemoteSession {
    transport: Arc<dyn RemoteTransport>,
    logger: Arc<dyn QueryLogger>,
}

impl std::fmt::Debug for RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSession").finish_non_exhaustive()
    }
}

impl RemoteSession {
    /// Create a session over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn RemoteTransport>, config: SessionConfig) -> Self {
        let logger: Arc<dyn QueryLogger> = match config.logger {
            LoggerConfig::Disabled => Arc::new(NoopLogger),
            LoggerConfig::Default => Arc::new(DefaultLogger),
            LoggerConfig::Custom(logger) => logger,
        };
        Self { transport, logger }
    }

    /// Bind a compiled query to this session's transport and logger.
    ///
    /// Always returns a fresh handle; `name` is accepted for plan-cache-naming
    /// symmetry with connection-based sessions but deduplicates nothing here.
    #[must_use]
    pub fn prepare_query(
        &self,
        query: Query,
        schema: Option<SelectSchema>,
        name: Option<String>,
    ) -> PreparedQuery {
        PreparedQuery::new(
            Arc::clone(&self.transport),
            query.sql,
            query.params,
            schema,
            name,
            Arc::clone(&self.logger),
        )
    }

    /// One-shot raw dispatch, bypassing the prepared-query abstraction. Logs
    /// before dispatch.
    ///
    /// # Errors
    /// Propagates the transport's failure unchanged.
    pub async fn query(
        &self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<TransportResponse, RemoteSqlError> {
        self.logger.log_query(sql, params);
        self.transport.run(sql, params, FetchMode::Raw).await
    }

    /// One-shot raw dispatch without logging, for bookkeeping statements
    /// (e.g. migration state reads) that should stay out of query logs.
    ///
    /// # Errors
    /// Propagates the transport's failure unchanged.
    pub async fn query_object(
        &self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<TransportResponse, RemoteSqlError> {
        self.transport.run(sql, params, FetchMode::Raw).await
    }
}
