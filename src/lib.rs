//! Async remote query-execution session.
//!
//! A SQL-speaking caller hands this layer logical queries (SQL text plus a
//! positional parameter template); the actual round trip to a database is
//! performed by an externally supplied [`RemoteTransport`] — an HTTP endpoint,
//! a serverless function, an out-of-process proxy. Per dispatch, the core:
//!
//! 1. fills named placeholder markers from a runtime value bag
//!    ([`fill_placeholders`]);
//! 2. dispatches the bound query through the transport exactly once;
//! 3. reshapes raw rows into typed, column-mapped records — or passes the
//!    driver-native shape through untouched — honoring nested-object
//!    nullability for outer-joined tables ([`mapper`]).
//!
//! No transactions, pooling, retries, cancellation, or streaming live here;
//! connection concerns belong entirely to the transport's owner.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sql_remote_session::{
//!     FetchMode, ParamValue, Query, RemoteSession, RemoteSqlError, RemoteTransport,
//!     RowValues, SessionConfig, TransportResponse,
//! };
//!
//! struct HttpTransport { /* endpoint, client, ... */ }
//!
//! #[async_trait::async_trait]
//! impl RemoteTransport for HttpTransport {
//!     async fn run(
//!         &self,
//!         sql: &str,
//!         params: &[RowValues],
//!         mode: FetchMode,
//!     ) -> Result<TransportResponse, RemoteSqlError> {
//!         // POST {sql, params, mode} to the proxy and decode the response.
//!         # unimplemented!()
//!     }
//! }
//!
//! # async fn demo() -> Result<(), RemoteSqlError> {
//! let session = RemoteSession::new(Arc::new(HttpTransport {}), SessionConfig::new());
//! let query = Query::new(
//!     "SELECT id, name FROM users WHERE id = ?",
//!     vec![ParamValue::Placeholder("id".into())],
//! );
//! let prepared = session.prepare_query(query, None, None);
//! let values = [("id".to_string(), RowValues::Int(1))].into_iter().collect();
//! let result = prepared.execute(&values).await?;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fields;
pub mod logger;
pub mod mapper;
pub mod placeholders;
pub mod query;
pub mod session;
pub mod transport;
pub mod types;

pub use error::{RemoteSqlError, TransportError};
pub use fields::{ColumnKind, JoinNullability, SelectField, SelectSchema};
pub use logger::{DefaultLogger, NoopLogger, QueryLogger};
pub use mapper::{map_result_row, map_result_rows};
pub use placeholders::fill_placeholders;
pub use query::{ExecuteOutcome, PreparedQuery};
pub use session::{LoggerConfig, RemoteSession, SessionConfig};
pub use transport::{FetchMode, RemoteTransport, TransportResponse, TransportRows};
pub use types::{ParamValue, PlaceholderValues, Query, RowValues};
