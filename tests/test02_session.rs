use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sql_remote_session::{
    FetchMode, LoggerConfig, ParamValue, PlaceholderValues, Query, QueryLogger, RemoteSession,
    RemoteSqlError, RemoteTransport, RowValues, SessionConfig, TransportResponse,
};
use tokio::runtime::Runtime;

/// Shared event log asserting the order of logger and transport activity.
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct RecordingLogger {
    events: EventLog,
}

impl QueryLogger for RecordingLogger {
    fn log_query(&self, sql: &str, params: &[RowValues]) {
        self.events.push(format!("log:{sql}:{}", params.len()));
    }
}

struct TracingTransport {
    events: EventLog,
}

#[async_trait::async_trait]
impl RemoteTransport for TracingTransport {
    async fn run(
        &self,
        sql: &str,
        _params: &[RowValues],
        _mode: FetchMode,
    ) -> Result<TransportResponse, RemoteSqlError> {
        self.events.push(format!("transport:{sql}"));
        Ok(TransportResponse::row_set(Vec::new(), Vec::new()))
    }
}

struct FailingTransport {
    attempts: AtomicUsize,
    message: &'static str,
}

#[async_trait::async_trait]
impl RemoteTransport for FailingTransport {
    async fn run(
        &self,
        _sql: &str,
        _params: &[RowValues],
        _mode: FetchMode,
    ) -> Result<TransportResponse, RemoteSqlError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(RemoteSqlError::transport(std::io::Error::other(
            self.message,
        )))
    }
}

fn logged_session(events: &EventLog) -> RemoteSession {
    let transport = Arc::new(TracingTransport {
        events: events.clone(),
    });
    let logger = Arc::new(RecordingLogger {
        events: events.clone(),
    });
    RemoteSession::new(
        transport,
        SessionConfig::new().with_logger(LoggerConfig::Custom(logger)),
    )
}

#[test]
fn prepared_dispatch_logs_once_before_transport() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let events = EventLog::default();
        let session = logged_session(&events);
        let prepared = session.prepare_query(
            Query::new(
                "SELECT id FROM users WHERE id = ?",
                vec![ParamValue::Placeholder("id".to_string())],
            ),
            None,
            None,
        );
        let values: PlaceholderValues =
            [("id".to_string(), RowValues::Int(42))].into_iter().collect();

        prepared.execute(&values).await?;
        assert_eq!(
            events.events(),
            vec![
                "log:SELECT id FROM users WHERE id = ?:1".to_string(),
                "transport:SELECT id FROM users WHERE id = ?".to_string(),
            ]
        );

        prepared.all(&values).await?;
        let events = events.events();
        assert_eq!(events.len(), 4);
        assert!(events[2].starts_with("log:"));
        assert!(events[3].starts_with("transport:"));
        Ok(())
    })
}

#[test]
fn one_shot_query_logs_but_query_object_does_not() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let events = EventLog::default();
        let session = logged_session(&events);

        session
            .query("INSERT INTO __migrations (hash) VALUES (?)", &[RowValues::Text("abc".into())])
            .await?;
        assert_eq!(
            events.events(),
            vec![
                "log:INSERT INTO __migrations (hash) VALUES (?):1".to_string(),
                "transport:INSERT INTO __migrations (hash) VALUES (?)".to_string(),
            ]
        );

        session
            .query_object("SELECT hash FROM __migrations", &[])
            .await?;
        let events = events.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], "transport:SELECT hash FROM __migrations");
        Ok(())
    })
}

#[test]
fn transport_failure_passes_through_without_retry() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let transport = Arc::new(FailingTransport {
            attempts: AtomicUsize::new(0),
            message: "proxy returned HTTP 502",
        });
        let session = RemoteSession::new(transport.clone(), SessionConfig::new());

        let err = session.query("SELECT 1", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "proxy returned HTTP 502");
        assert!(matches!(err, RemoteSqlError::TransportFailure(_)));
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);

        let prepared =
            session.prepare_query(Query::new_without_params("SELECT 1"), None, None);
        let err = prepared.execute(&PlaceholderValues::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "proxy returned HTTP 502");
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 2);

        let err = prepared.all(&PlaceholderValues::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "proxy returned HTTP 502");
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 3);
        Ok(())
    })
}

#[test]
fn sessions_and_handles_serve_concurrent_calls() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let events = EventLog::default();
        let session = logged_session(&events);
        let prepared = Arc::new(session.prepare_query(
            Query::new(
                "SELECT id FROM users WHERE id = ?",
                vec![ParamValue::Placeholder("id".to_string())],
            ),
            None,
            None,
        ));

        let mut handles = Vec::new();
        for n in 0..8 {
            let prepared = Arc::clone(&prepared);
            handles.push(tokio::spawn(async move {
                let values: PlaceholderValues =
                    [("id".to_string(), RowValues::Int(n))].into_iter().collect();
                prepared.execute(&values).await
            }));
        }
        for handle in handles {
            handle.await??;
        }

        // Eight independent invocations: one log and one dispatch each.
        let events = events.events();
        assert_eq!(events.len(), 16);
        assert_eq!(events.iter().filter(|e| e.starts_with("log:")).count(), 8);
        Ok(())
    })
}

#[test]
fn default_and_disabled_loggers_construct() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let events = EventLog::default();
        let transport = Arc::new(TracingTransport {
            events: events.clone(),
        });

        let quiet = RemoteSession::new(transport.clone(), SessionConfig::new());
        quiet.query("SELECT 1", &[]).await?;

        let verbose = RemoteSession::new(
            transport,
            SessionConfig::new().with_logger(LoggerConfig::Default),
        );
        verbose.query("SELECT 1", &[]).await?;

        // Neither built-in logger touches our event log; both dispatches ran.
        assert_eq!(events.events().len(), 2);
        Ok(())
    })
}
