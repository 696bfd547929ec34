use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use glue_options::{OptionsError, ResolvedOptions, resolved_options};
use tracing::Level;

resolved_options! {
    struct ConnectionOptions {
        db_port: integer,
        db_settings: object,
    }
}

/// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer lock poisoned")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn resolve_with_captured_logs(resolved: &HashMap<&str, &str>) -> (Result<ConnectionOptions, OptionsError>, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || ConnectionOptions::from_resolved_options(resolved));
    (result, logs.contents())
}

#[test]
fn rejected_values_are_not_logged() {
    let resolved = HashMap::from([("JOB_NAME", "etl-1"), ("DB_PORT", "p0rt-from-vault"), ("DB_SETTINGS", "{}")]);

    let (result, logs) = resolve_with_captured_logs(&resolved);

    let error = result.expect_err("port is not an integer");
    assert_eq!(error.field(), "db_port");
    assert!(logs.contains("resolved option rejected"), "logs: {logs}");
    assert!(logs.contains("db_port"), "logs: {logs}");
    assert!(logs.contains("type_conversion"), "logs: {logs}");
    assert!(!logs.contains("p0rt-from-vault"), "raw value leaked into logs: {logs}");
}

#[test]
fn resolved_values_are_not_logged() {
    let resolved = HashMap::from([
        ("JOB_NAME", "etl-1"),
        ("DB_PORT", "5432"),
        ("DB_SETTINGS", r#"{"password": "s3cr3t-value"}"#),
    ]);

    let (result, logs) = resolve_with_captured_logs(&resolved);

    let options = result.expect("options resolve");
    assert_eq!(options.db_port(), 5432);
    assert!(logs.contains("db_settings"), "logs: {logs}");
    assert!(!logs.contains("s3cr3t-value"), "raw value leaked into logs: {logs}");
}
