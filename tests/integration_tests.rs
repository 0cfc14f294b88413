//! Integration tests for the audit trail system
//!
//! These tests verify:
//! - Construction-time validation of destinations and patterns
//! - Activation, re-activation, and the inert state
//! - The audit line wire format
//! - Logger equality for host-side deduplication
//! - File and network sinks through the default resolver

use audit_trail_system::audit;
use audit_trail_system::prelude::*;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[derive(Default)]
struct MemoryResolver {
    lines: Arc<Mutex<Vec<String>>>,
}

impl SinkResolver for MemoryResolver {
    fn open(&self, _destination: &Destination) -> Result<Box<dyn Sink>> {
        Ok(Box::new(MemorySink {
            lines: Arc::clone(&self.lines),
        }))
    }
}

struct FailingResolver;

impl SinkResolver for FailingResolver {
    fn open(&self, destination: &Destination) -> Result<Box<dyn Sink>> {
        Err(AuditError::activation(destination.kind(), "out of order"))
    }
}

#[test]
fn test_construction_accepts_all_console_targets() {
    for target in ConsoleTarget::ALL {
        for pattern in ["%Y-%m-%d %H:%M:%S", "%H:%M", "%d/%b/%Y:%H:%M:%S %z"] {
            let config = LoggerConfig::console(target, pattern)
                .expect("valid target and pattern should construct");
            assert_eq!(config.destination(), &Destination::Console(target));
            assert_eq!(config.pattern().as_str(), pattern);
        }
    }
}

#[test]
fn test_unsupported_destination_is_rejected() {
    let err = "SYSLOG".parse::<ConsoleTarget>().unwrap_err();
    assert!(matches!(err, AuditError::UnsupportedDestination { .. }));

    let err = "STD_MIDDLE".parse::<ConsoleTarget>().unwrap_err();
    assert!(matches!(err, AuditError::UnsupportedDestination { .. }));
}

#[test]
fn test_invalid_pattern_is_rejected_at_construction() {
    let err = LoggerConfig::console(ConsoleTarget::StdOut, "%Q").unwrap_err();
    assert!(matches!(err, AuditError::InvalidPattern { .. }));

    let err = LoggerConfig::file("/tmp/audit.log", "%Y-%m-%d %").unwrap_err();
    assert!(matches!(err, AuditError::InvalidPattern { .. }));
}

#[test]
fn test_log_line_format() {
    let config = LoggerConfig::console(ConsoleTarget::StdOut, "%Y-%m-%d %H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    let resolver = MemoryResolver::default();
    logger.activate_with(&resolver).unwrap();

    logger.log("hello").unwrap();

    let lines = resolver.lines.lock();
    assert_eq!(lines.len(), 1, "one event must produce exactly one line");

    let (timestamp, event) = lines[0]
        .split_once(" - ")
        .expect("line must be '<timestamp> - <event>'");
    assert_eq!(event, "hello");
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .expect("timestamp must render with the configured pattern");
}

#[test]
fn test_example_audit_event() {
    let config = LoggerConfig::console(ConsoleTarget::StdOut, "%Y-%m-%d %H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    let resolver = MemoryResolver::default();
    logger.activate_with(&resolver).unwrap();

    logger.log("user admin deleted job foo").unwrap();

    let lines = resolver.lines.lock();
    assert_eq!(lines.len(), 1);
    // e.g. "2024-01-15 10:30:00 - user admin deleted job foo"
    assert!(lines[0].ends_with(" - user admin deleted job foo"));
    assert_eq!(lines[0].len(), 19 + " - user admin deleted job foo".len());
}

#[test]
fn test_reactivation_is_idempotent() {
    let config = LoggerConfig::console(ConsoleTarget::StdOut, "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    let resolver = MemoryResolver::default();

    logger.activate_with(&resolver).unwrap();
    logger.activate_with(&resolver).unwrap();
    logger.log("x").unwrap();

    let lines = resolver.lines.lock();
    assert_eq!(lines.len(), 1, "no duplication after double activation");
    assert!(lines[0].ends_with(" - x"));
}

#[test]
fn test_log_before_activation_is_an_explicit_error() {
    let config = LoggerConfig::console(ConsoleTarget::StdErr, "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);

    let err = logger.log("too early").unwrap_err();
    assert!(matches!(err, AuditError::NotActivated));
}

#[test]
fn test_failed_reactivation_keeps_last_known_good_binding() {
    let config = LoggerConfig::console(ConsoleTarget::StdOut, "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    let resolver = MemoryResolver::default();
    logger.activate_with(&resolver).unwrap();
    logger.log("before").unwrap();

    let err = logger.activate_with(&FailingResolver).unwrap_err();
    assert!(matches!(err, AuditError::Activation { .. }));

    logger.log("after").unwrap();

    let lines = resolver.lines.lock();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(" - after"));
}

#[test]
fn test_equal_configs_deduplicate() {
    let a = AuditLogger::new(LoggerConfig::console(ConsoleTarget::StdOut, "%H:%M:%S").unwrap());
    let b = AuditLogger::new(LoggerConfig::console(ConsoleTarget::StdOut, "%H:%M:%S").unwrap());
    let c = AuditLogger::new(LoggerConfig::console(ConsoleTarget::StdErr, "%H:%M:%S").unwrap());

    // Activation state must not affect identity
    b.activate_with(&MemoryResolver::default()).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);

    let mut set = HashSet::new();
    set.insert(a);
    set.insert(b);
    set.insert(c);
    assert_eq!(set.len(), 2, "reloaded duplicates collapse to one");
}

#[test]
fn test_file_logger_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("audit.log");

    let config = LoggerConfig::file(&log_file, "%Y-%m-%d %H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    logger.activate().unwrap();

    logger.log("user admin created job foo").unwrap();
    logger.log("user admin deleted job foo").unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" - user admin created job foo"));
    assert!(lines[1].ends_with(" - user admin deleted job foo"));
}

#[test]
fn test_file_logger_reactivation_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("audit.log");

    let config = LoggerConfig::file(&log_file, "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);

    logger.activate().unwrap();
    logger.log("first cycle").unwrap();

    // Host reloads its configuration and re-activates every logger
    logger.activate().unwrap();
    logger.log("second cycle").unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "re-activation must append, not truncate");
    assert!(lines[0].ends_with(" - first cycle"));
    assert!(lines[1].ends_with(" - second cycle"));
}

#[test]
fn test_file_activation_failure_propagates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    // A directory is not an openable log file
    let config = LoggerConfig::file(temp_dir.path(), "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);

    let err = logger.activate().unwrap_err();
    assert!(matches!(err, AuditError::Activation { .. }));
    assert!(!logger.is_active());
}

#[test]
fn test_independent_logger_instances() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_a = temp_dir.path().join("a.log");
    let file_b = temp_dir.path().join("b.log");

    let logger_a = AuditLogger::new(LoggerConfig::file(&file_a, "%H:%M:%S").unwrap());
    let logger_b = AuditLogger::new(LoggerConfig::file(&file_b, "%H:%M:%S").unwrap());
    logger_a.activate().unwrap();
    logger_b.activate().unwrap();

    // Fan-out of one event to every configured logger is the caller's job
    for logger in [&logger_a, &logger_b] {
        logger.log("user admin enabled job bar").unwrap();
    }
    logger_a.log("only for a").unwrap();

    let content_a = fs::read_to_string(&file_a).unwrap();
    let content_b = fs::read_to_string(&file_b).unwrap();
    assert_eq!(content_a.lines().count(), 2);
    assert_eq!(content_b.lines().count(), 1);
    assert!(!content_b.contains("only for a"));
}

#[test]
fn test_network_logger_end_to_end() {
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let server = std::thread::spawn(move || {
        let (socket, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(socket);
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        line
    });

    let config = LoggerConfig::network(address, "%Y-%m-%d %H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    logger.activate().unwrap();
    logger.log("user admin updated node agent").unwrap();
    drop(logger);

    let received = server.join().unwrap();
    assert!(received.ends_with(" - user admin updated node agent\n"));
}

#[test]
fn test_audit_macro_formats_events() {
    let config = LoggerConfig::console(ConsoleTarget::StdOut, "%H:%M:%S").unwrap();
    let logger = AuditLogger::new(config);
    let resolver = MemoryResolver::default();
    logger.activate_with(&resolver).unwrap();

    let user = "admin";
    audit!(logger, "user {} deleted job {}", user, "foo").unwrap();

    let lines = resolver.lines.lock();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - user admin deleted job foo"));
}

#[test]
fn test_config_rehydration_roundtrip() {
    let config = LoggerConfig::console(ConsoleTarget::StdErr, "%Y-%m-%d %H:%M:%S").unwrap();
    let json = serde_json::to_string(&config).expect("serialize");
    let rehydrated: LoggerConfig = serde_json::from_str(&json).expect("deserialize");

    // A logger rebuilt from persisted settings is the same logger
    assert_eq!(AuditLogger::new(config), AuditLogger::new(rehydrated));
}
