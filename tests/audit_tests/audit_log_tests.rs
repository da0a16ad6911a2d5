//! Tests for AuditLog
//!
//! These tests verify:
//! - One line per append, in `[YYYY-MM-DD HH:MM:SS] text` form
//! - The log is only ever appended to
//! - The external link is (re)created and resolves to the log

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use treasure_manager::audit::AuditLog;
use treasure_manager::config::Config;
use treasure_manager::TreasureError;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log(hunt: &str) -> (TempDir, AuditLog) {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join(hunt)).unwrap();
    let config = Config::builder().base_dir(temp_dir.path()).build();
    (temp_dir, AuditLog::new(hunt, &config))
}

fn assert_line_shape(line: &str, description: &str) {
    // "[2024-01-02 03:04:05] " is 22 bytes
    assert_eq!(line.len(), 22 + description.len(), "line: {:?}", line);
    assert!(line.starts_with('['));
    assert_eq!(&line[20..22], "] ");
    let stamp = &line[1..20];
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    assert_eq!(&line[22..], description);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_writes_timestamped_line() {
    let (_temp, log) = setup_temp_log("pirate");

    log.append("Added treasure 1 by ann").unwrap();

    let content = fs::read_to_string(log.log_path()).unwrap();
    assert!(content.ends_with('\n'));
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_line_shape(lines[0], "Added treasure 1 by ann");
}

#[test]
fn test_append_is_monotonic() {
    let (_temp, log) = setup_temp_log("pirate");

    log.append("first").unwrap();
    let after_first = fs::read_to_string(log.log_path()).unwrap();
    log.append("second").unwrap();
    let after_second = fs::read_to_string(log.log_path()).unwrap();

    assert!(after_second.starts_with(&after_first));
    assert_eq!(after_second.lines().count(), 2);
    assert!(after_second.lines().last().unwrap().ends_with("] second"));
}

#[test]
fn test_append_without_hunt_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().base_dir(temp_dir.path()).build();
    let log = AuditLog::new("missing", &config);

    let result = log.append("anything");

    assert!(matches!(
        result,
        Err(TreasureError::SystemCall { step: "Failed to open log file", .. })
    ));
}

// =============================================================================
// Symlink Tests
// =============================================================================

#[cfg(unix)]
#[test]
fn test_link_points_at_log() {
    let (temp, log) = setup_temp_log("pirate");

    log.append("hello").unwrap();

    let link = temp.path().join("logged_hunt-pirate");
    assert_eq!(log.link_path(), link.as_path());
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), Path::new("pirate/logged_hunt"));
    assert_eq!(
        fs::canonicalize(&link).unwrap(),
        fs::canonicalize(log.log_path()).unwrap()
    );
    assert_eq!(fs::read_to_string(&link).unwrap(), fs::read_to_string(log.log_path()).unwrap());
}

#[cfg(unix)]
#[test]
fn test_link_replaces_stale_entry() {
    let (temp, log) = setup_temp_log("pirate");
    let link = temp.path().join("logged_hunt-pirate");

    // Something already sits where the link goes
    std::os::unix::fs::symlink("nowhere/at/all", &link).unwrap();

    log.append("hello").unwrap();

    assert_eq!(fs::read_link(&link).unwrap(), Path::new("pirate/logged_hunt"));
}

#[cfg(unix)]
#[test]
fn test_refresh_link_recreates_removed_link() {
    let (_temp, log) = setup_temp_log("pirate");
    log.append("hello").unwrap();
    fs::remove_file(log.link_path()).unwrap();

    log.refresh_link().unwrap();

    assert!(fs::symlink_metadata(log.link_path()).is_ok());
}
