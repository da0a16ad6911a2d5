//! Tests for RecordStore
//!
//! These tests verify:
//! - Appending and scanning records
//! - Short trailing chunks are treated as end of file
//! - Filter-and-rename removal (exclusivity, ordering, raw bytes)
//! - Not-found removal leaves the file untouched

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use treasure_manager::config::{Config, TextPolicy};
use treasure_manager::record::{Treasure, RECORD_SIZE};
use treasure_manager::store::RecordStore;
use treasure_manager::TreasureError;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let hunt_dir = temp_dir.path().join("hunt");
    fs::create_dir(&hunt_dir).unwrap();
    let store = RecordStore::new(&hunt_dir, &Config::default());
    (temp_dir, hunt_dir, store)
}

fn treasure(id: i32) -> Treasure {
    Treasure::new(
        id,
        format!("user{}", id),
        id as f64 * 1.5,
        -(id as f64) * 0.25,
        format!("clue number {}", id),
        id * 10,
    )
}

fn scan_all(store: &RecordStore) -> Vec<Treasure> {
    store.scan().unwrap().map(|r| r.unwrap()).collect()
}

// =============================================================================
// Append / Scan Tests
// =============================================================================

#[test]
fn test_append_creates_file() {
    let (_temp, _dir, store) = setup_temp_store();

    assert!(!store.exists());
    store.append(&treasure(1)).unwrap();

    assert!(store.exists());
    assert_eq!(fs::metadata(store.path()).unwrap().len(), RECORD_SIZE as u64);
}

#[test]
fn test_append_then_scan_roundtrip() {
    let (_temp, _dir, store) = setup_temp_store();
    let original = Treasure::new(1, "ann", 10.5, -20.25, "under the oak", 100);

    store.append(&original).unwrap();
    let records = scan_all(&store);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0], original);
    assert_eq!(records[0].latitude.to_bits(), 10.5f64.to_bits());
}

#[test]
fn test_scan_preserves_append_order() {
    let (_temp, _dir, store) = setup_temp_store();

    for id in [5, 3, 9, 1] {
        store.append(&treasure(id)).unwrap();
    }

    let ids: Vec<i32> = scan_all(&store).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5, 3, 9, 1]);
}

#[test]
fn test_duplicate_ids_are_stored() {
    let (_temp, _dir, store) = setup_temp_store();

    store.append(&treasure(1)).unwrap();
    store.append(&treasure(1)).unwrap();

    assert_eq!(scan_all(&store).len(), 2);
}

#[test]
fn test_scan_missing_file_fails() {
    let (_temp, _dir, store) = setup_temp_store();

    let result = store.scan();

    assert!(matches!(
        result,
        Err(TreasureError::SystemCall { step: "Failed to open treasures file", .. })
    ));
}

#[test]
fn test_scan_ignores_partial_trailing_record() {
    let (_temp, _dir, store) = setup_temp_store();
    store.append(&treasure(1)).unwrap();
    store.append(&treasure(2)).unwrap();

    // Simulate a torn write
    let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
    file.write_all(&[7u8; 100]).unwrap();
    drop(file);

    let ids: Vec<i32> = scan_all(&store).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_scan_empty_file() {
    let (_temp, _dir, store) = setup_temp_store();
    fs::write(store.path(), b"").unwrap();

    assert!(scan_all(&store).is_empty());
}

#[test]
fn test_find() {
    let (_temp, _dir, store) = setup_temp_store();
    for id in 1..=3 {
        store.append(&treasure(id)).unwrap();
    }

    assert_eq!(store.find(2).unwrap(), Some(treasure(2)));
    assert_eq!(store.find(42).unwrap(), None);
}

#[test]
fn test_append_rejects_oversized_text_under_reject_policy() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().text_policy(TextPolicy::Reject).build();
    let store = RecordStore::new(temp_dir.path(), &config);

    let result = store.append(&Treasure::new(1, "u".repeat(60), 0.0, 0.0, "", 0));

    assert!(matches!(result, Err(TreasureError::FieldTooLong { .. })));
    assert!(!store.exists());
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_leaves_n_minus_one_in_order() {
    let (_temp, _dir, store) = setup_temp_store();
    for id in 1..=5 {
        store.append(&treasure(id)).unwrap();
    }
    let before = fs::read(store.path()).unwrap();

    assert!(store.remove(3).unwrap());

    let after = fs::read(store.path()).unwrap();
    assert_eq!(after.len(), 4 * RECORD_SIZE);

    // Every survivor is bit-identical to its old encoding, in order
    let expected: Vec<u8> = before
        .chunks(RECORD_SIZE)
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .flat_map(|(_, chunk)| chunk.to_vec())
        .collect();
    assert_eq!(after, expected);
    assert!(!store.temp_path().exists());
}

#[test]
fn test_remove_preserves_bytes_after_text_terminators() {
    let (_temp, _dir, store) = setup_temp_store();

    // Records with junk after the NUL, as written by older tools
    let mut raw = Vec::new();
    for id in 1..=2i32 {
        let mut chunk = [0x5Au8; RECORD_SIZE];
        chunk[0..4].copy_from_slice(&id.to_le_bytes());
        chunk[4] = b'a';
        chunk[5] = 0;
        chunk[72] = 0;
        raw.extend_from_slice(&chunk);
    }
    fs::write(store.path(), &raw).unwrap();

    assert!(store.remove(1).unwrap());

    assert_eq!(fs::read(store.path()).unwrap(), raw[RECORD_SIZE..].to_vec());
}

#[test]
fn test_remove_not_found_leaves_file_unchanged() {
    let (_temp, _dir, store) = setup_temp_store();
    for id in 1..=3 {
        store.append(&treasure(id)).unwrap();
    }
    let before = fs::read(store.path()).unwrap();

    assert!(!store.remove(99).unwrap());

    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert!(!store.temp_path().exists());
}

#[test]
fn test_remove_matching_removes_all_matches() {
    let (_temp, _dir, store) = setup_temp_store();
    for id in [1, 2, 1, 3] {
        store.append(&treasure(id)).unwrap();
    }

    let removed = store.remove_matching(|t| t.id == 1).unwrap();

    assert_eq!(removed, 2);
    let ids: Vec<i32> = scan_all(&store).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_remove_last_record_leaves_empty_file() {
    let (_temp, _dir, store) = setup_temp_store();
    store.append(&treasure(1)).unwrap();

    assert!(store.remove(1).unwrap());

    assert!(store.exists());
    assert_eq!(fs::metadata(store.path()).unwrap().len(), 0);
}

#[test]
fn test_remove_drops_partial_tail() {
    let (_temp, _dir, store) = setup_temp_store();
    store.append(&treasure(1)).unwrap();
    store.append(&treasure(2)).unwrap();
    let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
    file.write_all(&[1u8; 10]).unwrap();
    drop(file);

    assert!(store.remove(1).unwrap());

    assert_eq!(fs::metadata(store.path()).unwrap().len(), RECORD_SIZE as u64);
}

#[test]
fn test_metadata_reports_size() {
    let (_temp, _dir, store) = setup_temp_store();
    store.append(&treasure(1)).unwrap();
    store.append(&treasure(2)).unwrap();

    let meta = store.metadata().unwrap();

    assert_eq!(meta.size, 2 * RECORD_SIZE as u64);
}
