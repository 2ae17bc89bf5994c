//! Tests for flush and search
//!
//! These tests verify:
//! - Flushing a MemTable produces a sorted, duplicate-free SSTable
//! - Last-write-wins survives the flush
//! - Search hits, misses and repeated lookups
//! - Distinct outcomes for missing files and corrupt tables
//! - The lenient lookup that collapses failures into "not found"

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sstkv::{
    flush, flush_with_config, search, search_lenient, search_with_config, Config, Lookup,
    MemTable, Record, SSTableReader, SstError,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sstable.sst");
    (temp_dir, path)
}

fn create_memtable_with_entries(entries: &[(&str, &str)]) -> MemTable {
    let mut memtable = MemTable::new();
    for (key, value) in entries {
        memtable.put(*key, *value);
    }
    memtable
}

fn read_all(path: &Path) -> Vec<Record> {
    let mut reader = SSTableReader::open(path).unwrap();
    let records = reader.iter().unwrap().map(|r| r.unwrap()).collect();
    records
}

fn random_key(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..12);
    (0..len).map(|_| rng.gen_range(b'a'..=b'f') as char).collect()
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[test]
fn test_fruit_and_vegetable_scenario() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[
        ("apple", "fruit"),
        ("carrot", "vegetable"),
        ("banana", "fruit"),
    ]);

    let sstable = flush(&memtable, &path).unwrap();
    assert_eq!(sstable.record_count(), 3);

    assert_eq!(
        read_all(&path),
        vec![
            Record::new("apple", "fruit"),
            Record::new("banana", "fruit"),
            Record::new("carrot", "vegetable"),
        ]
    );

    assert_eq!(search(&path, "carrot").unwrap(), Lookup::Found("vegetable".to_string()));
    assert_eq!(search(&path, "mango").unwrap(), Lookup::NotFound);
}

#[test]
fn test_last_write_wins_scenario() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[("x", "1"), ("x", "2")]);

    flush(&memtable, &path).unwrap();

    assert_eq!(search(&path, "x").unwrap(), Lookup::Found("2".to_string()));
    assert_eq!(read_all(&path), vec![Record::new("x", "2")]);
}

#[test]
fn test_flush_empty_memtable() {
    let (_temp, path) = setup_temp_dir();
    let memtable = MemTable::new();

    let sstable = flush(&memtable, &path).unwrap();

    assert_eq!(sstable.record_count(), 0);
    assert!(path.exists());
    assert!(read_all(&path).is_empty());
    assert_eq!(search(&path, "anything").unwrap(), Lookup::NotFound);
}

#[test]
fn test_flush_to_via_memtable() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[("k", "v")]);

    let sstable = memtable.flush_to(&path).unwrap();

    assert_eq!(sstable.path, path);
    assert_eq!(sstable.min_key, "k");
    assert_eq!(sstable.max_key, "k");
    assert_eq!(search(&path, "k").unwrap().value(), Some("v"));
}

// =============================================================================
// Property Tests
// =============================================================================

#[test]
fn test_random_puts_resolve_to_latest_value() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..20 {
        let (_temp, path) = setup_temp_dir();
        let mut memtable = MemTable::new();
        let mut expected: HashMap<String, String> = HashMap::new();

        for i in 0..rng.gen_range(0..200) {
            let key = random_key(&mut rng);
            let value = format!("r{}-v{}", round, i);
            memtable.put(key.clone(), value.clone());
            expected.insert(key, value);
        }

        let sstable = flush(&memtable, &path).unwrap();
        assert_eq!(sstable.record_count() as usize, expected.len());

        for (key, value) in &expected {
            assert_eq!(search(&path, key).unwrap(), Lookup::Found(value.clone()));
        }
    }
}

#[test]
fn test_random_flush_is_strictly_ascending() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let (_temp, path) = setup_temp_dir();
        let mut memtable = MemTable::new();

        for _ in 0..rng.gen_range(1..300) {
            memtable.put(random_key(&mut rng), "v");
        }

        flush(&memtable, &path).unwrap();

        let records = read_all(&path);
        assert_eq!(records.len(), memtable.len());
        assert!(records.windows(2).all(|w| w[0].key < w[1].key));
    }
}

#[test]
fn test_random_misses_not_found() {
    let mut rng = StdRng::seed_from_u64(7);
    let (_temp, path) = setup_temp_dir();
    let mut memtable = MemTable::new();

    for _ in 0..100 {
        memtable.put(random_key(&mut rng), "v");
    }
    flush(&memtable, &path).unwrap();

    for _ in 0..200 {
        // Uppercase keys are never generated by random_key
        let probe = format!("Z{}", random_key(&mut rng));
        assert!(!memtable.contains_key(&probe));
        assert_eq!(search(&path, &probe).unwrap(), Lookup::NotFound);
    }
}

#[test]
fn test_repeated_search_is_idempotent() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[("a", "1"), ("b", "2"), ("c", "3")]);
    flush(&memtable, &path).unwrap();

    for key in ["a", "b", "c", "d"] {
        let first = search(&path, key).unwrap();
        for _ in 0..5 {
            assert_eq!(search(&path, key).unwrap(), first);
        }
    }
}

#[test]
fn test_flush_same_memtable_twice() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.sst");
    let second = temp.path().join("second.sst");

    let memtable = create_memtable_with_entries(&[
        ("delta", "4"),
        ("alpha", "1"),
        ("charlie", "3"),
        ("bravo", "2"),
    ]);

    flush(&memtable, &first).unwrap();
    flush(&memtable, &second).unwrap();

    assert_eq!(read_all(&first), read_all(&second));
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_reflush_overwrites_table() {
    let (_temp, path) = setup_temp_dir();

    let old = create_memtable_with_entries(&[("old", "1"), ("shared", "old")]);
    flush(&old, &path).unwrap();

    let new = create_memtable_with_entries(&[("shared", "new")]);
    flush(&new, &path).unwrap();

    assert_eq!(search(&path, "old").unwrap(), Lookup::NotFound);
    assert_eq!(search(&path, "shared").unwrap(), Lookup::Found("new".to_string()));
    assert_eq!(read_all(&path).len(), 1);
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_flush_to_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing").join("sstable.sst");
    let memtable = create_memtable_with_entries(&[("k", "v")]);

    let result = flush(&memtable, &path);
    assert!(matches!(result, Err(SstError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_flush_oversized_record_fails() {
    let (_temp, path) = setup_temp_dir();
    let config = Config::builder().max_field_len(4).build().unwrap();
    let memtable = create_memtable_with_entries(&[("a", "ok"), ("b", "too long")]);

    let result = flush_with_config(&memtable, &path, &config);
    assert!(matches!(result, Err(SstError::RecordTooLarge { .. })));
}

#[test]
fn test_search_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("never_written.sst");

    let result = search(&path, "key");
    let err = result.unwrap_err();
    assert!(err.is_io());
    assert!(!err.is_corruption());
}

#[test]
fn test_search_corrupt_file_is_corruption() {
    let (_temp, path) = setup_temp_dir();
    fs::write(&path, b"this is not an sstable").unwrap();

    let err = search(&path, "key").unwrap_err();
    assert!(err.is_corruption());
}

#[test]
fn test_search_with_config_limits_field_len() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[("key", "a fairly long value")]);
    flush(&memtable, &path).unwrap();

    let strict = Config::builder().max_field_len(4).build().unwrap();
    let result = search_with_config(&path, "key", &strict);

    assert!(matches!(result, Err(SstError::Corruption(_))));
}

#[test]
fn test_search_lenient_collapses_failures() {
    let (_temp, path) = setup_temp_dir();
    let memtable = create_memtable_with_entries(&[("carrot", "vegetable")]);
    flush(&memtable, &path).unwrap();

    assert_eq!(search_lenient(&path, "carrot"), ("vegetable".to_string(), true));
    assert_eq!(search_lenient(&path, "mango"), (String::new(), false));

    let missing = path.with_file_name("missing.sst");
    assert_eq!(search_lenient(&missing, "carrot"), (String::new(), false));
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_accessors() {
    let found = Lookup::Found("v".to_string());
    assert!(found.is_found());
    assert_eq!(found.value(), Some("v"));
    assert_eq!(found.into_option(), Some("v".to_string()));

    let missing = Lookup::NotFound;
    assert!(!missing.is_found());
    assert_eq!(missing.value(), None);
    assert_eq!(missing.into_option(), None);
}
