//! Integration tests for plantid-store
//!
//! These tests drive the full read-modify-write cycle of the history blob
//! through both backends.

use plantid_domain::traits::BlobStore;
use plantid_domain::{EntryId, Origin, RecognitionInfo};
use plantid_store::{
    HistoryConfig, HistoryStore, MemoryBlobStore, SqliteBlobStore, StoreError,
    DEFAULT_CAPACITY, DEFAULT_HISTORY_KEY,
};

fn plant(common: &str, scientific: &str) -> RecognitionInfo {
    RecognitionInfo {
        common_name: common.to_string(),
        scientific_name: scientific.to_string(),
        kind: "thực vật".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_duplicate_append_stores_one_entry() {
    let mut history = HistoryStore::with_defaults(SqliteBlobStore::new(":memory:").unwrap());

    let first = history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();
    let second = history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(history.list().unwrap().len(), 1);
}

#[test]
fn test_duplicate_detected_beyond_head() {
    let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
    history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();
    history
        .append("file:///sen.jpg", plant("Hoa sen", "Nelumbo nucifera"))
        .unwrap();

    // The first entry is no longer at the head of the list
    let again = history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();
    assert!(again.is_none());
    assert_eq!(history.list().unwrap().len(), 2);
}

#[test]
fn test_retention_cap_evicts_oldest() {
    let mut history = HistoryStore::with_defaults(SqliteBlobStore::new(":memory:").unwrap());

    for i in 0..=DEFAULT_CAPACITY {
        let recorded = history
            .append(
                &format!("file:///photo-{}.jpg", i),
                plant("", &format!("Species {}", i)),
            )
            .unwrap();
        assert!(recorded.is_some());
    }

    let entries = history.list().unwrap();
    assert_eq!(entries.len(), DEFAULT_CAPACITY);
    assert_eq!(
        entries[0].info.scientific_name,
        format!("Species {}", DEFAULT_CAPACITY)
    );
    assert_eq!(entries[DEFAULT_CAPACITY - 1].info.scientific_name, "Species 1");
    assert!(history.search("Species 0").unwrap().iter().all(|e| e.info.scientific_name != "Species 0"));
}

#[test]
fn test_newest_first_timestamps() {
    let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
    for i in 0..5 {
        history
            .append(&format!("file:///{}.jpg", i), plant("", &format!("S{}", i)))
            .unwrap();
    }

    let entries = history.list().unwrap();
    for pair in entries.windows(2) {
        assert!(pair[0].timestamp_ms >= pair[1].timestamp_ms);
    }
}

#[test]
fn test_remove_is_idempotent() {
    let mut history = HistoryStore::with_defaults(SqliteBlobStore::new(":memory:").unwrap());
    let entry = history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap()
        .unwrap();
    history
        .append("file:///sen.jpg", plant("Hoa sen", "Nelumbo nucifera"))
        .unwrap();

    assert!(history.remove(entry.id).unwrap());
    assert!(!history.remove(entry.id).unwrap());
    assert!(!history.remove(EntryId::new()).unwrap());

    let remaining = history.list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].info.common_name, "Hoa sen");
}

#[test]
fn test_search_filters_in_order() {
    let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
    history
        .append("file:///1.jpg", plant("Hoa hồng", "Rosa chinensis"))
        .unwrap();
    history
        .append("file:///2.jpg", plant("Hoa sen", "Nelumbo nucifera"))
        .unwrap();
    history
        .append("file:///3.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();

    let hits = history.search("HOA").unwrap();
    let names: Vec<_> = hits.iter().map(|e| e.info.common_name.as_str()).collect();
    assert_eq!(names, vec!["Hoa sen", "Hoa hồng"]);

    assert_eq!(history.search("").unwrap(), history.list().unwrap());
}

#[test]
fn test_replay_is_never_recorded() {
    let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
    let entry = history
        .observe(
            "file:///mai.jpg",
            plant("Mai vàng", "Ochna integerrima"),
            Origin::Live,
        )
        .unwrap()
        .unwrap();
    history.remove(entry.id).unwrap();

    // Showing a stored entry again goes through observe(Replay)
    history
        .observe("file:///mai.jpg", entry.info.clone(), Origin::Replay)
        .unwrap();
    assert!(history.list().unwrap().is_empty());
}

#[test]
fn test_failed_write_keeps_previous_state() {
    let mut history = HistoryStore::with_defaults(MemoryBlobStore::new());
    history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();
    let before = history.list().unwrap();

    history.backend_mut().set_fail_writes(true);
    let result = history.append("file:///sen.jpg", plant("Hoa sen", "Nelumbo nucifera"));
    assert!(matches!(result, Err(StoreError::Backend(_))));
    assert!(history.remove(before[0].id).is_err());

    assert_eq!(history.list().unwrap(), before);

    history.backend_mut().set_fail_writes(false);
    assert!(history
        .append("file:///sen.jpg", plant("Hoa sen", "Nelumbo nucifera"))
        .unwrap()
        .is_some());
}

#[test]
fn test_reads_legacy_blob() {
    let mut backend = MemoryBlobStore::new();
    let legacy = r#"[
        {
            "id": "018f9a3c-1111-7000-8000-000000000001",
            "timestamp": 1718000000000,
            "image": "file:///sen.jpg",
            "info": {"commonName": "Hoa sen", "scientificName": "Nelumbo nucifera"}
        },
        {
            "id": "1717000000000",
            "image": "file:///mai.jpg",
            "common": "Mai vàng",
            "scientific": "Ochna integerrima",
            "createdAt": "2024-05-29T16:26:40Z"
        }
    ]"#;
    backend.put(DEFAULT_HISTORY_KEY, legacy).unwrap();

    let mut history = HistoryStore::with_defaults(backend);
    let entries = history.list().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].info.description, "");
    assert_eq!(entries[1].info.common_name, "Mai vàng");
    assert_eq!(entries[1].timestamp_ms, 1_717_000_000_000);

    // Legacy entries take part in duplicate detection and removal
    assert!(history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap()
        .is_none());
    assert!(history.remove(entries[1].id).unwrap());

    // Rewritten in the current shape
    let blob = history.backend().get(DEFAULT_HISTORY_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["info"]["scientificName"], "Nelumbo nucifera");
}

#[test]
fn test_string_timestamp_entry_survives_append() {
    let mut backend = MemoryBlobStore::new();
    let stored = r#"[{
        "id": "9b2f0c1e-3c4a-4f7e-9a55-0d8c7f1e2a3b",
        "timestamp": "1718000000000",
        "image": "file:///old.jpg",
        "info": {"commonName": "Hoa sen", "scientificName": "Nelumbo nucifera"}
    }]"#;
    backend.put(DEFAULT_HISTORY_KEY, stored).unwrap();

    let mut history = HistoryStore::with_defaults(backend);
    let before = history.list().unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].timestamp_ms, 1_718_000_000_000);

    history
        .append("file:///new.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap()
        .unwrap();

    let names: Vec<_> = history
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.info.scientific_name)
        .collect();
    assert_eq!(names, vec!["Ochna integerrima", "Nelumbo nucifera"]);
}

#[test]
fn test_unreadable_items_are_written_back() {
    let mut backend = MemoryBlobStore::new();
    let stored = r#"[
        {"id": "018f9a3c-1111-7000-8000-000000000001", "timestamp": 1718000000000,
         "image": "file:///sen.jpg", "info": {"scientificName": "Nelumbo nucifera"}},
        {"id": "broken", "image": "file:///x.jpg", "info": "not an object"},
        7
    ]"#;
    backend.put(DEFAULT_HISTORY_KEY, stored).unwrap();

    let config = HistoryConfig {
        capacity: 1,
        ..Default::default()
    };
    let mut history = HistoryStore::new(backend, config).unwrap();
    assert_eq!(history.list().unwrap().len(), 1);

    let added = history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap()
        .unwrap();
    assert!(history.remove(added.id).unwrap());

    let blob = history.backend().get(DEFAULT_HISTORY_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"id": "broken", "image": "file:///x.jpg", "info": "not an object"},
            7
        ])
    );
    assert!(history.list().unwrap().is_empty());
}

#[test]
fn test_corrupt_blob_is_reported() {
    let mut backend = MemoryBlobStore::new();
    backend.put(DEFAULT_HISTORY_KEY, r#"{"not": "a list"}"#).unwrap();

    let mut history = HistoryStore::with_defaults(backend);
    assert!(matches!(history.list(), Err(StoreError::InvalidData(_))));
    assert!(history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .is_err());

    history.clear().unwrap();
    assert!(history.list().unwrap().is_empty());
}

#[test]
fn test_custom_key_is_isolated() {
    let config = HistoryConfig {
        key: "otherHistory".to_string(),
        capacity: 10,
    };
    let mut history = HistoryStore::new(MemoryBlobStore::new(), config).unwrap();
    history
        .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
        .unwrap();

    let backend = history.into_inner();
    assert!(backend.get(DEFAULT_HISTORY_KEY).unwrap().is_none());
    assert!(backend.get("otherHistory").unwrap().is_some());
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plantid.db");

    let entry = {
        let mut history = HistoryStore::with_defaults(SqliteBlobStore::new(&path).unwrap());
        history
            .append("file:///mai.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap()
            .unwrap()
    };

    let history = HistoryStore::with_defaults(SqliteBlobStore::new(&path).unwrap());
    let entries = history.list().unwrap();
    assert_eq!(entries, vec![entry]);
    assert!(history
        .backend()
        .updated_at(DEFAULT_HISTORY_KEY)
        .unwrap()
        .is_some());
}
