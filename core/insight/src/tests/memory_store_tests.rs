//! MemoryStore（保存・上位 K 件検索）のテスト

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::adapter::{NoopLog, StdFileSystem};
use common::embedding::HashingEmbedder;
use common::error::Error;
use common::ports::outbound::Embedder;

use crate::adapter::{InProcessMemoryLog, JsonlMemoryLog};
use crate::domain::{MemoryRecord, Topic};
use crate::ports::outbound::MemoryLog;
use crate::usecase::memory::MemoryStore;

/// テキスト → 固定ベクトル。呼ばれた回数を数える。
struct TableEmbedder {
    table: HashMap<&'static str, Vec<f32>>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    fn new(entries: &[(&'static str, [f32; 2])]) -> Self {
        Self {
            table: entries.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Embedder for TableEmbedder {
    fn name(&self) -> &str {
        "table"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.table.get(text).cloned().unwrap_or_else(|| vec![0.0, 0.0]))
    }
}

struct BrokenLog;

impl MemoryLog for BrokenLog {
    fn backend(&self) -> &str {
        "broken"
    }
    fn append(&self, _topic: &Topic, _record: &MemoryRecord) -> Result<(), Error> {
        Err(Error::io_msg("Redis error: connection refused"))
    }
    fn load(&self, _topic: &Topic) -> Result<Vec<MemoryRecord>, Error> {
        Err(Error::io_msg("Redis error: connection refused"))
    }
    fn retain_newest(&self, _topic: &Topic, _keep: usize) -> Result<(), Error> {
        Ok(())
    }
}

fn sales() -> Topic {
    Topic::parse("sales").unwrap()
}

fn table_store(embedder: Arc<TableEmbedder>, cap: Option<usize>) -> MemoryStore {
    MemoryStore::new(Arc::new(InProcessMemoryLog::new()), embedder, cap, Arc::new(NoopLog))
}

fn axis_embedder() -> Arc<TableEmbedder> {
    Arc::new(TableEmbedder::new(&[
        ("east", [1.0, 0.0]),
        ("north", [0.0, 1.0]),
        ("east again", [2.0, 0.0]),
        ("north-east", [1.0, 1.0]),
        ("west", [-1.0, 0.0]),
        ("q-east", [1.0, 0.0]),
    ]))
}

#[test]
fn test_retrieve_from_empty_topic_is_empty() {
    let store = table_store(axis_embedder(), None);
    assert!(store.retrieve_top_k(&sales(), "q-east", 2).unwrap().is_empty());
}

#[test]
fn test_retrieve_exact_k_ordered_with_stable_ties() {
    let store = table_store(axis_embedder(), None);
    for t in ["north", "east", "north-east", "east again", "west"] {
        store.save(&sales(), t).unwrap();
    }
    // east と east again は同点（cosine 1.0）なので挿入順
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 2).unwrap(),
        vec!["east", "east again"]
    );
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 3).unwrap(),
        vec!["east", "east again", "north-east"]
    );
}

#[test]
fn test_retrieve_k_larger_than_n_returns_all_ranked() {
    let store = table_store(axis_embedder(), None);
    for t in ["west", "north", "east"] {
        store.save(&sales(), t).unwrap();
    }
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 10).unwrap(),
        vec!["east", "north", "west"]
    );
}

#[test]
fn test_retrieve_k_zero_skips_embedding() {
    let embedder = axis_embedder();
    let store = table_store(Arc::clone(&embedder), None);
    store.save(&sales(), "east").unwrap();
    let before = embedder.calls.load(Ordering::Relaxed);
    assert!(store.retrieve_top_k(&sales(), "q-east", 0).unwrap().is_empty());
    assert_eq!(embedder.calls.load(Ordering::Relaxed), before);
}

#[test]
fn test_zero_vector_query_keeps_insertion_order() {
    let store = table_store(axis_embedder(), None);
    for t in ["west", "north", "east"] {
        store.save(&sales(), t).unwrap();
    }
    assert_eq!(
        store.retrieve_top_k(&sales(), "unknown query", 2).unwrap(),
        vec!["west", "north"]
    );
}

#[test]
fn test_saving_same_text_twice_stores_identical_vectors() {
    let log = Arc::new(InProcessMemoryLog::new());
    let store = MemoryStore::new(
        log.clone(),
        Arc::new(HashingEmbedder::new(0).unwrap()),
        None,
        Arc::new(NoopLog),
    );
    store.save(&sales(), "Revenue grew 12% in Q3").unwrap();
    store.save(&sales(), "Revenue grew 12% in Q3").unwrap();
    let records = log.load(&sales()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].vector, records[1].vector);
    assert_eq!(records[0].vector.len(), 384);
}

#[test]
fn test_hashing_embedder_prefers_overlapping_text() {
    let store = MemoryStore::new(
        Arc::new(InProcessMemoryLog::new()),
        Arc::new(HashingEmbedder::new(0).unwrap()),
        None,
        Arc::new(NoopLog),
    );
    store
        .save(&sales(), "Warehouse staffing shortage caused shipping delays")
        .unwrap();
    store
        .save(&sales(), "Sales performance in Europe exceeded the quarterly target")
        .unwrap();
    let hits = store.retrieve_top_k(&sales(), "sales performance", 1).unwrap();
    assert_eq!(
        hits,
        vec!["Sales performance in Europe exceeded the quarterly target"]
    );
}

#[test]
fn test_cap_evicts_oldest_records() {
    let store = table_store(axis_embedder(), Some(2));
    for t in ["east", "north", "west"] {
        store.save(&sales(), t).unwrap();
    }
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 5).unwrap(),
        vec!["north", "west"]
    );
}

#[test]
fn test_cap_zero_keeps_topic_empty() {
    let store = table_store(axis_embedder(), Some(0));
    store.save(&sales(), "east").unwrap();
    assert!(store.retrieve_top_k(&sales(), "q-east", 5).unwrap().is_empty());
}

#[test]
fn test_records_with_other_dimension_are_skipped() {
    let log = Arc::new(InProcessMemoryLog::new());
    log.append(&sales(), &MemoryRecord::new("legacy", vec![1.0, 0.0, 0.0]))
        .unwrap();
    let store = MemoryStore::new(log, axis_embedder(), None, Arc::new(NoopLog));
    store.save(&sales(), "north").unwrap();
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 5).unwrap(),
        vec!["north"]
    );
}

#[test]
fn test_topics_are_independent() {
    let store = table_store(axis_embedder(), None);
    store.save(&sales(), "east").unwrap();
    let ops = Topic::parse("operations").unwrap();
    assert!(store.retrieve_top_k(&ops, "q-east", 2).unwrap().is_empty());
}

#[test]
fn test_storage_errors_propagate_as_io() {
    let store = MemoryStore::new(Arc::new(BrokenLog), axis_embedder(), None, Arc::new(NoopLog));
    assert_eq!(store.save(&sales(), "east").unwrap_err().exit_code(), 74);
    assert_eq!(
        store.retrieve_top_k(&sales(), "q-east", 2).unwrap_err().exit_code(),
        74
    );
}

#[test]
fn test_jsonl_backend_survives_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let make = || {
        MemoryStore::new(
            Arc::new(JsonlMemoryLog::new(Arc::new(StdFileSystem), dir.path().join("memory"))),
            axis_embedder(),
            None,
            Arc::new(NoopLog),
        )
    };
    make().save(&sales(), "north").unwrap();
    make().save(&sales(), "east").unwrap();
    assert_eq!(
        make().retrieve_top_k(&sales(), "q-east", 2).unwrap(),
        vec!["east", "north"]
    );
}
