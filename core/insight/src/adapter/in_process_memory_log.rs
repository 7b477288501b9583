//! プロセス内に保持する MemoryLog 実装（テスト・INSIGHT_MEMORY_BACKEND=memory）

use crate::domain::{MemoryRecord, Topic};
use crate::ports::outbound::MemoryLog;
use common::error::Error;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InProcessMemoryLog {
    topics: Mutex<HashMap<String, Vec<MemoryRecord>>>,
}

impl InProcessMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<MemoryRecord>>>, Error> {
        self.topics
            .lock()
            .map_err(|_| Error::system("memory log lock poisoned"))
    }
}

impl MemoryLog for InProcessMemoryLog {
    fn backend(&self) -> &str {
        "memory"
    }

    fn append(&self, topic: &Topic, record: &MemoryRecord) -> Result<(), Error> {
        self.lock()?
            .entry(topic.storage_key())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn load(&self, topic: &Topic) -> Result<Vec<MemoryRecord>, Error> {
        Ok(self
            .lock()?
            .get(&topic.storage_key())
            .cloned()
            .unwrap_or_default())
    }

    fn retain_newest(&self, topic: &Topic, keep: usize) -> Result<(), Error> {
        if let Some(records) = self.lock()?.get_mut(&topic.storage_key()) {
            let excess = records.len().saturating_sub(keep);
            records.drain(..excess);
        }
        Ok(())
    }
}
