//! トピックごとの JSONL ファイル（`<dir>/<topic>.jsonl`）に追記する MemoryLog 実装

use crate::domain::{MemoryRecord, Topic};
use crate::ports::outbound::MemoryLog;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub struct JsonlMemoryLog {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl JsonlMemoryLog {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    fn path(&self, topic: &Topic) -> PathBuf {
        self.dir.join(format!("{}.jsonl", topic))
    }
}

impl MemoryLog for JsonlMemoryLog {
    fn backend(&self) -> &str {
        "file"
    }

    fn append(&self, topic: &Topic, record: &MemoryRecord) -> Result<(), Error> {
        self.fs.create_dir_all(&self.dir)?;
        let path = self.path(topic);
        let line = serde_json::to_string(record)?;
        let mut w = self.fs.open_append(&path)?;
        writeln!(w, "{}", line)
            .and_then(|_| w.flush())
            .map_err(|e| Error::io_msg(format!("Failed to append to '{}': {}", path.display(), e)))
    }

    fn load(&self, topic: &Topic) -> Result<Vec<MemoryRecord>, Error> {
        let path = self.path(topic);
        if !self.fs.exists(&path) {
            return Ok(Vec::new());
        }
        let contents = self.fs.read_to_string(&path)?;
        contents
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| {
                serde_json::from_str::<MemoryRecord>(l).map_err(|e| {
                    Error::json(format!("{}:{}: {}", path.display(), i + 1, e))
                })
            })
            .collect()
    }

    fn retain_newest(&self, topic: &Topic, keep: usize) -> Result<(), Error> {
        let records = self.load(topic)?;
        if records.len() <= keep {
            return Ok(());
        }
        let mut out = String::new();
        for r in &records[records.len() - keep..] {
            out.push_str(&serde_json::to_string(r)?);
            out.push('\n');
        }
        self.fs.write_atomic(&self.path(topic), &out)
    }
}
