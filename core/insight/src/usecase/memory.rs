//! メモリストア: トピックごとの追記ログ + 埋め込み + コサイン類似度による上位 K 件検索

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Embedder, Log, LogLevel, LogRecord};

use crate::domain::{rank_top_k, MemoryRecord, Topic};
use crate::ports::outbound::MemoryLog;

pub struct MemoryStore {
    log: Arc<dyn MemoryLog>,
    embedder: Arc<dyn Embedder>,
    /// トピックごとの上限（None で無制限）
    cap: Option<usize>,
    logger: Arc<dyn Log>,
}

impl MemoryStore {
    pub fn new(
        log: Arc<dyn MemoryLog>,
        embedder: Arc<dyn Embedder>,
        cap: Option<usize>,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            log,
            embedder,
            cap,
            logger,
        }
    }

    /// テキストを埋め込んで末尾に追記する。重複は許す。
    pub fn save(&self, topic: &Topic, text: &str) -> Result<(), Error> {
        let vector = self.embedder.embed(text)?;
        self.log.append(topic, &MemoryRecord::new(text, vector))?;
        if let Some(cap) = self.cap {
            self.log.retain_newest(topic, cap)?;
        }
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "memory write")
                .layer("usecase")
                .kind("memory")
                .field("topic", topic.as_ref())
                .field("backend", self.log.backend())
                .field("chars", text.chars().count()),
        );
        Ok(())
    }

    /// クエリに近い順に最大 k 件のテキストを返す（同点は挿入順）
    pub fn retrieve_top_k(&self, topic: &Topic, query: &str, k: usize) -> Result<Vec<String>, Error> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let records = self.log.load(topic)?;
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let query_vector = self.embedder.embed(query)?;

        let (usable, skipped): (Vec<&MemoryRecord>, Vec<&MemoryRecord>) = records
            .iter()
            .partition(|r| r.vector.len() == query_vector.len());
        if !skipped.is_empty() {
            let _ = self.logger.log(
                &LogRecord::new(LogLevel::Warn, "memory records with mismatched dimension skipped")
                    .layer("usecase")
                    .kind("memory")
                    .field("topic", topic.as_ref())
                    .field("skipped", skipped.len())
                    .field("expected", query_vector.len()),
            );
        }

        let vectors: Vec<&[f32]> = usable.iter().map(|r| r.vector.as_slice()).collect();
        let hits: Vec<String> = rank_top_k(&query_vector, &vectors, k)
            .into_iter()
            .map(|i| usable[i].text.clone())
            .collect();
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "memory read")
                .layer("usecase")
                .kind("memory")
                .field("topic", topic.as_ref())
                .field("backend", self.log.backend())
                .field("candidates", usable.len())
                .field("returned", hits.len()),
        );
        Ok(hits)
    }
}
