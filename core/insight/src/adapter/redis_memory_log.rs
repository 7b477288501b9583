//! Redis のリスト（キー `memory:<topic>`）を使う MemoryLog 実装
//!
//! RPUSH で追記、LRANGE 0 -1 で全件、LTRIM -keep -1 で古い側を落とす。要素は `{text, vector}` の JSON。

use crate::domain::{MemoryRecord, Topic};
use crate::ports::outbound::MemoryLog;
use common::error::Error;
use redis::Commands;
use std::time::Duration;

pub struct RedisMemoryLog {
    client: redis::Client,
    timeout: Duration,
}

fn redis_err(e: redis::RedisError) -> Error {
    Error::io_msg(format!("Redis error: {}", e))
}

impl RedisMemoryLog {
    /// URL の形式だけ検証する（接続は操作ごと）
    pub fn open(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::env(format!("Invalid redis URL '{}': {}", url, e)))?;
        Ok(Self { client, timeout })
    }

    /// 接続と各コマンドの読み書きに同じタイムアウトを掛ける
    fn connection(&self) -> Result<redis::Connection, Error> {
        let con = self
            .client
            .get_connection_with_timeout(self.timeout)
            .map_err(redis_err)?;
        con.set_read_timeout(Some(self.timeout)).map_err(redis_err)?;
        con.set_write_timeout(Some(self.timeout)).map_err(redis_err)?;
        Ok(con)
    }
}

impl MemoryLog for RedisMemoryLog {
    fn backend(&self) -> &str {
        "redis"
    }

    fn append(&self, topic: &Topic, record: &MemoryRecord) -> Result<(), Error> {
        let json = serde_json::to_string(record)?;
        let mut con = self.connection()?;
        con.rpush::<_, _, ()>(topic.storage_key(), json)
            .map_err(redis_err)
    }

    fn load(&self, topic: &Topic) -> Result<Vec<MemoryRecord>, Error> {
        let mut con = self.connection()?;
        let items: Vec<String> = con
            .lrange(topic.storage_key(), 0, -1)
            .map_err(redis_err)?;
        items
            .iter()
            .map(|s| {
                serde_json::from_str::<MemoryRecord>(s).map_err(|e| {
                    Error::json(format!("{}: {}", topic.storage_key(), e))
                })
            })
            .collect()
    }

    fn retain_newest(&self, topic: &Topic, keep: usize) -> Result<(), Error> {
        let mut con = self.connection()?;
        if keep == 0 {
            return con.del::<_, ()>(topic.storage_key()).map_err(redis_err);
        }
        con.ltrim::<_, ()>(topic.storage_key(), -(keep as isize), -1)
            .map_err(redis_err)
    }
}
