//! トピック単位の追記ログ（メモリの永続化先）の Outbound ポート
//!
//! 実装は Redis リスト / JSONL ファイル / プロセス内の Vec。

use crate::domain::{MemoryRecord, Topic};
use common::error::Error;

pub trait MemoryLog: Send + Sync {
    /// バックエンド名（ログ用）
    fn backend(&self) -> &str;

    /// 末尾に 1 件追加する
    fn append(&self, topic: &Topic, record: &MemoryRecord) -> Result<(), Error>;

    /// 全件を挿入順で返す（無ければ空）
    fn load(&self, topic: &Topic) -> Result<Vec<MemoryRecord>, Error>;

    /// 新しい側の `keep` 件だけ残す
    fn retain_newest(&self, topic: &Topic, keep: usize) -> Result<(), Error>;
}
