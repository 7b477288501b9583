//! グループチャットの参加者の Outbound ポート

use crate::domain::ChatMessage;
use common::error::Error;

pub trait ChatAgent: Send + Sync {
    /// 発言者名（ChatMessage.source になる）
    fn name(&self) -> &str;

    /// これまでの会話（先頭はタスク）を見て次の発言を返す
    fn reply(&self, conversation: &[ChatMessage]) -> Result<String, Error>;
}
