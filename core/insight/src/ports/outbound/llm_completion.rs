//! 単発 LLM 完了の Outbound ポート

use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::Message;
use std::sync::Arc;

/// system + 履歴 + クエリで応答文字列を 1 回取得する
pub trait LlmCompletion: Send + Sync {
    /// 解決済みのプロファイル名（記録用）
    fn profile_name(&self) -> &str;

    fn complete(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
        query: &str,
    ) -> Result<String, Error>;
}

/// プロファイル名・モデル名から LlmCompletion を組み立てる
pub trait LlmCompletionFactory: Send + Sync {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Arc<dyn LlmCompletion>, Error>;
}
