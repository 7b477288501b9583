//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理を提供します。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// LLMにクエリを送信して応答テキストを取得
    ///
    /// 応答にテキストが無い場合は Error::Http（"No text in response"）。
    pub fn query(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<String, Error> {
        let payload = self
            .provider
            .make_request_payload(query, system_instruction, history)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        self.provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::http("No text in response"))
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
