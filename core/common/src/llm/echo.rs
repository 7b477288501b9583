//! Echoプロバイダの実装
//!
//! 実際にLLM APIを呼び出さず、受け取ったリクエストの要約をそのまま応答にする。
//! ネットワーク無しでパイプライン全体を動かすデバッグ・テスト用。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    /// リクエストをそのまま「レスポンス」として返す
    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        Ok(request_json.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        let query = v["query"].as_str().unwrap_or("");
        let history_len = v["history"].as_array().map(|a| a.len()).unwrap_or(0);
        let system = v["system_instruction"]
            .as_str()
            .and_then(|s| s.lines().next())
            .unwrap_or("-");
        Ok(Some(format!(
            "[echo] system: {} | history: {} messages | query: {}",
            system, history_len, query
        )))
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        let mut payload = json!({ "query": query });
        if let Some(system) = system_instruction {
            payload["system_instruction"] = json!(system);
        }
        if !history.is_empty() {
            let history_json: Vec<Value> = history
                .iter()
                .map(|msg| json!({ "role": msg.role, "content": msg.content }))
                .collect();
            payload["history"] = json!(history_json);
        }
        Ok(payload)
    }
}
