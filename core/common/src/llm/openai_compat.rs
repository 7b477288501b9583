//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイントを指定可能（OpenAI / Ollama / LM Studio 等）。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    client: reqwest::blocking::Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f64,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき DEFAULT_MODEL）
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `api_key` - API キー（None のとき Authorization を付けない）
    /// * `temperature` - 温度（None のとき DEFAULT_TEMPERATURE）
    /// * `timeout` - HTTP タイムアウト
    pub fn new(
        model: Option<String>,
        base_url: Option<String>,
        api_key: Option<String>,
        temperature: Option<f32>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client: http_client(timeout)?,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            api_key,
            temperature: temperature.map(f64::from).unwrap_or(DEFAULT_TEMPERATURE),
        })
    }

    pub(crate) fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// タイムアウト付きの blocking クライアントを作る
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))
}

/// POST して本文を返す。非 2xx は `error.message` を優先してエラーにする。
pub(crate) fn post_json(
    request: reqwest::blocking::RequestBuilder,
    request_json: &str,
    label: &str,
) -> Result<String, Error> {
    let response = request
        .header("Content-Type", "application/json")
        .body(request_json.to_string())
        .send()
        .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let response_text = response
        .text()
        .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        let error_msg = serde_json::from_str::<Value>(&response_text)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
        return Err(Error::http(format!("{} error: {}", label, error_msg)));
    }
    Ok(response_text)
}

/// system + history + query を chat messages 配列にする
pub(crate) fn chat_messages(
    query: &str,
    system_instruction: Option<&str>,
    history: &[Message],
) -> Vec<Value> {
    let mut messages: Vec<Value> = Vec::with_capacity(history.len() + 2);
    if let Some(s) = system_instruction {
        messages.push(json!({ "role": "system", "content": s }));
    }
    for msg in history {
        messages.push(json!({ "role": msg.role, "content": msg.content }));
    }
    messages.push(json!({ "role": "user", "content": query }));
    messages
}

/// choices[0].message.content を取り出す
pub(crate) fn parse_chat_content(response_json: &str) -> Result<Option<String>, Error> {
    let v: Value = serde_json::from_str(response_json)
        .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

    if let Some(err) = v.get("error") {
        let msg = err["message"].as_str().unwrap_or("Unknown error");
        return Err(Error::http(format!("API error: {}", msg)));
    }

    Ok(v["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string()))
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let mut builder = self.client.post(self.url());
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        post_json(builder, request_json, "Chat completions")
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        parse_chat_content(response_json)
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        Ok(json!({
            "model": self.model,
            "messages": chat_messages(query, system_instruction, history),
            "temperature": self.temperature,
            "stream": false
        }))
    }
}
