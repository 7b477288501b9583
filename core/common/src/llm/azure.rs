//! Azure OpenAI (deployments/{id}/chat/completions) プロバイダ
//!
//! モデル名ではなくデプロイメント ID で呼び分ける。認証は `api-key` ヘッダ。

use crate::error::Error;
use crate::llm::openai_compat::{chat_messages, http_client, parse_chat_content, post_json};
use crate::llm::provider::{LlmProvider, Message};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI プロバイダ
pub struct AzureOpenAiProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    temperature: f64,
}

impl AzureOpenAiProvider {
    /// * `endpoint` - 例: https://my-resource.openai.azure.com
    /// * `deployment` - デプロイメント ID
    /// * `api_version` - None のとき DEFAULT_API_VERSION
    /// * `temperature` - None のとき 0（分析結果の揺れを抑える）
    pub fn new(
        endpoint: String,
        deployment: String,
        api_version: Option<String>,
        api_key: String,
        temperature: Option<f32>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        if endpoint.trim().is_empty() {
            return Err(Error::env("Azure endpoint is empty"));
        }
        if deployment.trim().is_empty() {
            return Err(Error::env("Azure deployment id is empty"));
        }
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            deployment,
            api_version: api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_key,
            temperature: temperature.map(f64::from).unwrap_or(0.0),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

impl LlmProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let builder = self.client.post(self.url()).header("api-key", &self.api_key);
        post_json(builder, request_json, "Azure OpenAI")
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
            "messages": chat_messages(query, system_instruction, history),
            "temperature": self.temperature,
            "stream": false
        }))
    }
}
