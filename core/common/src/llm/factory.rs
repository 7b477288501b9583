//! プロバイダファクトリー
//!
//! プロバイダタイプとオプションから適切なプロバイダを作成します。
//! API キーやエンドポイントの環境変数はここで EnvResolver 経由で読む。

use crate::error::Error;
use crate::llm::azure::AzureOpenAiProvider;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::{LlmProvider, Message};
use crate::ports::outbound::EnvResolver;
use serde_json::Value;
use std::time::Duration;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Azure OpenAI（デプロイメント指定）
    Azure,
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAiCompat,
    /// Echo（ネットワーク無し）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "azure" | "azure_openai" => Some(Self::Azure),
            "openai_compat" | "openai" | "gpt" | "ollama" => Some(Self::OpenAiCompat),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::OpenAiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダ生成オプション（profiles.json と CLI から集めたもの）
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            deployment: None,
            api_version: None,
            api_key_env: None,
            temperature: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// プロバイダのenumラッパー
pub enum AnyProvider {
    Azure(AzureOpenAiProvider),
    OpenAiCompat(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Azure(p) => p.name(),
            Self::OpenAiCompat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Azure(p) => p.make_http_request(request_json),
            Self::OpenAiCompat(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Azure(p) => p.parse_response_text(response_json),
            Self::OpenAiCompat(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
        history: &[Message],
    ) -> Result<Value, Error> {
        match self {
            Self::Azure(p) => p.make_request_payload(query, system_instruction, history),
            Self::OpenAiCompat(p) => p.make_request_payload(query, system_instruction, history),
            Self::Echo(p) => p.make_request_payload(query, system_instruction, history),
        }
    }
}

fn required(env: &dyn EnvResolver, name: &str) -> Result<String, Error> {
    env.var(name)
        .ok_or_else(|| Error::env(format!("{} is not set", name)))
}

/// プロバイダを作成する
///
/// Azure は endpoint / deployment / api key が揃わなければ Error::Env。
/// profile の値が優先で、無ければ AZURE_OPENAI_ENDPOINT / AZURE_DEPLOYMENT_ID /
/// AZURE_API_KEY / AZURE_API_VERSION を読む。
pub fn create_provider(
    provider_type: ProviderType,
    opts: &ProviderOptions,
    env: &dyn EnvResolver,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::Azure => {
            let endpoint = match &opts.base_url {
                Some(u) => u.clone(),
                None => required(env, "AZURE_OPENAI_ENDPOINT")?,
            };
            let deployment = match opts.deployment.as_ref().or(opts.model.as_ref()) {
                Some(d) => d.clone(),
                None => required(env, "AZURE_DEPLOYMENT_ID")?,
            };
            let key_env = opts.api_key_env.as_deref().unwrap_or("AZURE_API_KEY");
            let api_key = required(env, key_env)?;
            let api_version = opts
                .api_version
                .clone()
                .or_else(|| env.var("AZURE_API_VERSION"));
            let provider = AzureOpenAiProvider::new(
                endpoint,
                deployment,
                api_version,
                api_key,
                opts.temperature,
                opts.timeout,
            )?;
            Ok(AnyProvider::Azure(provider))
        }
        ProviderType::OpenAiCompat => {
            let key_env = opts.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY");
            let provider = OpenAiCompatProvider::new(
                opts.model.clone(),
                opts.base_url.clone(),
                env.var(key_env),
                opts.temperature,
                opts.timeout,
            )?;
            Ok(AnyProvider::OpenAiCompat(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}
