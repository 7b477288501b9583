//! profiles.json 用の設定型
//!
//! プロバイダ名から ProviderType とオプション（base_url / model / deployment / api_key_env 等）を解決するための構造体。

use serde::Deserialize;
use std::collections::HashMap;

/// profiles.json のルート
#[derive(Debug, Clone, Default)]
pub struct ProfilesConfig {
    /// 未指定時に使うプロバイダ名
    pub default_provider: Option<String>,
    /// プロバイダ名 -> プロファイル
    pub providers: HashMap<String, ProviderProfile>,
}

/// 1 プロバイダ分の設定
#[derive(Debug, Clone, Default)]
pub struct ProviderProfile {
    /// プロバイダ種別: azure | openai_compat | echo
    pub type_: ProviderTypeKind,
    /// API のベース URL（azure ではリソースのエンドポイント）
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Azure のデプロイメント ID
    pub deployment: Option<String>,
    /// Azure の api-version
    pub api_version: Option<String>,
    /// API キーを読む環境変数名
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

/// JSON の "type" で使うプロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderTypeKind {
    #[default]
    Azure,
    OpenaiCompat,
    Echo,
}

impl ProviderTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::OpenaiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// serde 用の内部構造（type が予約語のため）
#[derive(Debug, Deserialize)]
struct ProfilesConfigRaw {
    #[serde(alias = "default")]
    default_provider: Option<String>,
    providers: Option<HashMap<String, ProviderProfileRaw>>,
}

#[derive(Debug, Deserialize)]
struct ProviderProfileRaw {
    #[serde(rename = "type", alias = "provider")]
    type_: ProviderTypeKindSerde,
    #[serde(alias = "endpoint")]
    base_url: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    #[serde(alias = "deployment_id")]
    deployment: Option<String>,
    api_version: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProviderTypeKindSerde {
    #[serde(alias = "azure_openai")]
    Azure,
    #[serde(rename = "openai_compat", alias = "openai", alias = "gpt", alias = "ollama")]
    OpenaiCompat,
    Echo,
}

impl From<ProviderTypeKindSerde> for ProviderTypeKind {
    fn from(s: ProviderTypeKindSerde) -> Self {
        match s {
            ProviderTypeKindSerde::Azure => ProviderTypeKind::Azure,
            ProviderTypeKindSerde::OpenaiCompat => ProviderTypeKind::OpenaiCompat,
            ProviderTypeKindSerde::Echo => ProviderTypeKind::Echo,
        }
    }
}

impl ProfilesConfig {
    /// JSON 文字列からパース（ファイル読みは resolver で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ProfilesConfigRaw = serde_json::from_str(json)?;
        let providers = raw
            .providers
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect();
        Ok(ProfilesConfig {
            default_provider: raw.default_provider,
            providers,
        })
    }
}

impl From<ProviderProfileRaw> for ProviderProfile {
    fn from(r: ProviderProfileRaw) -> Self {
        ProviderProfile {
            type_: r.type_.into(),
            base_url: r.base_url,
            model: r.model,
            deployment: r.deployment,
            api_version: r.api_version,
            api_key_env: r.api_key_env,
            temperature: r.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let cfg = ProfilesConfig::parse("{}").unwrap();
        assert!(cfg.default_provider.is_none());
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn test_parse_default_provider_and_providers() {
        let json = r#"
        {
            "default_provider": "prod",
            "providers": {
                "prod": {
                    "type": "azure",
                    "endpoint": "https://res.openai.azure.com",
                    "deployment": "gpt4o",
                    "api_version": "2024-06-01",
                    "api_key_env": "PROD_AZURE_KEY"
                },
                "local": { "type": "openai_compat", "base_url": "http://localhost:8080/v1" },
                "echo": { "type": "echo" }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("prod"));
        assert_eq!(cfg.providers.len(), 3);

        let a = cfg.providers.get("prod").unwrap();
        assert_eq!(a.type_, ProviderTypeKind::Azure);
        assert_eq!(a.base_url.as_deref(), Some("https://res.openai.azure.com"));
        assert_eq!(a.deployment.as_deref(), Some("gpt4o"));
        assert_eq!(a.api_version.as_deref(), Some("2024-06-01"));
        assert_eq!(a.api_key_env.as_deref(), Some("PROD_AZURE_KEY"));

        let l = cfg.providers.get("local").unwrap();
        assert_eq!(l.type_, ProviderTypeKind::OpenaiCompat);
        assert_eq!(l.base_url.as_deref(), Some("http://localhost:8080/v1"));

        assert_eq!(cfg.providers["echo"].type_, ProviderTypeKind::Echo);
    }

    #[test]
    fn test_parse_alias_default_and_default_model_and_ollama() {
        let json = r#"
        {
            "default": "local",
            "providers": {
                "local": {
                    "type": "ollama",
                    "base_url": "http://localhost:11434/v1",
                    "default_model": "llama3.1",
                    "temperature": 0.4
                },
                "x": { "type": "gpt" }
            }
        }
        "#;
        let cfg = ProfilesConfig::parse(json).unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("local"));
        let p = cfg.providers.get("local").unwrap();
        assert_eq!(p.type_, ProviderTypeKind::OpenaiCompat);
        assert_eq!(p.model.as_deref(), Some("llama3.1"));
        assert_eq!(p.temperature, Some(0.4));
        assert_eq!(cfg.providers["x"].type_, ProviderTypeKind::OpenaiCompat);
    }

    #[test]
    fn test_parse_unknown_type_is_error() {
        let json = r#"{ "providers": { "x": { "type": "gemini" } } }"#;
        assert!(ProfilesConfig::parse(json).is_err());
    }
}
