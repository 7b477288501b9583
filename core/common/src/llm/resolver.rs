//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{HomeDir, ProviderName};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::{ProviderOptions, ProviderType};
use crate::ports::outbound::FileSystem;

/// 未指定時のプロバイダ名
pub const DEFAULT_PROVIDER: &str = "azure";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "prod", "echo"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

impl ResolvedProvider {
    fn builtin(name: &str, provider_type: ProviderType) -> Self {
        Self {
            profile_name: name.to_string(),
            provider_type,
            base_url: None,
            model: None,
            deployment: None,
            api_version: None,
            api_key_env: None,
            temperature: None,
        }
    }

    /// factory に渡すオプションへ変換する
    pub fn options(&self, timeout: std::time::Duration) -> ProviderOptions {
        ProviderOptions {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            deployment: self.deployment.clone(),
            api_version: self.api_version.clone(),
            api_key_env: self.api_key_env.clone(),
            temperature: self.temperature,
            timeout,
        }
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    home: &HomeDir,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = home.profiles_config_path();
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs.read_to_string(path.as_path())?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Azure => ProviderType::Azure,
        ProviderTypeKind::OpenaiCompat => ProviderType::OpenAiCompat,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
pub fn builtin_provider_names() -> &'static [&'static str] {
    &["azure", "echo", "openai", "openai_compat"]
}

/// 一覧表示用: ビルトインと profiles.json のプロファイル名（ソート済み）と既定名
pub fn list_available_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, Option<String>) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    (names, Some(default))
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(profile) = cfg.and_then(|c| c.providers.get(effective_name)) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type: provider_type_kind_to_provider_type(profile.type_),
            base_url: profile.base_url.clone(),
            model: profile.model.clone(),
            deployment: profile.deployment.clone(),
            api_version: profile.api_version.clone(),
            api_key_env: profile.api_key_env.clone(),
            temperature: profile.temperature,
        });
    }

    // 2) ビルトイン
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider::builtin(effective_name, provider_type));
    }

    // 3) どれも無ければ usage エラー
    let (available, _) = list_available_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::llm::config::ProviderProfile;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_provider_no_cfg_defaults_to_azure() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "azure");
        assert_eq!(r.provider_type, ProviderType::Azure);
        assert!(r.deployment.is_none());
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_echo() {
        let name = ProviderName::new("echo");
        let r = resolve_provider(Some(&name), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_resolve_provider_no_cfg_unknown() {
        let name = ProviderName::new("unknown_provider");
        let e = resolve_provider(Some(&name), None).unwrap_err();
        assert!(e.is_usage());
        assert!(e.to_string().contains("Unknown provider"));
        assert!(e.to_string().contains("unknown_provider"));
        assert!(e.to_string().contains("Available"));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let cfg = ProfilesConfig {
            default_provider: Some("prod".to_string()),
            providers: HashMap::from([(
                "prod".to_string(),
                ProviderProfile {
                    type_: ProviderTypeKind::Azure,
                    base_url: Some("https://res.openai.azure.com".to_string()),
                    deployment: Some("gpt4o".to_string()),
                    api_key_env: Some("PROD_KEY".to_string()),
                    temperature: Some(0.2),
                    ..ProviderProfile::default()
                },
            )]),
        };
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "prod");
        assert_eq!(r.provider_type, ProviderType::Azure);
        assert_eq!(r.deployment.as_deref(), Some("gpt4o"));
        let opts = r.options(std::time::Duration::from_secs(3));
        assert_eq!(opts.api_key_env.as_deref(), Some("PROD_KEY"));
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.timeout.as_secs(), 3);
    }

    #[test]
    fn test_resolve_provider_cfg_unknown_provider_lists_available() {
        let cfg = ProfilesConfig {
            default_provider: None,
            providers: HashMap::from([(
                "my_custom".to_string(),
                ProviderProfile {
                    type_: ProviderTypeKind::Echo,
                    ..ProviderProfile::default()
                },
            )]),
        };
        let name = ProviderName::new("nonexistent");
        let msg = resolve_provider(Some(&name), Some(&cfg)).unwrap_err().to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("my_custom"));
        assert!(msg.contains("azure"));
    }

    #[test]
    fn test_list_available_profiles_merges_and_sorts() {
        let (names, default) = list_available_profiles(None);
        assert_eq!(names, vec!["azure", "echo", "openai", "openai_compat"]);
        assert_eq!(default.as_deref(), Some("azure"));

        let cfg = ProfilesConfig {
            default_provider: Some("local".to_string()),
            providers: HashMap::from([(
                "local".to_string(),
                ProviderProfile {
                    type_: ProviderTypeKind::OpenaiCompat,
                    ..ProviderProfile::default()
                },
            )]),
        };
        let (names, default) = list_available_profiles(Some(&cfg));
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"local".to_string()));
        assert_eq!(default.as_deref(), Some("local"));
    }

    #[test]
    fn test_load_profiles_config_missing_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let home = HomeDir::new(dir.path());
        assert!(load_profiles_config(&StdFileSystem, &home).unwrap().is_none());

        let path = home.profiles_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let e = load_profiles_config(&StdFileSystem, &home).unwrap_err();
        assert_eq!(e.exit_code(), 65);
        assert!(e.to_string().contains("profiles.json"));
    }
}
