//! 単発 LLM 完了の標準実装（common::llm の LlmDriver を使う）
//!
//! ProfileLlmCompletionFactory が profiles.json と -p / -m からプロバイダを解決して組み立てる。

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::domain::{HomeDir, ModelName, ProviderName};
use common::error::Error;
use common::llm::{
    create_provider, load_profiles_config, resolve_provider, AnyProvider, LlmDriver, LlmProvider,
    Message, ProviderType,
};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::ports::outbound::{LlmCompletion, LlmCompletionFactory};

/// LlmDriver<AnyProvider> をそのまま包む
pub struct DriverLlmCompletion {
    profile_name: String,
    driver: LlmDriver<AnyProvider>,
    log: Arc<dyn Log>,
}

impl DriverLlmCompletion {
    pub fn new(profile_name: impl Into<String>, provider: AnyProvider, log: Arc<dyn Log>) -> Self {
        Self {
            profile_name: profile_name.into(),
            driver: LlmDriver::new(provider),
            log,
        }
    }
}

impl LlmCompletion for DriverLlmCompletion {
    fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn complete(
        &self,
        system_instruction: Option<&str>,
        history: &[Message],
        query: &str,
    ) -> Result<String, Error> {
        let started = Instant::now();
        let result = self.driver.query(query, system_instruction, history);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let record = match &result {
            Ok(text) => LogRecord::new(LogLevel::Debug, "llm completion")
                .field("chars", text.chars().count()),
            Err(e) => LogRecord::new(LogLevel::Warn, "llm completion failed")
                .field("error", e.to_string()),
        };
        let _ = self.log.log(
            &record
                .layer("adapter")
                .kind("llm")
                .field("provider", self.driver.provider().name())
                .field("profile", self.profile_name.as_str())
                .field("history", history.len())
                .field("elapsed_ms", elapsed_ms),
        );
        result
    }
}

/// profiles.json + resolve_provider + create_provider でプロバイダを作る
pub struct ProfileLlmCompletionFactory {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvResolver>,
    home: HomeDir,
    timeout: Duration,
    log: Arc<dyn Log>,
}

impl ProfileLlmCompletionFactory {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn EnvResolver>,
        home: HomeDir,
        timeout: Duration,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            fs,
            env,
            home,
            timeout,
            log,
        }
    }
}

impl LlmCompletionFactory for ProfileLlmCompletionFactory {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Arc<dyn LlmCompletion>, Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), &self.home)?;
        let resolved = resolve_provider(profile, cfg.as_ref())?;
        let mut opts = resolved.options(self.timeout);
        if let Some(m) = model {
            opts.model = Some(m.to_string());
            // Azure ではモデル名はデプロイメント名
            if resolved.provider_type == ProviderType::Azure {
                opts.deployment = Some(m.to_string());
            }
        }
        let provider = create_provider(resolved.provider_type, &opts, self.env.as_ref())?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "provider resolved")
                .layer("adapter")
                .kind("llm")
                .field("profile", resolved.profile_name.as_str())
                .field("provider", resolved.provider_type.as_str())
                .field("model", opts.model.clone().unwrap_or_default()),
        );
        Ok(Arc::new(DriverLlmCompletion::new(
            resolved.profile_name,
            provider,
            Arc::clone(&self.log),
        )))
    }
}
