//! 環境変数によるパイプライン設定（adapter 層）
//!
//! usecase は環境変数に直接依存せず、wiring がここで読んだ Settings を使ってアダプタを組み立てる。

use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REPORT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_TURNS: usize = 10;

/// メモリの保存先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryBackend {
    /// `<memory_dir>/<topic>.jsonl`
    File,
    Redis,
    /// プロセス内（終了で消える）
    Memory,
}

/// 埋め込みの方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    Hashing,
    OpenAiCompat,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub report_base_url: String,
    /// レポート取得・KPI 検索・埋め込み
    pub http_timeout: Duration,
    /// チャット完了
    pub model_timeout: Duration,
    pub fetch_attempts: u32,
    pub memory_backend: MemoryBackend,
    pub redis_url: String,
    pub memory_dir: PathBuf,
    pub memory_cap: Option<usize>,
    pub embedder: EmbedderKind,
    pub embedding_model: Option<String>,
    pub embedding_base_url: Option<String>,
    pub embedding_api_key_env: Option<String>,
    pub embedding_dimension: Option<usize>,
    pub max_turns: usize,
}

fn parse_positive<T: std::str::FromStr + PartialOrd + Default>(
    env: &dyn EnvResolver,
    name: &str,
) -> Result<Option<T>, Error> {
    match env.var(name) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) if v > T::default() => Ok(Some(v)),
            _ => Err(Error::env(format!(
                "{} must be a positive integer, got '{}'",
                name, raw
            ))),
        },
    }
}

/// 0 も許す非負整数
fn parse_count(env: &dyn EnvResolver, name: &str) -> Result<Option<usize>, Error> {
    match env.var(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
            Error::env(format!(
                "{} must be a non-negative integer, got '{}'",
                name, raw
            ))
        }),
    }
}

impl Settings {
    /// INSIGHT_* 環境変数から読む。未設定は既定値、不正値は Error::Env。
    pub fn from_env(env: &dyn EnvResolver, home: &HomeDir) -> Result<Self, Error> {
        let memory_backend = match env.var("INSIGHT_MEMORY_BACKEND").as_deref() {
            None | Some("file") | Some("jsonl") => MemoryBackend::File,
            Some("redis") => MemoryBackend::Redis,
            Some("memory") => MemoryBackend::Memory,
            Some(other) => {
                return Err(Error::env(format!(
                    "INSIGHT_MEMORY_BACKEND must be one of file, redis, memory (got '{}')",
                    other
                )))
            }
        };
        let embedder = match env.var("INSIGHT_EMBEDDER").as_deref() {
            None | Some("hashing") => EmbedderKind::Hashing,
            Some("openai_compat") | Some("openai") => EmbedderKind::OpenAiCompat,
            Some(other) => {
                return Err(Error::env(format!(
                    "INSIGHT_EMBEDDER must be hashing or openai_compat (got '{}')",
                    other
                )))
            }
        };
        let http_secs = parse_positive::<u64>(env, "INSIGHT_HTTP_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let model_secs = parse_positive::<u64>(env, "INSIGHT_MODEL_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS);

        Ok(Self {
            report_base_url: env
                .var("INSIGHT_REPORT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REPORT_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(http_secs),
            model_timeout: Duration::from_secs(model_secs),
            fetch_attempts: parse_positive::<u32>(env, "INSIGHT_FETCH_ATTEMPTS")?.unwrap_or(1),
            memory_backend,
            redis_url: env
                .var("INSIGHT_REDIS_URL")
                .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            memory_dir: env
                .var("INSIGHT_MEMORY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| home.memory_dir()),
            memory_cap: parse_count(env, "INSIGHT_MEMORY_CAP")?,
            embedder,
            embedding_model: env.var("INSIGHT_EMBEDDING_MODEL"),
            embedding_base_url: env.var("INSIGHT_EMBEDDING_BASE_URL"),
            embedding_api_key_env: env.var("INSIGHT_EMBEDDING_API_KEY_ENV"),
            embedding_dimension: parse_positive::<usize>(env, "INSIGHT_EMBEDDING_DIM")?,
            max_turns: parse_positive::<usize>(env, "INSIGHT_MAX_TURNS")?
                .unwrap_or(DEFAULT_MAX_TURNS),
        })
    }
}
