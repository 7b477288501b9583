//! Outbound ポート: アプリが外界（時刻・FS・環境変数・ログ・LLM・埋め込み）を使うための trait

pub mod clock;
pub mod embedder;
pub mod env_resolver;
pub mod fs;
pub mod llm_provider;
pub mod log;

pub use clock::Clock;
pub use embedder::Embedder;
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use llm_provider::LlmProvider;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
