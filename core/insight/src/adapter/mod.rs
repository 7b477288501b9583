//! アダプター（ports::outbound の実装と、環境変数から読む Settings）

pub mod file_analysis_store;
pub mod http_kpi_search;
pub mod http_report_source;
pub mod in_process_memory_log;
pub mod jsonl_memory_log;
pub mod llm_completion;
pub mod profile_lister;
pub mod redis_memory_log;
pub mod settings;
pub mod sigint_checker;
pub mod stubs;

pub use file_analysis_store::FileAnalysisStore;
pub use http_kpi_search::HttpKpiSearch;
pub use http_report_source::HttpReportSource;
pub use in_process_memory_log::InProcessMemoryLog;
pub use jsonl_memory_log::JsonlMemoryLog;
pub use llm_completion::ProfileLlmCompletionFactory;
pub use profile_lister::StdProfileLister;
pub use redis_memory_log::RedisMemoryLog;
pub use settings::{EmbedderKind, MemoryBackend, Settings};
pub use sigint_checker::{NoopInterruptChecker, SigintChecker};
