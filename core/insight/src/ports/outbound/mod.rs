//! Outbound ポート: usecase が外界に依頼するための trait

pub mod analysis_store;
pub mod chat_agent;
pub mod interrupt_checker;
pub mod kpi_search;
pub mod llm_completion;
pub mod memory_log;
pub mod profile_lister;
pub mod report_source;

pub use analysis_store::AnalysisStore;
pub use chat_agent::ChatAgent;
pub use interrupt_checker::InterruptChecker;
pub use kpi_search::KpiSearch;
pub use llm_completion::{LlmCompletion, LlmCompletionFactory};
pub use memory_log::MemoryLog;
pub use profile_lister::ProfileLister;
pub use report_source::ReportSource;
