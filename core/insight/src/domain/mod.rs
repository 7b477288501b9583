//! insight 固有のドメイン型（型と不変条件）

pub mod analysis;
pub mod chat_message;
pub mod command;
pub mod context_budget;
pub mod insight;
pub mod memory_record;
pub mod report;
pub mod roster;
pub mod similarity;
pub mod termination;
pub mod topic;

pub use analysis::{AnalysisRecord, FetchedReports, MemorySnapshot, StopReason};
pub use chat_message::ChatMessage;
pub use command::InsightCommand;
pub use context_budget::ContextBudget;
pub use insight::extract_insights;
pub use memory_record::MemoryRecord;
pub use report::{Report, ReportKind, ReportStatus, FETCH_FAILED_SENTINEL};
pub use roster::{default_roster, AgentProfile, COORDINATOR};
pub use similarity::{cosine_similarity, rank_top_k};
pub use termination::{
    coordinator_responded_once, FunctionalTermination, SourceMatchTermination,
    TerminationCondition,
};
pub use topic::Topic;
