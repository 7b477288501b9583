//! ユースケース（ポート経由でのみ I/O する）

pub mod app;
pub mod group_chat;
pub mod llm_agent;
pub mod memory;
pub mod pipeline;
