//! 会話メッセージ

use serde::{Deserialize, Serialize};

/// タスク（最初のメッセージ）の送り手
pub const TASK_SOURCE: &str = "user";

/// グループチャットの 1 メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub source: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    pub fn task(content: impl Into<String>) -> Self {
        Self::new(TASK_SOURCE, content)
    }
}
