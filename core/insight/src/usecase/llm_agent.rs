//! LLM に発言させる ChatAgent
//!
//! 送るもの:
//! - system: エージェントの system_message
//! - history: 先頭にタスク（常に残す）、続いて予算内に収まる直近の発言
//!   （自分の発言は assistant、他者の発言は `[name]: content` の user）
//! - query: 次の発言を促す固定文

use std::sync::Arc;

use common::error::Error;
use common::llm::Message;

use crate::domain::chat_message::TASK_SOURCE;
use crate::domain::{AgentProfile, ChatMessage};
use crate::ports::outbound::{ChatAgent, LlmCompletion};

pub struct LlmChatAgent {
    profile: AgentProfile,
    llm: Arc<dyn LlmCompletion>,
}

impl LlmChatAgent {
    pub fn new(profile: AgentProfile, llm: Arc<dyn LlmCompletion>) -> Self {
        Self { profile, llm }
    }

    fn turn_prompt(&self) -> String {
        format!(
            "You are {}. Continue the conversation according to your instructions.",
            self.profile.name
        )
    }

    /// 予算で刈り込んだ LLM 向け履歴
    pub(crate) fn build_history(&self, conversation: &[ChatMessage]) -> Vec<Message> {
        let (task, rest) = match conversation.split_first() {
            Some((first, rest)) if first.source == TASK_SOURCE => (Some(first), rest),
            _ => (None, conversation),
        };
        let mut history = Vec::new();
        if let Some(t) = task {
            history.push(Message::user(t.content.clone()));
        }
        for m in self.profile.budget.newest_within(rest) {
            if m.source == self.profile.name {
                history.push(Message::assistant(m.content.clone()));
            } else {
                history.push(Message::user(format!("[{}]: {}", m.source, m.content)));
            }
        }
        history
    }
}

impl ChatAgent for LlmChatAgent {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn reply(&self, conversation: &[ChatMessage]) -> Result<String, Error> {
        let history = self.build_history(conversation);
        self.llm.complete(
            Some(&self.profile.system_message),
            &history,
            &self.turn_prompt(),
        )
    }
}
