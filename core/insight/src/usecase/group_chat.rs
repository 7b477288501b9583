//! グループチャット: 参加者を固定順で回し、終了条件かターン上限で止める
//!
//! 状態遷移:
//! Checking → Selecting(next) → Speaking(agent) → Checking → … → Stopped(reason)
//! 終了条件はメッセージが追加されるたびに（タスク投入直後も）評価する。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::domain::{ChatMessage, StopReason, TerminationCondition};
use crate::ports::outbound::{ChatAgent, InterruptChecker};

/// 会話ループの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// 次の話者を選ぶ（roster 上の添字）
    Selecting(usize),
    /// 話者が発言中
    Speaking(usize),
    /// 終了条件・上限・割り込みを確認
    Checking,
    Stopped(StopReason),
}

/// 会話の結果（先頭はタスク）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub messages: Vec<ChatMessage>,
    pub stop_reason: StopReason,
    /// エージェントが発言した回数
    pub turns: usize,
}

pub struct GroupChat {
    agents: Vec<Arc<dyn ChatAgent>>,
    termination: Arc<dyn TerminationCondition>,
    max_turns: usize,
    interrupt_checker: Arc<dyn InterruptChecker>,
    log: Arc<dyn Log>,
}

impl GroupChat {
    pub fn new(
        agents: Vec<Arc<dyn ChatAgent>>,
        termination: Arc<dyn TerminationCondition>,
        max_turns: usize,
        interrupt_checker: Arc<dyn InterruptChecker>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            agents,
            termination,
            max_turns,
            interrupt_checker,
            log,
        }
    }

    /// 1 回分の状態遷移
    fn step(
        &self,
        state: ChatState,
        messages: &mut Vec<ChatMessage>,
        turns: &mut usize,
        next: &mut usize,
    ) -> Result<ChatState, Error> {
        Ok(match state {
            ChatState::Checking => {
                if self.termination.is_met(messages) {
                    ChatState::Stopped(StopReason::TerminationMet)
                } else if *turns >= self.max_turns {
                    ChatState::Stopped(StopReason::MaxTurns)
                } else if self.interrupt_checker.is_interrupted() {
                    ChatState::Stopped(StopReason::Interrupted)
                } else {
                    ChatState::Selecting(*next)
                }
            }
            ChatState::Selecting(i) => ChatState::Speaking(i % self.agents.len()),
            ChatState::Speaking(i) => {
                let agent = &self.agents[i];
                let content = agent.reply(messages)?;
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "agent replied")
                        .layer("usecase")
                        .kind("chat")
                        .field("agent", agent.name())
                        .field("turn", *turns + 1)
                        .field("chars", content.chars().count()),
                );
                messages.push(ChatMessage::new(agent.name(), content));
                *turns += 1;
                *next = (i + 1) % self.agents.len();
                ChatState::Checking
            }
            stopped @ ChatState::Stopped(_) => stopped,
        })
    }

    /// タスクを投げて止まるまで回す。エージェントのエラーはそのまま返す。
    pub fn run(&self, task: &str) -> Result<ChatOutcome, Error> {
        if self.agents.is_empty() {
            return Err(Error::invalid_argument("Group chat has no participants"));
        }
        let mut messages = vec![ChatMessage::task(task)];
        let mut turns = 0usize;
        let mut next = 0usize;
        let mut state = ChatState::Checking;
        loop {
            if let ChatState::Stopped(reason) = state {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "group chat stopped")
                        .layer("usecase")
                        .kind("chat")
                        .field("reason", reason.as_str())
                        .field("termination", self.termination.name())
                        .field("turns", turns),
                );
                return Ok(ChatOutcome {
                    messages,
                    stop_reason: reason,
                    turns,
                });
            }
            state = self.step(state, &mut messages, &mut turns, &mut next)?;
        }
    }
}
