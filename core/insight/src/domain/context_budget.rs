//! コンテキスト予算（トークン数の上限）
//!
//! トークン数は文字数 / 4 の切り上げで見積もる。

use crate::domain::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    pub max_tokens: usize,
}

impl ContextBudget {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// 部門エージェント用
    pub fn domain_default() -> Self {
        Self::new(100)
    }

    /// コーディネーター用
    pub fn coordinator_default() -> Self {
        Self::new(400)
    }

    pub fn estimate_tokens(text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }

    /// 予算に収まる末尾（新しい側）のメッセージ列を返す。
    /// 1 件でも収まらなければそこで打ち切る（古い側は捨てる）。
    pub fn newest_within<'a>(&self, messages: &'a [ChatMessage]) -> &'a [ChatMessage] {
        let mut used = 0usize;
        let mut start = messages.len();
        for (i, m) in messages.iter().enumerate().rev() {
            let cost = Self::estimate_tokens(&m.content);
            if used + cost > self.max_tokens {
                break;
            }
            used += cost;
            start = i;
        }
        &messages[start..]
    }
}
