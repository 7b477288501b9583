//! 会話の終了条件
//!
//! メッセージが 1 件追加されるたびに評価し、true になったらそれ以上ターンを回さない。
//! 実装は単調であること（ある接頭辞で true なら、それを伸ばした列でも true）。

use crate::domain::roster::COORDINATOR;
use crate::domain::ChatMessage;

pub trait TerminationCondition: Send + Sync {
    /// ログ用の名前
    fn name(&self) -> &str;

    fn is_met(&self, messages: &[ChatMessage]) -> bool;
}

/// 指定 source のメッセージが min_count 件以上あれば終了
#[derive(Debug, Clone)]
pub struct SourceMatchTermination {
    source: String,
    min_count: usize,
}

impl SourceMatchTermination {
    pub fn new(source: impl Into<String>, min_count: usize) -> Self {
        Self {
            source: source.into(),
            min_count: min_count.max(1),
        }
    }
}

impl TerminationCondition for SourceMatchTermination {
    fn name(&self) -> &str {
        "source_match"
    }

    fn is_met(&self, messages: &[ChatMessage]) -> bool {
        messages.iter().filter(|m| m.source == self.source).count() >= self.min_count
    }
}

/// 任意の述語を終了条件として使う
pub struct FunctionalTermination {
    name: String,
    predicate: Box<dyn Fn(&[ChatMessage]) -> bool + Send + Sync>,
}

impl FunctionalTermination {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&[ChatMessage]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl TerminationCondition for FunctionalTermination {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_met(&self, messages: &[ChatMessage]) -> bool {
        (self.predicate)(messages)
    }
}

/// コーディネーターが 1 回でも発言したか
pub fn coordinator_responded_once(messages: &[ChatMessage]) -> bool {
    messages.iter().any(|m| m.source == COORDINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(sources: &[&str]) -> Vec<ChatMessage> {
        sources
            .iter()
            .map(|s| ChatMessage::new(*s, format!("from {}", s)))
            .collect()
    }

    #[test]
    fn test_coordinator_responded_once() {
        assert!(!coordinator_responded_once(&[]));
        assert!(!coordinator_responded_once(&conv(&["user", "SalesAgent", "OpsAgent"])));
        assert!(coordinator_responded_once(&conv(&["user", "CoordinatorAgent"])));
    }

    #[test]
    fn test_predicate_is_monotone_under_extension() {
        let base = conv(&["user", "SalesAgent", "CoordinatorAgent"]);
        assert!(coordinator_responded_once(&base));
        for extra in ["SalesAgent", "SupportAgent", "user", "CoordinatorAgent", ""] {
            let mut extended = base.clone();
            extended.push(ChatMessage::new(extra, "later"));
            assert!(coordinator_responded_once(&extended));
            extended.push(ChatMessage::new("OpsAgent", "even later"));
            assert!(coordinator_responded_once(&extended));
        }
    }

    #[test]
    fn test_source_match_min_count() {
        let t = SourceMatchTermination::new("CoordinatorAgent", 2);
        assert!(!t.is_met(&conv(&["CoordinatorAgent"])));
        assert!(t.is_met(&conv(&["CoordinatorAgent", "x", "CoordinatorAgent"])));
    }

    #[test]
    fn test_functional_wraps_free_function() {
        let t = FunctionalTermination::new("coordinator_responded_once", coordinator_responded_once);
        assert_eq!(t.name(), "coordinator_responded_once");
        assert!(t.is_met(&conv(&["CoordinatorAgent"])));
        assert!(!t.is_met(&conv(&["user"])));
    }
}
