//! テスト用の固定応答スタブ


#[cfg(test)]
pub use stub::{FailingAgent, ScriptedLlm, StubAgent, StubReportSource};
