//! Ctrl+C（SIGINT）等による割り込みを検知する Outbound ポート
//!
//! 会話ループはターンの合間にこれを見て、true なら Interrupted で止まる。

pub trait InterruptChecker: Send + Sync {
    fn is_interrupted(&self) -> bool;
}
