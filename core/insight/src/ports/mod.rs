//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出す入り口
//! - outbound: アプリが外界（レポートサーバ・メモリ・LLM・状態ファイル）に依頼するための trait

pub mod inbound;
pub mod outbound;
