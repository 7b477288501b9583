//! InsightSync 共通ライブラリ
//!
//! `insight` コマンドが使うエラー型・ドメイン型・ポート・標準アダプター・
//! LLM プロバイダ・埋め込み実装を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLMドライバーとプロバイダ
pub mod llm;

/// テキスト埋め込み
pub mod embedding;
