//! 埋め込みベクトル生成 Outbound ポート
//!
//! メモリストアはこの trait 経由でテキストをベクトル化する。

use crate::error::Error;

/// テキスト埋め込み
///
/// 同じ実装・同じ入力に対して常に同じ次元・同じ値のベクトルを返すこと。
/// 実装は `common::embedding::HashingEmbedder`（ローカル）や `OpenAiEmbedder`（HTTP）など。
pub trait Embedder: Send + Sync {
    /// 実装名（ログ用）
    fn name(&self) -> &str;

    /// 出力ベクトルの次元
    fn dimension(&self) -> usize;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Error>;
}
