//! テキスト埋め込みの実装
//!
//! - HashingEmbedder: 特徴量ハッシュによるローカル埋め込み（既定、ネットワーク不要）
//! - OpenAiEmbedder: OpenAI 互換 /embeddings エンドポイント

pub mod hashing;
pub mod openai;

pub use hashing::{HashingEmbedder, DEFAULT_DIMENSION};
pub use openai::OpenAiEmbedder;

/// ベクトルを単位長に正規化する（ゼロベクトルはそのまま）
pub fn normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in vector.iter_mut() {
            *value /= magnitude;
        }
    }
}
