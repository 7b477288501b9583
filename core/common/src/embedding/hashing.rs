//! 特徴量ハッシュ埋め込み
//!
//! 単語（小文字化）と隣接 2 語をハッシュしてバケットに ±1 を積み、L2 正規化する。
//! 同じ入力からは常に同じベクトルが得られ、語彙が重なるほど cosine が高くなる。
//! バケットは SHA-256 の先頭 8 バイトで決めるため、保存済みベクトルはビルドをまたいでも有効。

use crate::embedding::normalize;
use crate::error::Error;
use crate::ports::outbound::Embedder;
use regex::Regex;
use sha2::{Digest, Sha256};

pub const DEFAULT_DIMENSION: usize = 384;

pub struct HashingEmbedder {
    dimension: usize,
    word: Regex,
}

impl HashingEmbedder {
    /// `dimension` が 0 のときは DEFAULT_DIMENSION
    pub fn new(dimension: usize) -> Result<Self, Error> {
        let word = Regex::new(r"\b\w+\b")
            .map_err(|e| Error::system(format!("Invalid token pattern: {}", e)))?;
        Ok(Self {
            dimension: if dimension == 0 {
                DEFAULT_DIMENSION
            } else {
                dimension
            },
            word,
        })
    }

    fn tokens(&self, text: &str) -> Vec<String> {
        self.word
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let h = u64::from_be_bytes(head);
        let bucket = (h % self.dimension as u64) as usize;
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        let mut vector = vec![0.0f32; self.dimension];
        let tokens = self.tokens(text);
        for t in &tokens {
            self.add_feature(&mut vector, t, 1.0);
        }
        for pair in tokens.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), 0.5);
        }
        normalize(&mut vector);
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_embed_is_deterministic_and_normalized() {
        let e = HashingEmbedder::new(0).unwrap();
        let a = e.embed("Revenue grew 12% in Q3").unwrap();
        let b = e.embed("Revenue grew 12% in Q3").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_DIMENSION);
        assert!((dot(&a, &a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_embed_is_case_insensitive() {
        let e = HashingEmbedder::new(64).unwrap();
        assert_eq!(e.embed("Sales UP").unwrap(), e.embed("sales up").unwrap());
    }

    #[test]
    fn test_buckets_are_fixed() {
        let e = HashingEmbedder::new(16).unwrap();
        let revenue = e.embed("Revenue").unwrap();
        assert_eq!(revenue[11], 1.0);
        assert_eq!(revenue.iter().filter(|x| **x != 0.0).count(), 1);
        let sales = e.embed("sales").unwrap();
        assert_eq!(sales[1], -1.0);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let e = HashingEmbedder::new(16).unwrap();
        let v = e.embed("  ...  ").unwrap();
        assert_eq!(v.len(), 16);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_overlapping_text_is_more_similar() {
        let e = HashingEmbedder::new(DEFAULT_DIMENSION).unwrap();
        let q = e.embed("sales performance").unwrap();
        let near = e.embed("Quarterly sales performance beat targets").unwrap();
        let far = e.embed("Warehouse shipping delays in the north region").unwrap();
        assert!(dot(&q, &near) > dot(&q, &far));
    }
}
