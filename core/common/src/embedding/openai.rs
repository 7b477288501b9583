//! OpenAI 互換 /embeddings を呼ぶ埋め込み実装

use crate::error::Error;
use crate::llm::openai_compat::{http_client, post_json};
use crate::ports::outbound::Embedder;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

pub struct OpenAiEmbedder {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    dimension: usize,
}

impl OpenAiEmbedder {
    /// * `dimension` - 期待する次元（None のとき 1536）。応答の次元が異なればエラー
    pub fn new(
        base_url: String,
        model: Option<String>,
        api_key: Option<String>,
        dimension: Option<usize>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            api_key,
            dimension: dimension.unwrap_or(DEFAULT_EMBEDDING_DIMENSION),
        })
    }

    fn url(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }

    fn parse_embedding(&self, response_json: &str) -> Result<Vec<f32>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse embeddings JSON: {}", e)))?;
        let arr = v["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| Error::json("No embedding in response"))?;
        let vector: Vec<f32> = arr
            .iter()
            .map(|x| x.as_f64().map(|f| f as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| Error::json("Embedding contains a non-numeric value"))?;
        if vector.len() != self.dimension {
            return Err(Error::json(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                vector.len()
            )));
        }
        Ok(vector)
    }
}

impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        let body = json!({ "model": self.model, "input": text }).to_string();
        let mut builder = self.client.post(self.url());
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        let response = post_json(builder, &body, "Embeddings")?;
        self.parse_embedding(&response)
    }
}
