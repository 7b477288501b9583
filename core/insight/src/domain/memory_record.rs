//! メモリレコード `{text, vector}`

use serde::{Deserialize, Serialize};

/// 1 件の記憶。JSON では `text` と `vector` の 2 フィールドのみ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub text: String,
    pub vector: Vec<f32>,
}

impl MemoryRecord {
    pub fn new(text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            vector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_record_json_shape() {
        let r = MemoryRecord::new("Q3 revenue up", vec![0.5, -0.5]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"text":"Q3 revenue up","vector":[0.5,-0.5]}"#);
    }

    #[test]
    fn test_memory_record_reads_original_layout() {
        let r: MemoryRecord =
            serde_json::from_str(r#"{"text": "x", "vector": [1, 0.25]}"#).unwrap();
        assert_eq!(r.vector, vec![1.0, 0.25]);
    }
}
