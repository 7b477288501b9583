//! メモリトピック名（Newtype）

use common::error::Error;

/// メモリの区画名（sales / support / operations 等）
///
/// 英数字・`_`・`-` のみ。保存先のキーやファイル名にそのまま使うため。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn parse(s: &str) -> Result<Self, Error> {
        let ok = !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !ok {
            return Err(Error::invalid_argument(format!("Invalid memory topic: '{}'", s)));
        }
        Ok(Self(s.to_string()))
    }

    pub(crate) fn new_unchecked(s: &str) -> Self {
        Self(s.to_string())
    }

    /// Redis のキー（`memory:<topic>`）
    pub fn storage_key(&self) -> String {
        format!("memory:{}", self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_storage_key() {
        assert_eq!(Topic::parse("sales").unwrap().storage_key(), "memory:sales");
    }

    #[test]
    fn test_topic_rejects_path_like_names() {
        assert!(Topic::parse("").is_err());
        assert!(Topic::parse("../etc").is_err());
        assert!(Topic::parse("a b").is_err());
        assert!(Topic::parse("ops-2024_q1").is_ok());
    }
}
