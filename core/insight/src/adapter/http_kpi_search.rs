//! レポートサーバの /search-kpi を呼ぶ KpiSearch 実装
//!
//! ユーザーが明示的に呼ぶコマンドなので、失敗はそのままエラーとして返す。

use crate::ports::outbound::KpiSearch;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct KpiResponse {
    #[serde(default)]
    matches: Vec<String>,
}

pub struct HttpKpiSearch {
    client: reqwest::blocking::Client,
    base_url: String,
    log: Arc<dyn Log>,
}

impl HttpKpiSearch {
    pub fn new(base_url: &str, timeout: Duration, log: Arc<dyn Log>) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            log,
        })
    }
}

impl KpiSearch for HttpKpiSearch {
    fn search(&self, kpi: &str) -> Result<Vec<String>, Error> {
        let url = format!("{}/search-kpi", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "kpi": kpi }))
            .send()
            .map_err(|e| Error::http(format!("KPI search request failed: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!("KPI search error: HTTP {}", status)));
        }
        let body: KpiResponse = response
            .json()
            .map_err(|e| Error::json(format!("Failed to parse KPI search response: {}", e)))?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "kpi search")
                .layer("adapter")
                .kind("kpi")
                .field("kpi", kpi)
                .field("matches", body.matches.len()),
        );
        Ok(body.matches)
    }
}
