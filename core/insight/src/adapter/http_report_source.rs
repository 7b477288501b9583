//! レポートサーバから GET で本文を取得する ReportSource 実装
//!
//! 接続失敗・非 2xx・壊れた JSON はすべて Unavailable（本文は固定文字列）にして返す。
//! `attempts` 回まで試し、間に線形に伸びる待ちを入れる。

use crate::domain::Report;
use crate::ports::outbound::ReportSource;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const BACKOFF_STEP: Duration = Duration::from_millis(200);

pub struct HttpReportSource {
    client: reqwest::blocking::Client,
    base_url: String,
    attempts: u32,
    backoff: Duration,
    log: Arc<dyn Log>,
}

impl HttpReportSource {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        attempts: u32,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            attempts: attempts.max(1),
            backoff: BACKOFF_STEP,
            log,
        })
    }

    /// 再試行の待ち時間の単位を変える（テスト用）
    #[cfg(test)]
    pub fn with_backoff(mut self, step: Duration) -> Self {
        self.backoff = step;
        self
    }

    fn url(&self, endpoint_name: &str) -> String {
        format!("{}/{}", self.base_url, endpoint_name.trim_start_matches('/'))
    }

    /// 1 回分の取得。Err は失敗理由の文字列。
    fn try_fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }
        let body = response
            .text()
            .map_err(|e| format!("failed to read body: {}", e))?;
        let v: Value =
            serde_json::from_str(&body).map_err(|e| format!("malformed JSON: {}", e))?;
        match v.get("report") {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(format!("'report' is not a string: {}", other)),
        }
    }
}

impl ReportSource for HttpReportSource {
    fn fetch(&self, endpoint_name: &str) -> Report {
        let url = self.url(endpoint_name);
        let mut last_reason = String::new();
        for attempt in 1..=self.attempts {
            match self.try_fetch(&url) {
                Ok(text) => {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Info, "report fetched")
                            .layer("adapter")
                            .kind("fetch")
                            .field("endpoint", endpoint_name)
                            .field("attempt", attempt)
                            .field("chars", text.chars().count()),
                    );
                    return Report::fetched(endpoint_name, text);
                }
                Err(reason) => {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Warn, "report fetch failed")
                            .layer("adapter")
                            .kind("fetch")
                            .field("endpoint", endpoint_name)
                            .field("url", url.as_str())
                            .field("attempt", attempt)
                            .field("reason", reason.as_str()),
                    );
                    last_reason = reason;
                    if attempt < self.attempts {
                        std::thread::sleep(self.backoff * attempt);
                    }
                }
            }
        }
        Report::unavailable(endpoint_name, last_reason)
    }
}
