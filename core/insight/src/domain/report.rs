//! レポート（取得結果）と種別

use crate::domain::Topic;
use serde::{Deserialize, Serialize};

/// 取得に失敗したときに本文の代わりに入る固定文字列
pub const FETCH_FAILED_SENTINEL: &str = "Failed to fetch report.";

/// レポート種別。エンドポイント・メモリトピック・検索クエリが 1 対 1 で決まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sales,
    Support,
    Operations,
}

impl ReportKind {
    /// パイプラインが処理する順序
    pub const ALL: [ReportKind; 3] = [ReportKind::Sales, ReportKind::Support, ReportKind::Operations];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Sales => "sales-report",
            Self::Support => "support-report",
            Self::Operations => "ops-report",
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Self::Sales => Topic::new_unchecked("sales"),
            Self::Support => Topic::new_unchecked("support"),
            Self::Operations => Topic::new_unchecked("operations"),
        }
    }

    /// 過去メモリを引くときの固定クエリ
    pub fn memory_query(&self) -> &'static str {
        match self {
            Self::Sales => "sales performance",
            Self::Support => "customer issues",
            Self::Operations => "operational delays",
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Support => "Support",
            Self::Operations => "Operations",
        }
    }
}

/// 取得状態。Unavailable のとき本文は FETCH_FAILED_SENTINEL。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReportStatus {
    Fetched,
    Unavailable { reason: String },
}

/// 1 回の実行で取得したレポート（取得後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub endpoint: String,
    pub text: String,
    pub status: ReportStatus,
}

impl Report {
    pub fn fetched(endpoint: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            text: text.into(),
            status: ReportStatus::Fetched,
        }
    }

    pub fn unavailable(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            text: FETCH_FAILED_SENTINEL.to_string(),
            status: ReportStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ReportStatus::Fetched
    }
}
