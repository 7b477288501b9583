//! 1 回の分析実行の結果

use crate::domain::{ChatMessage, Report, ReportKind};
use serde::{Deserialize, Serialize};

/// 会話が止まった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// 終了条件を満たした
    TerminationMet,
    /// ターン上限に達した
    MaxTurns,
    /// Ctrl+C
    Interrupted,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TerminationMet => "termination_met",
            Self::MaxTurns => "max_turns",
            Self::Interrupted => "interrupted",
        }
    }
}

/// 3 種のレポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedReports {
    pub sales: Report,
    pub support: Report,
    pub operations: Report,
}

impl FetchedReports {
    pub fn get(&self, kind: ReportKind) -> &Report {
        match kind {
            ReportKind::Sales => &self.sales,
            ReportKind::Support => &self.support,
            ReportKind::Operations => &self.operations,
        }
    }
}

/// トピックごとに引いた過去メモリ（類似度順）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub sales: Vec<String>,
    pub support: Vec<String>,
    pub operations: Vec<String>,
}

impl MemorySnapshot {
    pub fn get(&self, kind: ReportKind) -> &[String] {
        match kind {
            ReportKind::Sales => &self.sales,
            ReportKind::Support => &self.support,
            ReportKind::Operations => &self.operations,
        }
    }

    pub fn set(&mut self, kind: ReportKind, entries: Vec<String>) {
        match kind {
            ReportKind::Sales => self.sales = entries,
            ReportKind::Support => self.support = entries,
            ReportKind::Operations => self.operations = entries,
        }
    }
}

/// 永続化される分析結果（`<home>/state/last_analysis.json`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// RFC3339
    pub created_at: String,
    /// 使ったプロファイル名
    pub profile: String,
    pub reports: FetchedReports,
    pub memory: MemorySnapshot,
    pub conversation: Vec<ChatMessage>,
    pub coordinator_count: usize,
    pub insights: Vec<String>,
    pub stop_reason: StopReason,
}
