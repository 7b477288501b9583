//! insight コマンドの enum（Command Pattern）
//!
//! どのページを出すかを enum で明示する。

use common::domain::{ModelName, ProviderName};

#[derive(Debug, Clone, PartialEq)]
pub enum InsightCommand {
    /// ヘルプ表示
    Help,
    /// Run Analysis: 取得 → 保存 → 検索 → 会話 → 表示
    Run {
        profile: Option<ProviderName>,
        model: Option<ModelName>,
        top_k: usize,
    },
    /// View Insights: 直近の分析結果
    Insights,
    /// View Memory: トピックごとの過去メモリ（読み取りのみ）
    Memory { top_k: usize },
    /// KPI 検索
    Kpi { term: String },
    /// プロファイル一覧
    ListProfiles,
}
