//! レポート取得の Outbound ポート

use crate::domain::Report;

/// エンドポイント名（例: "sales-report"）からレポートを取得する
///
/// 失敗してもエラーにはせず、`Report::unavailable`（本文は固定文字列）を返す。
pub trait ReportSource: Send + Sync {
    fn fetch(&self, endpoint_name: &str) -> Report;
}
