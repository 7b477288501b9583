//! KPI 検索の Outbound ポート

use common::error::Error;

pub trait KpiSearch: Send + Sync {
    /// 一致した文の一覧（サーバの返す順）
    fn search(&self, kpi: &str) -> Result<Vec<String>, Error>;
}
