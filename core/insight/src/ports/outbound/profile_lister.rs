//! プロファイル一覧の Outbound ポート

use common::error::Error;

pub trait ProfileLister: Send + Sync {
    /// (名前一覧（ソート済み）, 既定プロファイル名)
    fn list_profiles(&self) -> Result<(Vec<String>, Option<String>), Error>;
}
