//! 直近の分析結果の保存先

use crate::domain::AnalysisRecord;
use common::error::Error;

pub trait AnalysisStore: Send + Sync {
    /// 直近の 1 件として保存する（前回分は置き換え）
    fn save(&self, record: &AnalysisRecord) -> Result<(), Error>;

    /// 無ければ Ok(None)
    fn load_last(&self) -> Result<Option<AnalysisRecord>, Error>;
}
