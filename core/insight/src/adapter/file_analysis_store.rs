//! 直近の分析結果を `<home>/state/last_analysis.json` に置く AnalysisStore 実装

use std::path::PathBuf;
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::AnalysisRecord;
use crate::ports::outbound::AnalysisStore;

const FILE_NAME: &str = "last_analysis.json";

pub struct FileAnalysisStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileAnalysisStore {
    pub fn new(fs: Arc<dyn FileSystem>, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: state_dir.into().join(FILE_NAME),
        }
    }
}

impl AnalysisStore for FileAnalysisStore {
    fn save(&self, record: &AnalysisRecord) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(record)?;
        self.fs.write_atomic(&self.path, &json)
    }

    fn load_last(&self) -> Result<Option<AnalysisRecord>, Error> {
        if !self.fs.exists(&self.path) {
            return Ok(None);
        }
        let contents = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| Error::json(format!("{}: {}", self.path.display(), e)))
    }
}
