//! insight のユースケース（ページごとの処理をまとめる）

use std::sync::Arc;

use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::domain::{AnalysisRecord, MemorySnapshot};
use crate::ports::outbound::{AnalysisStore, KpiSearch, LlmCompletionFactory, ProfileLister};
use crate::usecase::pipeline::InsightPipeline;

// --- 責務別 Deps（wiring が組み立てて渡す）

pub struct InsightDeps {
    pub pipeline: InsightPipeline,
    pub model: ModelDeps,
    pub store: Arc<dyn AnalysisStore>,
    pub kpi: Arc<dyn KpiSearch>,
    pub log: Arc<dyn Log>,
}

pub struct ModelDeps {
    pub llm_factory: Arc<dyn LlmCompletionFactory>,
    pub profile_lister: Arc<dyn ProfileLister>,
}

pub struct InsightUseCase {
    deps: InsightDeps,
}

impl InsightUseCase {
    pub fn new(deps: InsightDeps) -> Self {
        Self { deps }
    }

    /// Run Analysis: パイプラインを実行し、結果を直近の分析として保存する
    pub fn run_analysis(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
        top_k: usize,
    ) -> Result<AnalysisRecord, Error> {
        let llm = self.deps.model.llm_factory.create(profile, model)?;
        let record = self.deps.pipeline.run(llm, top_k)?;
        self.deps.store.save(&record)?;
        Ok(record)
    }

    /// View Insights
    pub fn last_analysis(&self) -> Result<Option<AnalysisRecord>, Error> {
        self.deps.store.load_last()
    }

    /// View Memory（取得も保存もしない）
    pub fn memory_snapshot(&self, top_k: usize) -> Result<MemorySnapshot, Error> {
        self.deps.pipeline.memory_snapshot(top_k)
    }

    pub fn search_kpi(&self, term: &str) -> Result<Vec<String>, Error> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::invalid_argument("KPI search term must not be empty"));
        }
        let matches = self.deps.kpi.search(term)?;
        let _ = self.deps.log.log(
            &LogRecord::new(LogLevel::Info, "kpi searched")
                .layer("usecase")
                .kind("kpi")
                .field("term", term)
                .field("matches", matches.len()),
        );
        Ok(matches)
    }

    pub fn list_profiles(&self) -> Result<(Vec<String>, Option<String>), Error> {
        self.deps.model.profile_lister.list_profiles()
    }
}
