//! 配線: Settings と標準アダプタで InsightUseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdEnvResolver, StdFileSystem, StderrLog, TeeLog};
use common::domain::HomeDir;
use common::embedding::{HashingEmbedder, OpenAiEmbedder};
use common::error::Error;
use common::llm::openai_compat::DEFAULT_BASE_URL;
use common::ports::outbound::{Embedder, EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::adapter::{
    EmbedderKind, FileAnalysisStore, HttpKpiSearch, HttpReportSource, InProcessMemoryLog,
    JsonlMemoryLog, MemoryBackend, NoopInterruptChecker, ProfileLlmCompletionFactory,
    RedisMemoryLog, Settings, SigintChecker, StdProfileLister,
};
use crate::ports::outbound::{InterruptChecker, MemoryLog};
use crate::usecase::app::{InsightDeps, InsightUseCase, ModelDeps};
use crate::usecase::memory::MemoryStore;
use crate::usecase::pipeline::InsightPipeline;

pub struct App {
    pub logger: Arc<dyn Log>,
    pub use_case: InsightUseCase,
}

/// 標準環境で組み立てる（Ctrl+C ハンドラも登録する）
pub fn wire_insight(verbose: bool) -> Result<App, Error> {
    let interrupt_checker: Arc<dyn InterruptChecker> = match SigintChecker::new() {
        Ok(c) => Arc::new(c),
        Err(_) => Arc::new(NoopInterruptChecker),
    };
    wire_with(Arc::new(StdEnvResolver), verbose, interrupt_checker)
}

fn build_logger(fs: &Arc<dyn FileSystem>, home: &HomeDir, verbose: bool) -> Arc<dyn Log> {
    let file: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(fs), home.log_path()));
    if verbose {
        Arc::new(TeeLog::new(vec![file, Arc::new(StderrLog)]))
    } else {
        file
    }
}

fn build_embedder(settings: &Settings, env: &dyn EnvResolver) -> Result<Arc<dyn Embedder>, Error> {
    let embedder: Arc<dyn Embedder> = match settings.embedder {
        EmbedderKind::Hashing => Arc::new(HashingEmbedder::new(
            settings.embedding_dimension.unwrap_or(0),
        )?),
        EmbedderKind::OpenAiCompat => {
            let key_env = settings
                .embedding_api_key_env
                .as_deref()
                .unwrap_or("OPENAI_API_KEY");
            Arc::new(OpenAiEmbedder::new(
                settings
                    .embedding_base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                settings.embedding_model.clone(),
                env.var(key_env),
                settings.embedding_dimension,
                settings.http_timeout,
            )?)
        }
    };
    Ok(embedder)
}

fn build_memory_log(settings: &Settings, fs: &Arc<dyn FileSystem>) -> Result<Arc<dyn MemoryLog>, Error> {
    let log: Arc<dyn MemoryLog> = match settings.memory_backend {
        MemoryBackend::File => Arc::new(JsonlMemoryLog::new(
            Arc::clone(fs),
            settings.memory_dir.clone(),
        )),
        MemoryBackend::Redis => Arc::new(RedisMemoryLog::open(
            &settings.redis_url,
            settings.http_timeout,
        )?),
        MemoryBackend::Memory => Arc::new(InProcessMemoryLog::new()),
    };
    Ok(log)
}

/// 環境変数の解決元と割り込み検知を差し替えて組み立てる（テストからも使う）
pub fn wire_with(
    env: Arc<dyn EnvResolver>,
    verbose: bool,
    interrupt_checker: Arc<dyn InterruptChecker>,
) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let home = env.resolve_home_dir()?;
    let logger = build_logger(&fs, &home, verbose);
    let settings = Settings::from_env(env.as_ref(), &home)?;

    let embedder = build_embedder(&settings, env.as_ref())?;
    let memory_log = build_memory_log(&settings, &fs)?;
    let _ = logger.log(
        &LogRecord::new(LogLevel::Debug, "wired")
            .layer("wiring")
            .kind("config")
            .field("home", home.display().to_string())
            .field("memory_backend", memory_log.backend())
            .field("embedder", embedder.name())
            .field("report_base_url", settings.report_base_url.as_str()),
    );

    let memory = Arc::new(MemoryStore::new(
        memory_log,
        embedder,
        settings.memory_cap,
        Arc::clone(&logger),
    ));
    let reports = Arc::new(HttpReportSource::new(
        &settings.report_base_url,
        settings.http_timeout,
        settings.fetch_attempts,
        Arc::clone(&logger),
    )?);
    let pipeline = InsightPipeline::new(
        reports,
        memory,
        interrupt_checker,
        Arc::new(StdClock),
        settings.max_turns,
        Arc::clone(&logger),
    );
    let kpi = Arc::new(HttpKpiSearch::new(
        &settings.report_base_url,
        settings.http_timeout,
        Arc::clone(&logger),
    )?);
    let model = ModelDeps {
        llm_factory: Arc::new(ProfileLlmCompletionFactory::new(
            Arc::clone(&fs),
            Arc::clone(&env),
            home.clone(),
            settings.model_timeout,
            Arc::clone(&logger),
        )),
        profile_lister: Arc::new(StdProfileLister::new(Arc::clone(&fs), home.clone())),
    };
    let store = Arc::new(FileAnalysisStore::new(Arc::clone(&fs), home.state_dir()));

    let use_case = InsightUseCase::new(InsightDeps {
        pipeline,
        model,
        store,
        kpi,
        log: Arc::clone(&logger),
    });
    Ok(App { logger, use_case })
}
