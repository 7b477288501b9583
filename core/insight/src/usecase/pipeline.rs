//! 分析パイプライン: 取得 → 保存 → 検索 → タスク組み立て → 会話 → 洞察抽出

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};

use crate::domain::{
    coordinator_responded_once, default_roster, extract_insights, AnalysisRecord, ChatMessage,
    FetchedReports, FunctionalTermination, MemorySnapshot, ReportKind, COORDINATOR,
};
use crate::ports::outbound::{ChatAgent, InterruptChecker, LlmCompletion, ReportSource};
use crate::usecase::group_chat::GroupChat;
use crate::usecase::llm_agent::LlmChatAgent;
use crate::usecase::memory::MemoryStore;

/// 過去メモリと今回のレポートを 1 つのタスク文にまとめる
pub fn compose_task(reports: &FetchedReports, memory: &MemorySnapshot) -> String {
    let mut lines: Vec<String> = vec![
        "Please analyze these reports:".to_string(),
        String::new(),
        "=== Past Memory: ===".to_string(),
    ];
    for kind in ReportKind::ALL {
        lines.push(format!("{}: {}", kind.label(), memory.get(kind).join(" ")));
    }
    lines.push(String::new());
    lines.push("=== Current Reports ===".to_string());
    lines.push(String::new());
    for kind in ReportKind::ALL {
        lines.push(format!("=== {} Report ===\n{}", kind.label(), reports.get(kind).text));
        lines.push(String::new());
    }
    lines.push("Each domain agent should summarize their respective report.".to_string());
    lines.push(
        "Then the CoordinatorAgent should integrate all summaries into **exactly 5 strategic insights**."
            .to_string(),
    );
    lines.join("\n")
}

/// コーディネーターの発言を `\n` で連結したものと件数
pub fn coordinator_output(messages: &[ChatMessage]) -> (String, usize) {
    let texts: Vec<&str> = messages
        .iter()
        .filter(|m| m.source == COORDINATOR)
        .map(|m| m.content.as_str())
        .collect();
    (texts.join("\n"), texts.len())
}

pub struct InsightPipeline {
    reports: Arc<dyn ReportSource>,
    memory: Arc<MemoryStore>,
    interrupt_checker: Arc<dyn InterruptChecker>,
    clock: Arc<dyn Clock>,
    max_turns: usize,
    log: Arc<dyn Log>,
}

impl InsightPipeline {
    pub fn new(
        reports: Arc<dyn ReportSource>,
        memory: Arc<MemoryStore>,
        interrupt_checker: Arc<dyn InterruptChecker>,
        clock: Arc<dyn Clock>,
        max_turns: usize,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            reports,
            memory,
            interrupt_checker,
            clock,
            max_turns,
            log,
        }
    }

    /// 3 種を順に取得する（失敗しても Unavailable として返る）
    pub fn fetch_reports(&self) -> FetchedReports {
        FetchedReports {
            sales: self.reports.fetch(ReportKind::Sales.endpoint()),
            support: self.reports.fetch(ReportKind::Support.endpoint()),
            operations: self.reports.fetch(ReportKind::Operations.endpoint()),
        }
    }

    /// 取得できたレポートだけをメモリに保存する
    pub fn save_reports(&self, reports: &FetchedReports) -> Result<(), Error> {
        for kind in ReportKind::ALL {
            let report = reports.get(kind);
            if report.is_available() {
                self.memory.save(&kind.topic(), &report.text)?;
            } else {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "unavailable report not saved to memory")
                        .layer("usecase")
                        .kind("pipeline")
                        .field("endpoint", report.endpoint.as_str()),
                );
            }
        }
        Ok(())
    }

    /// トピックごとに固定クエリで上位 top_k 件を引く
    pub fn memory_snapshot(&self, top_k: usize) -> Result<MemorySnapshot, Error> {
        let mut snapshot = MemorySnapshot::default();
        for kind in ReportKind::ALL {
            let hits = self
                .memory
                .retrieve_top_k(&kind.topic(), kind.memory_query(), top_k)?;
            snapshot.set(kind, hits);
        }
        Ok(snapshot)
    }

    fn agents(&self, llm: &Arc<dyn LlmCompletion>) -> Vec<Arc<dyn ChatAgent>> {
        default_roster()
            .into_iter()
            .map(|p| Arc::new(LlmChatAgent::new(p, Arc::clone(llm))) as Arc<dyn ChatAgent>)
            .collect()
    }

    /// 1 回分の分析を実行する（永続化は呼び出し側）
    pub fn run(&self, llm: Arc<dyn LlmCompletion>, top_k: usize) -> Result<AnalysisRecord, Error> {
        let agents = self.agents(&llm);
        self.run_with_agents(llm.profile_name(), agents, top_k)
    }

    pub(crate) fn run_with_agents(
        &self,
        profile: &str,
        agents: Vec<Arc<dyn ChatAgent>>,
        top_k: usize,
    ) -> Result<AnalysisRecord, Error> {
        let reports = self.fetch_reports();
        self.save_reports(&reports)?;
        let memory = self.memory_snapshot(top_k)?;
        let task = compose_task(&reports, &memory);

        let chat = GroupChat::new(
            agents,
            Arc::new(FunctionalTermination::new(
                "coordinator_responded_once",
                coordinator_responded_once,
            )),
            self.max_turns,
            Arc::clone(&self.interrupt_checker),
            Arc::clone(&self.log),
        );
        let outcome = chat.run(&task)?;

        let (coordinator_text, coordinator_count) = coordinator_output(&outcome.messages);
        if coordinator_count > 1 {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "coordinator responded multiple times")
                    .layer("usecase")
                    .kind("pipeline")
                    .field("count", coordinator_count),
            );
        }
        let insights = extract_insights(&coordinator_text);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "analysis finished")
                .layer("usecase")
                .kind("pipeline")
                .field("stop_reason", outcome.stop_reason.as_str())
                .field("turns", outcome.turns)
                .field("insights", insights.len()),
        );

        Ok(AnalysisRecord {
            created_at: self.clock.now_rfc3339(),
            profile: profile.to_string(),
            reports,
            memory,
            conversation: outcome.messages,
            coordinator_count,
            insights,
            stop_reason: outcome.stop_reason,
        })
    }
}
