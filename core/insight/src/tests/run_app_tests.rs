//! 配線済みアプリを一時ホームと echo プロファイルで動かすテスト

use std::collections::HashMap;
use std::sync::Arc;

use common::domain::ProviderName;
use common::ports::outbound::EnvResolver;

use super::closed_base_url;
use crate::adapter::NoopInterruptChecker;
use crate::cli::args::parse_args_from;
use crate::domain::StopReason;
use crate::ports::inbound::UseCaseRunner;
use crate::wiring::{wire_with, App};
use crate::Runner;

struct MapEnv(HashMap<String, String>);

impl EnvResolver for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

fn app_in(home: &std::path::Path, extra: &[(&str, &str)]) -> App {
    let mut vars = HashMap::from([
        ("INSIGHT_HOME".to_string(), home.display().to_string()),
        ("INSIGHT_REPORT_BASE_URL".to_string(), closed_base_url()),
        ("INSIGHT_HTTP_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    wire_with(Arc::new(MapEnv(vars)), false, Arc::new(NoopInterruptChecker)).unwrap()
}

#[test]
fn test_run_with_echo_profile_persists_last_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[]);
    let record = app
        .use_case
        .run_analysis(Some(&ProviderName::new("echo")), None, 2)
        .unwrap();
    assert_eq!(record.profile, "echo");
    assert_eq!(record.stop_reason, StopReason::TerminationMet);
    assert_eq!(record.coordinator_count, 1);
    assert_eq!(record.insights.len(), 1);
    assert!(record.insights[0].starts_with("[echo] system: You are the CoordinatorAgent"));

    let last = app.use_case.last_analysis().unwrap().unwrap();
    assert_eq!(last, record);
    assert!(dir.path().join("state").join("last_analysis.json").exists());

    let log = std::fs::read_to_string(dir.path().join("logs").join("insight.jsonl")).unwrap();
    assert!(log.contains("report fetch failed"));
}

#[test]
fn test_unreachable_report_server_leaves_memory_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[]);
    let record = app
        .use_case
        .run_analysis(Some(&ProviderName::new("echo")), None, 2)
        .unwrap();
    assert!(!record.reports.sales.is_available());
    let snapshot = app.use_case.memory_snapshot(2).unwrap();
    assert!(snapshot.sales.is_empty());
    assert!(!dir.path().join("memory").join("sales.jsonl").exists());
}

#[test]
fn test_last_analysis_is_none_on_fresh_home() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[]);
    assert!(app.use_case.last_analysis().unwrap().is_none());
}

#[test]
fn test_unknown_profile_is_usage_error_and_nothing_saved() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[]);
    let e = app
        .use_case
        .run_analysis(Some(&ProviderName::new("nope")), None, 2)
        .unwrap_err();
    assert!(e.is_usage());
    assert!(app.use_case.last_analysis().unwrap().is_none());
}

#[test]
fn test_empty_kpi_term_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[]);
    assert!(app.use_case.search_kpi("   ").unwrap_err().is_usage());
}

#[test]
fn test_invalid_setting_fails_wiring() {
    let dir = tempfile::tempdir().unwrap();
    let vars = HashMap::from([
        ("INSIGHT_HOME".to_string(), dir.path().display().to_string()),
        ("INSIGHT_MAX_TURNS".to_string(), "-1".to_string()),
    ]);
    let e = wire_with(Arc::new(MapEnv(vars)), false, Arc::new(NoopInterruptChecker))
        .err()
        .unwrap();
    assert_eq!(e.exit_code(), 78);
}

#[test]
fn test_profiles_json_entries_are_listed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config").join("profiles.json"),
        r#"{"default_provider":"local","providers":{"local":{"type":"echo"}}}"#,
    )
    .unwrap();
    let app = app_in(dir.path(), &[]);
    let (names, default) = app.use_case.list_profiles().unwrap();
    assert!(names.contains(&"local".to_string()));
    assert!(names.contains(&"azure".to_string()));
    assert_eq!(default.as_deref(), Some("local"));
}

#[test]
fn test_runner_logs_lifecycle_records() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path(), &[("INSIGHT_MEMORY_BACKEND", "memory")]);
    let config =
        parse_args_from(&["insight".to_string(), "profiles".to_string()]).unwrap();
    let code = Runner { app }.run(config).unwrap();
    assert_eq!(code, 0);
    let log = std::fs::read_to_string(dir.path().join("logs").join("insight.jsonl")).unwrap();
    let lines: Vec<serde_json::Value> = log
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let messages: Vec<&str> = lines
        .iter()
        .filter_map(|v| v["message"].as_str())
        .collect();
    assert!(messages.contains(&"command started"));
    assert!(messages.contains(&"command finished"));
    let finished = lines
        .iter()
        .find(|v| v["message"] == "command finished")
        .unwrap();
    assert_eq!(finished["fields"]["command"], "profiles");
    assert_eq!(finished["fields"]["exit_code"], 0);
}
