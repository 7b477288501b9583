//! 端末向けページの描画（文字列を返すだけ。出力は main）

use std::fmt::Write;

use crate::domain::{AnalysisRecord, MemorySnapshot, ReportKind, ReportStatus, StopReason, COORDINATOR};

fn push_insights(out: &mut String, insights: &[String]) {
    if insights.is_empty() {
        let _ = writeln!(out, "No insights returned by {}.", COORDINATOR);
        return;
    }
    for (i, block) in insights.iter().enumerate() {
        let _ = writeln!(out, "**Insight {}:** {}", i + 1, block);
    }
}

fn push_unavailable_reports(out: &mut String, record: &AnalysisRecord) {
    for kind in ReportKind::ALL {
        let report = record.reports.get(kind);
        if let ReportStatus::Unavailable { reason } = &report.status {
            let _ = writeln!(out, "Note: {} was unavailable ({}).", report.endpoint, reason);
        }
    }
}

/// Run Analysis
pub fn render_run(record: &AnalysisRecord) -> String {
    let mut out = String::new();
    push_unavailable_reports(&mut out, record);
    out.push_str("\n=== Full Agent Conversation ===\n\n");
    for m in &record.conversation {
        let _ = writeln!(out, "[{}]:\n{}\n", m.source, m.content);
    }
    let _ = writeln!(
        out,
        "{} appeared {} times.",
        COORDINATOR, record.coordinator_count
    );
    if record.coordinator_count > 1 {
        let _ = writeln!(out, "Warning: {} responded multiple times.", COORDINATOR);
    }
    match record.stop_reason {
        StopReason::TerminationMet => {}
        StopReason::MaxTurns => out.push_str("Conversation stopped at the turn limit.\n"),
        StopReason::Interrupted => out.push_str("Conversation interrupted.\n"),
    }
    let _ = writeln!(out, "\n=== Strategic Insights from {} ===\n", COORDINATOR);
    push_insights(&mut out, &record.insights);
    out
}

/// View Insights
pub fn render_insights(record: Option<&AnalysisRecord>) -> String {
    let mut out = String::from("=== Strategic Insights ===\n\n");
    match record {
        None => out.push_str("No analysis found. Run `insight run` first.\n"),
        Some(r) => {
            let _ = writeln!(
                out,
                "Last analysis: {} (profile: {}, stop: {})\n",
                r.created_at,
                r.profile,
                r.stop_reason.as_str()
            );
            push_unavailable_reports(&mut out, r);
            push_insights(&mut out, &r.insights);
        }
    }
    out
}

/// View Memory
pub fn render_memory(snapshot: &MemorySnapshot) -> String {
    let mut out = String::from("=== Long-Term Memory Snapshots ===\n");
    for kind in ReportKind::ALL {
        let _ = writeln!(out, "\n**{} Memory:**", kind.label());
        let entries = snapshot.get(kind);
        if entries.is_empty() {
            out.push_str("(empty)\n");
        }
        for (i, mem) in entries.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, mem);
        }
    }
    out
}

pub fn render_kpi(term: &str, matches: &[String]) -> String {
    let mut out = format!("=== KPI Search: {} ===\n\n", term);
    if matches.is_empty() {
        out.push_str("No matches.\n");
    }
    for m in matches {
        let _ = writeln!(out, "- {}", m);
    }
    out
}

pub fn render_profiles(names: &[String], default: Option<&str>) -> String {
    let mut out = String::new();
    for name in names {
        if default == Some(name.as_str()) {
            let _ = writeln!(out, "{} (default)", name);
        } else {
            let _ = writeln!(out, "{}", name);
        }
    }
    out
}
