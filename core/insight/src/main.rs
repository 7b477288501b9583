mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use cli::pages::{render_insights, render_kpi, render_memory, render_profiles, render_run};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::InsightCommand;
use ports::inbound::UseCaseRunner;
use wiring::{wire_insight, App};

/// InsightCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn dispatch(&self, cmd: InsightCommand) -> Result<i32, Error> {
        let use_case = &self.app.use_case;
        match cmd {
            InsightCommand::Help => {
                print_help();
                Ok(0)
            }
            InsightCommand::Run {
                profile,
                model,
                top_k,
            } => {
                let record = use_case.run_analysis(profile.as_ref(), model.as_ref(), top_k)?;
                print!("{}", render_run(&record));
                Ok(0)
            }
            InsightCommand::Insights => {
                let last = use_case.last_analysis()?;
                print!("{}", render_insights(last.as_ref()));
                Ok(0)
            }
            InsightCommand::Memory { top_k } => {
                let snapshot = use_case.memory_snapshot(top_k)?;
                print!("{}", render_memory(&snapshot));
                Ok(0)
            }
            InsightCommand::Kpi { term } => {
                let matches = use_case.search_kpi(&term)?;
                print!("{}", render_kpi(&term, &matches));
                Ok(0)
            }
            InsightCommand::ListProfiles => {
                let (names, default) = use_case.list_profiles()?;
                print!("{}", render_profiles(&names, default.as_deref()));
                Ok(0)
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );
        let result = self.dispatch(cmd);
        let code = match &result {
            Ok(c) => *c,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn cmd_name_for_log(cmd: &InsightCommand) -> &'static str {
    match cmd {
        InsightCommand::Help => "help",
        InsightCommand::Run { .. } => "run",
        InsightCommand::Insights => "insights",
        InsightCommand::Memory { .. } => "memory",
        InsightCommand::Kpi { .. } => "kpi",
        InsightCommand::ListProfiles => "profiles",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("insight: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_insight(config.verbose)?;
    Runner { app }.run(config)
}

fn print_usage() {
    eprintln!("Usage: insight [options] <run|insights|memory|kpi <term>|profiles>");
}

fn print_help() {
    println!("Usage: insight [options] <command>");
    println!("Commands:");
    println!("  run                  Fetch the three reports, update memory, run the agent team and show insights");
    println!("  insights             Show the insights of the last analysis");
    println!("  memory               Show past memories retrieved per topic (read-only)");
    println!("  kpi <term>           Search KPI statements on the report server");
    println!("  profiles             List available LLM profiles (built-ins + profiles.json)");
    println!("Options:");
    println!("  -h, --help           Show this help message");
    println!("  -v, --verbose        Also write log records to stderr");
    println!("  -p, --profile <p>    LLM profile (azure, openai, echo, ...). Default: profiles.json default, or azure");
    println!("  -m, --model <m>      Model name (Azure: deployment name)");
    println!("  --top-k <n>          Past memories retrieved per topic (default: 2)");
    println!("  --generate <shell>   Generate shell completion script (bash, zsh, fish, ...)");
    println!();
    println!("Environment:");
    println!("  INSIGHT_HOME                Home directory (default: $XDG_CONFIG_HOME/insightsync or ~/.config/insightsync)");
    println!("                              Profiles: $INSIGHT_HOME/config/profiles.json; log: $INSIGHT_HOME/logs/insight.jsonl");
    println!("  INSIGHT_REPORT_BASE_URL     Report server (default: http://localhost:8000)");
    println!("  INSIGHT_MEMORY_BACKEND      file (default), redis or memory");
    println!("  INSIGHT_REDIS_URL           Redis URL (default: redis://127.0.0.1:6379/)");
    println!("  INSIGHT_MEMORY_DIR          Directory of the file backend (default: $INSIGHT_HOME/memory)");
    println!("  INSIGHT_MEMORY_CAP          Keep only the newest N records per topic");
    println!("  INSIGHT_EMBEDDER            hashing (default) or openai_compat");
    println!("  INSIGHT_FETCH_ATTEMPTS      Report fetch attempts (default: 1)");
    println!("  INSIGHT_HTTP_TIMEOUT_SECS   Report/KPI/embedding timeout (default: 30)");
    println!("  INSIGHT_MODEL_TIMEOUT_SECS  Chat completion timeout (default: 120)");
    println!("  INSIGHT_MAX_TURNS           Agent turn limit (default: 10)");
    println!("  AZURE_OPENAI_ENDPOINT, AZURE_DEPLOYMENT_ID, AZURE_API_KEY, AZURE_API_VERSION");
    println!();
    println!("Examples:");
    println!("  insight run");
    println!("  insight -p echo run");
    println!("  insight memory --top-k 3");
    println!("  insight kpi delivery SLA");
}
