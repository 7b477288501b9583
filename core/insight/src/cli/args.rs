use crate::domain::InsightCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

/// 既定の取得件数（トピックごと）
pub const DEFAULT_TOP_K: usize = 2;

/// 表示するページ（サブコマンド）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Run,
    Insights,
    Memory,
    Kpi(String),
    Profiles,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub top_k: usize,
    pub page: Option<Page>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: false,
            profile: None,
            model: None,
            top_k: DEFAULT_TOP_K,
            page: None,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn page_command(name: &'static str, about: &'static str) -> clap::Command {
    clap::Command::new(name).about(about).disable_help_flag(true)
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("insight")
        .about("Analyze sales, support and operations reports with a team of LLM agents")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write log records to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile (azure, openai, echo, or a name from profiles.json)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (Azure: deployment name)")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("top-k")
                .long("top-k")
                .value_name("n")
                .help("Past memories retrieved per topic")
                .value_parser(value_parser!(usize))
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(page_command(
            "run",
            "Fetch reports, update memory and generate insights",
        ))
        .subcommand(page_command("insights", "Show the last analysis"))
        .subcommand(page_command("memory", "Show retrieved past memory per topic"))
        .subcommand(
            page_command("kpi", "Search KPI statements on the report server").arg(
                clap::Arg::new("term")
                    .index(1)
                    .required(true)
                    .num_args(1..)
                    .help("KPI search term"),
            ),
        )
        .subcommand(page_command("profiles", "List available LLM profiles"))
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let page = match matches.subcommand() {
        Some(("run", _)) => Some(Page::Run),
        Some(("insights", _)) => Some(Page::Insights),
        Some(("memory", _)) => Some(Page::Memory),
        Some(("kpi", sub)) => {
            let words: Vec<String> = sub
                .get_many::<String>("term")
                .map(|i| i.cloned().collect())
                .unwrap_or_default();
            Some(Page::Kpi(words.join(" ")))
        }
        Some(("profiles", _)) => Some(Page::Profiles),
        _ => None,
    };
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        top_k: matches
            .get_one::<usize>("top-k")
            .copied()
            .unwrap_or(DEFAULT_TOP_K),
        page,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "insight", &mut std::io::stdout());
}

/// Config を InsightCommand に変換する
pub fn config_to_command(config: Config) -> InsightCommand {
    if config.help {
        return InsightCommand::Help;
    }
    match config.page {
        None => InsightCommand::Help,
        Some(Page::Run) => InsightCommand::Run {
            profile: config.profile,
            model: config.model,
            top_k: config.top_k,
        },
        Some(Page::Insights) => InsightCommand::Insights,
        Some(Page::Memory) => InsightCommand::Memory {
            top_k: config.top_k,
        },
        Some(Page::Kpi(term)) => InsightCommand::Kpi { term },
        Some(Page::Profiles) => InsightCommand::ListProfiles,
    }
}
