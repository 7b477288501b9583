//! CLI: 引数解析とページ描画

pub mod args;
pub mod pages;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
