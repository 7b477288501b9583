//! LLMドライバーとプロバイダの実装
//!
//! Azure OpenAI / OpenAI 互換 / Echo の各プロバイダで共通する処理を提供します。
//! ストリーミングやツール呼び出しは扱わない（1 ターン 1 リクエスト）。

pub mod azure;
pub mod config;
pub mod driver;
pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use driver::LlmDriver;
pub use factory::{create_provider, AnyProvider, ProviderOptions, ProviderType};
pub use provider::{LlmProvider, Message};
pub use resolver::{
    list_available_profiles, load_profiles_config, resolve_provider, ResolvedProvider,
};
