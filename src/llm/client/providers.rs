//! 各服务商的rig客户端

use anyhow::Result;
use rig::{
    client::CompletionClient,
    completion::Prompt,
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};

use crate::config::{LLMConfig, LLMProvider};

/// 单次调用的参数
#[derive(Debug, Clone, Copy)]
pub struct PromptSettings<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub max_tokens: u64,
    pub temperature: f64,
}

/// 补上公共参数、构建Agent并执行一次prompt
macro_rules! run_agent {
    ($builder:expr, $settings:expr, $prompt:expr) => {{
        let agent = $builder
            .preamble($settings.system_prompt)
            .temperature($settings.temperature)
            .build();
        agent.prompt($prompt).await.map_err(anyhow::Error::from)
    }};
}

/// 已连接的模型服务
#[derive(Clone)]
pub enum Backend {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Mistral(rig::providers::mistral::Client),
    Anthropic(rig::providers::anthropic::Client),
    Gemini(rig::providers::gemini::Client),
    Ollama(rig::providers::ollama::Client),
}

impl Backend {
    pub fn connect(config: &LLMConfig) -> Result<Self> {
        let key = config.api_key.as_str();
        let backend = match config.provider {
            LLMProvider::OpenAI => Backend::OpenAI(
                rig::providers::openai::Client::builder(key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::DeepSeek => Backend::DeepSeek(
                rig::providers::deepseek::Client::builder(key)
                    .base_url(&config.api_base_url)
                    .build(),
            ),
            LLMProvider::Mistral => {
                Backend::Mistral(rig::providers::mistral::Client::builder(key).build())
            }
            LLMProvider::Anthropic => {
                Backend::Anthropic(rig::providers::anthropic::ClientBuilder::new(key).build()?)
            }
            LLMProvider::Gemini => {
                Backend::Gemini(rig::providers::gemini::Client::builder(key).build()?)
            }
            LLMProvider::Ollama => Backend::Ollama(rig::providers::ollama::Client::builder().build()),
        };
        Ok(backend)
    }

    pub fn provider(&self) -> LLMProvider {
        match self {
            Backend::OpenAI(_) => LLMProvider::OpenAI,
            Backend::DeepSeek(_) => LLMProvider::DeepSeek,
            Backend::Mistral(_) => LLMProvider::Mistral,
            Backend::Anthropic(_) => LLMProvider::Anthropic,
            Backend::Gemini(_) => LLMProvider::Gemini,
            Backend::Ollama(_) => LLMProvider::Ollama,
        }
    }

    /// 执行一次单轮对话
    ///
    /// DeepSeek与Mistral不传max_tokens，使用服务端默认上限。
    pub async fn prompt(&self, settings: &PromptSettings<'_>, user_prompt: &str) -> Result<String> {
        let model = settings.model;
        match self {
            Backend::OpenAI(client) => run_agent!(
                client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .max_tokens(settings.max_tokens),
                settings,
                user_prompt
            ),
            Backend::DeepSeek(client) => run_agent!(client.agent(model), settings, user_prompt),
            Backend::Mistral(client) => run_agent!(client.agent(model), settings, user_prompt),
            Backend::Anthropic(client) => run_agent!(
                client.agent(model).max_tokens(settings.max_tokens),
                settings,
                user_prompt
            ),
            Backend::Gemini(client) => {
                let params = serde_json::to_value(
                    AdditionalParameters::default().with_config(GenerationConfig::default()),
                )?;
                run_agent!(
                    client
                        .agent(model)
                        .max_tokens(settings.max_tokens)
                        .additional_params(params),
                    settings,
                    user_prompt
                )
            }
            Backend::Ollama(client) => run_agent!(
                client.agent(model).max_tokens(settings.max_tokens),
                settings,
                user_prompt
            ),
        }
    }
}
