//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::future::Future;
use tracing::{info, warn};

use crate::config::LLMConfig;
use crate::llm::TextGenerator;
use crate::llm::client::utils::evaluate_befitting_model;

mod providers;
pub mod utils;

use providers::{Backend, PromptSettings};

/// 路线图生成使用的系统提示词
const SYSTEM_PROMPT: &str = "You are an expert planner who writes clear, structured, plain-text roadmaps and follows the requested output format exactly.";

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: Backend,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = Backend::connect(&config)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        info!("🔄 正在检查模型连接...");
        match self.prompt_once(SYSTEM_PROMPT, "Hello", &self.config.model_efficient).await {
            Ok(_) => {
                info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                warn!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_retries = self.config.retry_attempts.max(1);
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    warn!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 单轮调用，受超时约束
    async fn prompt_once(&self, system_prompt: &str, user_prompt: &str, model: &str) -> Result<String> {
        let settings = PromptSettings {
            model,
            system_prompt,
            max_tokens: self.config.max_tokens.into(),
            temperature: self.config.temperature,
        };
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.client.prompt(&settings, user_prompt)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("模型 {} 调用超时 ({:?})", model, timeout)),
        }
    }

    /// 简化的单轮对话方法（不使用工具），首选模型失败后切换到备选模型
    pub async fn prompt_without_react(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let (befitting_model, fallover_model) =
            evaluate_befitting_model(&self.config, system_prompt, user_prompt);

        let result = self
            .retry_with_backoff(|| self.prompt_once(system_prompt, user_prompt, &befitting_model))
            .await;

        match (result, fallover_model) {
            (Ok(text), _) => Ok(text),
            (Err(e), Some(model)) => {
                warn!(
                    "❌ 调用模型服务出错，尝试 {} 次均失败，尝试使用备选模型{}...{}",
                    self.config.retry_attempts, model, e
                );
                self.retry_with_backoff(|| self.prompt_once(system_prompt, user_prompt, &model))
                    .await
            }
            (Err(e), None) => {
                warn!(
                    "❌ 调用模型服务出错，尝试 {} 次均失败...{}",
                    self.config.retry_attempts, e
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompt_without_react(SYSTEM_PROMPT, prompt).await
    }
}
