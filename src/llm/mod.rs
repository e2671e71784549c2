//! 文本生成服务

use anyhow::Result;
use async_trait::async_trait;

pub mod client;

pub use client::LLMClient;

/// 单轮文本生成能力
///
/// 路线图生成与媒体补全只依赖这个接口，测试中可以用脚本化的实现替换真实模型。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
