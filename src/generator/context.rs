use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm::{LLMClient, TextGenerator};
use crate::recommender::VideoRecommender;

#[derive(Clone)]
pub struct GeneratorContext {
    /// 文本生成服务；未配置时所有生成步骤走模板与默认值
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// 视频推荐流水线
    pub recommender: VideoRecommender,
    /// 配置
    pub config: Config,
}

impl GeneratorContext {
    /// 创建新的生成器上下文，启动时检查模型连接；连接失败时退回静态模板
    pub async fn connect(config: Config) -> Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = if config.llm.is_configured() {
            let client = LLMClient::new(config.llm.clone())?;
            match client.check_connection().await {
                Ok(()) => Some(Arc::new(client) as Arc<dyn TextGenerator>),
                Err(_) => {
                    warn!("⚠️ 模型服务不可用，本次运行将使用静态模板");
                    None
                }
            }
        } else {
            info!("ℹ️ 未配置 {} 的API KEY，将使用静态模板", config.llm.provider);
            None
        };
        let recommender = VideoRecommender::new(config.pipeline.clone());

        Ok(Self {
            generator,
            recommender,
            config,
        })
    }

    /// 使用指定的生成器与推荐器组装上下文
    pub fn with_parts(
        config: Config,
        generator: Option<Arc<dyn TextGenerator>>,
        recommender: VideoRecommender,
    ) -> Self {
        Self {
            generator,
            recommender,
            config,
        }
    }

    pub fn text_generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }
}
