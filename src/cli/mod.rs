use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use crate::types::{Category, RoadmapRequest, TripDescriptor};
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SmartLearn-RS - 由AI驱动的学习/旅行路线图生成与视频推荐引擎
#[derive(Parser, Debug)]
#[command(name = "smartlearn")]
#[command(
    about = "Generates laid-out learning and travel roadmaps from a free-text goal, and ranks tutorial videos for a topic through an external ML pipeline with layered fallbacks."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出文件，未指定时打印到标准输出
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM Provider (openai, deepseek, mistral, anthropic, gemini, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于常规生成
    #[arg(long, global = true)]
    pub model_efficient: Option<String>,

    /// 高质量模型，作为efficient失效情况下的兜底
    #[arg(long, global = true)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 视频搜索服务KEY
    #[arg(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    /// 流水线脚本目录
    #[arg(long, global = true)]
    pub scripts_dir: Option<PathBuf>,

    /// Python解释器
    #[arg(long, global = true)]
    pub python: Option<String>,

    /// 单个流水线阶段的超时时间（秒）
    #[arg(long, global = true)]
    pub stage_timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 根据目标生成路线图
    Roadmap(RoadmapArgs),
    /// 为一个或多个主题推荐视频，各主题并行运行
    Videos {
        /// 主题
        #[arg(required = true)]
        topics: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RoadmapArgs {
    /// 学习或旅行目标
    #[arg(short, long)]
    pub prompt: String,

    /// 类别 (kitchen_recipe, travel_planner, project, fitness_planner, subject)
    #[arg(long, default_value = "project")]
    pub category: Category,

    /// 旅行目的地
    #[arg(long)]
    pub destination: Option<String>,

    /// 出发地
    #[arg(long)]
    pub starting_location: Option<String>,

    /// 旅行天数
    #[arg(long)]
    pub duration_days: Option<u32>,

    /// 旅行人数
    #[arg(long)]
    pub travelers: Option<u32>,

    /// 预算
    #[arg(long)]
    pub budget: Option<f64>,

    /// 同时运行视频推荐流水线
    #[arg(long)]
    pub with_videos: bool,
}

impl RoadmapArgs {
    /// 转换为生成请求；给出目的地时附带行程描述
    pub fn to_request(&self) -> RoadmapRequest {
        let mut request = RoadmapRequest::new(self.prompt.clone(), self.category);
        request.with_videos = self.with_videos;

        if let Some(destination) = &self.destination {
            let mut trip = TripDescriptor::new(destination.clone());
            if let Some(start) = &self.starting_location {
                trip.starting_location = start.clone();
            }
            if let Some(days) = self.duration_days {
                trip.duration_days = days;
            }
            if let Some(travelers) = self.travelers {
                trip.traveler_count = travelers;
            }
            if let Some(budget) = self.budget {
                trip.budget = budget;
            }
            request = request.with_trip(trip);
        }

        request
    }
}

impl Args {
    /// 将CLI参数转换为配置：先加载配置文件，再用命令行参数覆盖
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Some(output_path) = self.output_path {
            config.output_path = Some(output_path);
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(|e| anyhow!(e))?;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 覆盖流水线配置
        if let Some(youtube_api_key) = self.youtube_api_key {
            config.pipeline.youtube_api_key = youtube_api_key;
        }
        if let Some(scripts_dir) = self.scripts_dir {
            config.pipeline.scripts_dir = scripts_dir;
        }
        if let Some(python) = self.python {
            config.pipeline.python = python;
        }
        if let Some(stage_timeout) = self.stage_timeout {
            config.pipeline.stage_timeout_seconds = stage_timeout;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}
