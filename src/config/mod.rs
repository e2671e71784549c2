use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "smartlearn.toml";

/// 各服务商 `.env` 模板里的占位值，视同未配置
const PLACEHOLDER_KEYS: &[&str] = &[
    "your_youtube_api_key_here",
    "your-api-key-here",
    "your-gemini-api-key-here",
    "your_mistral_api_key_here",
];

/// 判断凭据是否真正配置
pub fn is_credential_configured(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key)
}

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Mistral => write!(f, "mistral"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "mistral" => Ok(LLMProvider::Mistral),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 结果输出文件，未设置时打印到标准输出
    pub output_path: Option<PathBuf>,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 视频推荐流水线配置
    pub pipeline: PipelineConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址（OpenAI兼容服务商使用）
    pub api_base_url: String,

    /// 高能效模型，用于常规生成
    pub model_efficient: String,

    /// 高质量模型，作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

impl LLMConfig {
    /// 是否具备调用条件；Ollama为本地服务，不需要KEY
    pub fn is_configured(&self) -> bool {
        self.provider == LLMProvider::Ollama || is_credential_configured(&self.api_key)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// 视频推荐流水线配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// 视频搜索服务的KEY，缺失时直接使用静态目录
    pub youtube_api_key: String,

    /// Python解释器
    pub python: String,

    /// 阶段脚本所在目录
    pub scripts_dir: PathBuf,

    /// 第一阶段：原始数据收集
    pub collect_script: String,

    /// 第二阶段：特征工程
    pub features_script: String,

    /// 第三阶段：训练与排序
    pub rank_script: String,

    /// 工作区的父目录，未设置时使用系统临时目录
    pub work_root: Option<PathBuf>,

    /// 单个阶段的超时时间（秒）
    pub stage_timeout_seconds: u64,

    /// 目标视频数
    pub max_videos: usize,

    /// 长视频的最短时长（分钟）
    pub min_duration_minutes: f64,
}

impl PipelineConfig {
    pub fn has_credentials(&self) -> bool {
        is_credential_configured(&self.youtube_api_key)
    }

    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_seconds)
    }

    /// 完整流水线第一阶段的候选数量
    pub fn full_fetch_count(&self) -> usize {
        (self.max_videos * 10).max(50)
    }

    /// 快速抓取层级的候选数量
    pub fn simple_fetch_count(&self) -> usize {
        self.max_videos * 10
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: None,
            llm: LLMConfig::default(),
            pipeline: PipelineConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("SMARTLEARN_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com/v1beta"),
            model_efficient: String::from("gemini-2.0-flash"),
            model_powerful: String::from("gemini-2.5-pro"),
            max_tokens: 8192,
            temperature: 0.7,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 120,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: std::env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            python: String::from("python3"),
            scripts_dir: PathBuf::from("ml_model"),
            collect_script: String::from("collect_data_for_ml.py"),
            features_script: String::from("features.py"),
            rank_script: String::from("train_and_rank.py"),
            work_root: None,
            stage_timeout_seconds: 60,
            max_videos: 5,
            min_duration_minutes: 120.0,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
