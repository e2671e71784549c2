use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::category::{Category, TripDescriptor};
use crate::types::node::RoadmapNode;
use crate::types::video::PipelineRunResult;
use crate::utils::text::truncate_with_ellipsis;

/// 步骤标题的字符上限
pub const STEP_TITLE_BUDGET: usize = 50;

/// 阶段中的一个可执行步骤
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Step {
    pub title: String,
    pub description: String,
}

impl Step {
    /// 由完整内容构造步骤，标题为截断后的预览
    pub fn from_content(content: &str) -> Self {
        Self {
            title: truncate_with_ellipsis(content, STEP_TITLE_BUDGET),
            description: content.to_string(),
        }
    }

    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// 路线图的顶层阶段（旅行模式下为一天）
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Phase {
    pub number: u32,
    pub name: String,
    pub steps: Vec<Step>,
}

impl Phase {
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }
}

/// 路线图生成请求
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub prompt: String,
    pub category: Category,
    #[serde(default)]
    pub trip: Option<TripDescriptor>,
    /// 是否同时运行视频推荐流水线
    #[serde(default)]
    pub with_videos: bool,
}

impl RoadmapRequest {
    pub fn new(prompt: impl Into<String>, category: Category) -> Self {
        Self {
            prompt: prompt.into(),
            category,
            trip: None,
            with_videos: false,
        }
    }

    pub fn with_trip(mut self, trip: TripDescriptor) -> Self {
        self.trip = Some(trip);
        self
    }

    /// 旅行目的地，未提供行程时为 `destination`
    pub fn destination(&self) -> &str {
        self.trip
            .as_ref()
            .map(|t| t.destination.as_str())
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("destination")
    }
}

/// 阶段列表的来源
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhaseSource {
    /// 从模型输出中解析
    Generated,
    /// 静态模板兜底
    Template,
}

/// 一次生成的完整路线图
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: Uuid,
    pub project_name: String,
    pub category: Category,
    pub prompt: String,
    pub phases: Vec<Phase>,
    pub nodes: Vec<RoadmapNode>,
    pub phase_source: PhaseSource,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_videos: Option<PipelineRunResult>,
}
