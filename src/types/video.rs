use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::media::VideoResource;

/// 每次推荐最多返回的视频数
pub const MAX_RANKED_VIDEOS: usize = 5;

/// 结果来自哪一个流水线层级
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    /// 完整的三阶段排序
    Ml,
    /// 只运行第一阶段的快速抓取
    Simple,
    /// 固定目录
    Static,
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTier::Ml => write!(f, "ml"),
            SourceTier::Simple => write!(f, "simple"),
            SourceTier::Static => write!(f, "static"),
        }
    }
}

/// 带排序信号的视频
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedVideo {
    #[serde(flatten)]
    pub video: VideoResource,
    pub view_count: u64,
    pub duration_minutes: f64,
    pub sentiment_score: f64,
}

impl RankedVideo {
    pub fn new(video: VideoResource) -> Self {
        Self {
            video,
            view_count: 0,
            duration_minutes: 0.0,
            sentiment_score: 0.0,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video.video_id
    }

    /// 排序规则：分数降序，其次播放量降序，最后视频ID字典序
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .sentiment_score
            .total_cmp(&self.sentiment_score)
            .then_with(|| other.view_count.cmp(&self.view_count))
            .then_with(|| self.video.video_id.cmp(&other.video.video_id))
    }
}

/// 一次推荐流水线运行的结果
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunResult {
    pub videos: Vec<RankedVideo>,
    pub source_tier: SourceTier,
}

impl PipelineRunResult {
    /// 排序并截断到 [`MAX_RANKED_VIDEOS`]
    pub fn ranked(mut videos: Vec<RankedVideo>, source_tier: SourceTier) -> Self {
        videos.sort_by(RankedVideo::rank_cmp);
        videos.truncate(MAX_RANKED_VIDEOS);
        Self {
            videos,
            source_tier,
        }
    }
}
