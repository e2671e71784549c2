//! 视频推荐流水线
//!
//! 完整流程依次运行 收集 -> 特征工程 -> 训练排序 三个外部阶段；任一阶段失败后
//! 退回只运行第一阶段的快速抓取，再失败则使用静态目录。调用方总能拿到结果。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::ProcessFailure;
use crate::types::{PipelineRunResult, RankedVideo, SourceTier};

pub mod catalog;
pub mod output;
pub mod stage;
pub mod tabular;
pub mod topic;
pub mod workspace;

use stage::{ProcessStageRunner, Stage, StageRunner};
use workspace::WorkArea;

/// 流水线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Collecting,
    Engineering,
    TrainingAndRanking,
    Succeeded,
    Failed,
    SimpleFetchFallback,
    StaticCatalogFallback,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Succeeded
                | PipelineState::SimpleFetchFallback
                | PipelineState::StaticCatalogFallback
        )
    }
}

/// 一次运行的结果与经过的状态
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub result: PipelineRunResult,
    pub trace: Vec<PipelineState>,
}

/// 单次调用内的可变数据
struct RunState {
    area: Option<WorkArea>,
    ranked: Vec<RankedVideo>,
}

/// 视频推荐器；不同主题的调用互不共享状态，可以并行执行
#[derive(Clone)]
pub struct VideoRecommender {
    config: PipelineConfig,
    runner: Arc<dyn StageRunner>,
}

impl VideoRecommender {
    pub fn new(config: PipelineConfig) -> Self {
        let runner = Arc::new(ProcessStageRunner::new(config.clone()));
        Self { config, runner }
    }

    /// 使用自定义的阶段执行器，测试中用于替换外部进程
    pub fn with_runner(config: PipelineConfig, runner: Arc<dyn StageRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 获取主题的推荐视频，最多5个
    pub async fn recommend(&self, topic: &str) -> PipelineRunResult {
        self.run(topic).await.result
    }

    /// 驱动状态机直到终止状态
    pub async fn run(&self, topic: &str) -> PipelineRun {
        let topic = topic.trim();
        let mut state = PipelineState::Idle;
        let mut trace = vec![state];
        let mut run = RunState {
            area: None,
            ranked: Vec::new(),
        };

        info!("🎥 开始为主题 '{}' 推荐视频", topic);
        while !state.is_terminal() {
            state = self.transition(state, topic, &mut run).await;
            debug!("流水线状态 -> {:?}", state);
            trace.push(state);
        }

        let result = match state {
            PipelineState::Succeeded => PipelineRunResult::ranked(run.ranked, SourceTier::Ml),
            PipelineState::SimpleFetchFallback => {
                PipelineRunResult::ranked(run.ranked, SourceTier::Simple)
            }
            _ => PipelineRunResult::ranked(catalog::lookup(topic), SourceTier::Static),
        };
        info!(
            "✅ 主题 '{}' 推荐完成: {} 个视频 (来源: {})",
            topic,
            result.videos.len(),
            result.source_tier
        );

        PipelineRun { result, trace }
    }

    async fn transition(&self, state: PipelineState, topic: &str, run: &mut RunState) -> PipelineState {
        match state {
            PipelineState::Idle => {
                if topic.is_empty() {
                    warn!("⚠️ 主题为空，使用静态目录");
                    return PipelineState::StaticCatalogFallback;
                }
                if !self.config.has_credentials() {
                    warn!("⚠️ 未配置视频服务KEY，使用静态目录");
                    return PipelineState::StaticCatalogFallback;
                }
                match WorkArea::create(self.config.work_root.as_deref()) {
                    Ok(area) => {
                        run.area = Some(area);
                        PipelineState::Collecting
                    }
                    Err(e) => {
                        warn!("⚠️ 无法创建工作区，使用静态目录: {:#}", e);
                        PipelineState::StaticCatalogFallback
                    }
                }
            }
            PipelineState::Collecting => {
                let stage = Stage::Collect {
                    topic: topic.to_string(),
                    count: self.config.full_fetch_count(),
                };
                self.advance(&stage, run, PipelineState::Engineering).await
            }
            PipelineState::Engineering => {
                self.advance(&Stage::Engineer, run, PipelineState::TrainingAndRanking)
                    .await
            }
            PipelineState::TrainingAndRanking => {
                match self.rank(run).await {
                    Ok(videos) => {
                        run.ranked = videos;
                        PipelineState::Succeeded
                    }
                    Err(e) => {
                        warn!("⚠️ 训练排序阶段失败: {}", e);
                        PipelineState::Failed
                    }
                }
            }
            PipelineState::Failed => match self.simple_fetch(topic, run).await {
                Ok(videos) => {
                    run.ranked = videos;
                    PipelineState::SimpleFetchFallback
                }
                Err(e) => {
                    warn!("⚠️ 快速抓取失败，使用静态目录: {}", e);
                    PipelineState::StaticCatalogFallback
                }
            },
            terminal => terminal,
        }
    }

    async fn run_stage(&self, stage: &Stage, run: &RunState) -> Result<String, ProcessFailure> {
        let area = run.area.as_ref().ok_or_else(|| ProcessFailure::MissingOutput {
            stage: stage.name().to_string(),
            detail: "no work area".to_string(),
        })?;
        info!("🔧 运行阶段 {}", stage.name());
        let output = self
            .runner
            .run(stage, area, self.config.stage_timeout())
            .await?;
        Ok(output.stdout)
    }

    async fn advance(&self, stage: &Stage, run: &RunState, next: PipelineState) -> PipelineState {
        match self.run_stage(stage, run).await {
            Ok(_) => next,
            Err(e) => {
                warn!("⚠️ 阶段 {} 失败: {}", e.stage(), e);
                PipelineState::Failed
            }
        }
    }

    async fn rank(&self, run: &RunState) -> Result<Vec<RankedVideo>, ProcessFailure> {
        let stdout = self.run_stage(&Stage::TrainAndRank, run).await?;
        let videos = output::parse_ranked_output(&stdout);
        if videos.is_empty() {
            return Err(ProcessFailure::MissingOutput {
                stage: Stage::TrainAndRank.name().to_string(),
                detail: "no ranked video links in output".to_string(),
            });
        }
        Ok(videos)
    }

    /// 只重跑第一阶段，直接读取候选文件排序
    async fn simple_fetch(&self, topic: &str, run: &RunState) -> Result<Vec<RankedVideo>, ProcessFailure> {
        let stage = Stage::Collect {
            topic: topic.to_string(),
            count: self.config.simple_fetch_count(),
        };
        self.run_stage(&stage, run).await?;

        let missing = |detail: String| ProcessFailure::MissingOutput {
            stage: stage.name().to_string(),
            detail,
        };
        let area = run.area.as_ref().ok_or_else(|| missing("no work area".to_string()))?;
        let rows = tabular::read_raw_videos(&area.raw_videos_path())
            .map_err(|e| missing(format!("{:#}", e)))?;
        let videos = tabular::select_candidates(rows, self.config.min_duration_minutes);
        if videos.is_empty() {
            return Err(missing("candidate file has no usable rows".to_string()));
        }
        Ok(videos)
    }
}
