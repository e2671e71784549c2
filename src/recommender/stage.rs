//! 流水线阶段与外部进程执行

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::ProcessFailure;
use crate::recommender::workspace::WorkArea;

/// 推荐流水线的三个阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// 抓取候选视频并写入 `raw_videos.csv`
    Collect { topic: String, count: usize },
    /// 计算特征与评论情感分
    Engineer,
    /// 训练排序模型并输出前5名
    TrainAndRank,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Collect { .. } => "collect",
            Stage::Engineer => "features",
            Stage::TrainAndRank => "train_and_rank",
        }
    }

    pub fn script<'a>(&self, config: &'a PipelineConfig) -> &'a str {
        match self {
            Stage::Collect { .. } => &config.collect_script,
            Stage::Engineer => &config.features_script,
            Stage::TrainAndRank => &config.rank_script,
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Stage::Collect { topic, count } => vec![topic.clone(), count.to_string()],
            Stage::Engineer | Stage::TrainAndRank => Vec::new(),
        }
    }
}

/// 阶段成功时的输出
#[derive(Debug, Clone, Default)]
pub struct StageOutput {
    pub stdout: String,
}

/// 执行单个阶段；实现必须在 `timeout` 内返回
#[async_trait]
pub trait StageRunner: Send + Sync {
    async fn run(
        &self,
        stage: &Stage,
        area: &WorkArea,
        timeout: Duration,
    ) -> Result<StageOutput, ProcessFailure>;
}

/// 以子进程方式运行Python脚本
///
/// 子进程的工作目录是本次调用独占的工作区，中间文件都落在其中。
/// 超时或future被丢弃时子进程会被强制结束。
pub struct ProcessStageRunner {
    python: String,
    scripts_dir: PathBuf,
    config: PipelineConfig,
}

impl ProcessStageRunner {
    pub fn new(config: PipelineConfig) -> Self {
        // 工作目录会切换到工作区，脚本路径需要是绝对路径
        let scripts_dir = std::path::absolute(&config.scripts_dir)
            .unwrap_or_else(|_| config.scripts_dir.clone());
        Self {
            python: config.python.clone(),
            scripts_dir,
            config,
        }
    }

    fn command(&self, stage: &Stage, area: &WorkArea) -> Command {
        let mut command = Command::new(&self.python);
        command
            .arg(self.scripts_dir.join(stage.script(&self.config)))
            .args(stage.args())
            .current_dir(area.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if self.config.has_credentials() {
            command.env("YOUTUBE_API_KEY", &self.config.youtube_api_key);
        }
        command
    }
}

#[async_trait]
impl StageRunner for ProcessStageRunner {
    async fn run(
        &self,
        stage: &Stage,
        area: &WorkArea,
        timeout: Duration,
    ) -> Result<StageOutput, ProcessFailure> {
        let name = stage.name().to_string();
        let child = self
            .command(stage, area)
            .spawn()
            .map_err(|source| ProcessFailure::Spawn {
                stage: name.clone(),
                source,
            })?;

        // 超时后 wait_with_output 的future被丢弃，kill_on_drop 负责结束子进程
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ProcessFailure::Spawn {
                stage: name.clone(),
                source,
            })?,
            Err(_) => return Err(ProcessFailure::Timeout { stage: name, timeout }),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!("[{}] stderr: {}", name, stderr.trim());
        }

        if !output.status.success() {
            return Err(ProcessFailure::Exit {
                stage: name,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(StageOutput { stdout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_scripts_and_args() {
        let config = PipelineConfig::default();
        let collect = Stage::Collect {
            topic: "react development".to_string(),
            count: 50,
        };

        assert_eq!(collect.name(), "collect");
        assert_eq!(collect.script(&config), "collect_data_for_ml.py");
        assert_eq!(collect.args(), vec!["react development", "50"]);
        assert_eq!(Stage::Engineer.script(&config), "features.py");
        assert_eq!(Stage::TrainAndRank.script(&config), "train_and_rank.py");
        assert!(Stage::TrainAndRank.args().is_empty());
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_failure() {
        let config = PipelineConfig {
            python: "definitely-not-a-python-interpreter".to_string(),
            ..PipelineConfig::default()
        };
        let runner = ProcessStageRunner::new(config);
        let area = WorkArea::create(None).unwrap();

        let err = runner
            .run(&Stage::Engineer, &area, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessFailure::Spawn { .. }));
        assert_eq!(err.stage(), "features");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_stage_times_out() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("features.py"), "sleep 5\n").unwrap();
        let config = PipelineConfig {
            python: "sh".to_string(),
            scripts_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let runner = ProcessStageRunner::new(config);
        let area = WorkArea::create(None).unwrap();

        let started = std::time::Instant::now();
        let err = runner
            .run(&Stage::Engineer, &area, Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessFailure::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_and_success() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("features.py"), "echo broken >&2\nexit 3\n").unwrap();
        std::fs::write(
            dir.path().join("train_and_rank.py"),
            "echo \"key=$YOUTUBE_API_KEY\"\npwd\n",
        )
        .unwrap();
        let config = PipelineConfig {
            python: "sh".to_string(),
            scripts_dir: dir.path().to_path_buf(),
            youtube_api_key: "abc123".to_string(),
            ..PipelineConfig::default()
        };
        let runner = ProcessStageRunner::new(config);
        let area = WorkArea::create(None).unwrap();

        match runner
            .run(&Stage::Engineer, &area, Duration::from_secs(5))
            .await
        {
            Err(ProcessFailure::Exit { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("broken"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let output = runner
            .run(&Stage::TrainAndRank, &area, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.stdout.contains("key=abc123"));
        let area_name = area.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(output.stdout.contains(&area_name));
    }
}
