//! 错误分类
//!
//! 只有 [`RoadmapError::MalformedRequest`] 会传递给最终调用方，其余类别都在内部
//! 被模板或降级层级吸收，仅记录日志。

use std::time::Duration;

/// 路线图与视频推荐流程中的错误类别
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// 调用方没有给出可用的意图（缺少prompt/topic）
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// 外部文本/视频服务不可达或未配置
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// 服务有响应，但无法从中恢复出结构化内容
    #[error("unparseable output: {0}")]
    UnparseableOutput(String),

    /// 推荐流水线中的某个阶段进程失败
    #[error(transparent)]
    Process(#[from] ProcessFailure),
}

/// 流水线阶段进程的失败原因
#[derive(Debug, thiserror::Error)]
pub enum ProcessFailure {
    #[error("failed to start stage `{stage}`: {source}")]
    Spawn {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stage `{stage}` exited with status {code:?}: {stderr}")]
    Exit {
        stage: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("stage `{stage}` timed out after {timeout:?}")]
    Timeout { stage: String, timeout: Duration },

    #[error("stage `{stage}` produced no usable output: {detail}")]
    MissingOutput { stage: String, detail: String },
}

impl ProcessFailure {
    /// 失败所属的阶段名
    pub fn stage(&self) -> &str {
        match self {
            ProcessFailure::Spawn { stage, .. }
            | ProcessFailure::Exit { stage, .. }
            | ProcessFailure::Timeout { stage, .. }
            | ProcessFailure::MissingOutput { stage, .. } => stage,
        }
    }
}
