//! 每次调用独占的工作区

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// 第一阶段写出的原始候选文件
pub const RAW_VIDEOS_FILE: &str = "raw_videos.csv";

/// 一次流水线调用的工作区，drop时整个目录被删除
///
/// 各阶段通过其中的中间文件衔接，同一个工作区不能被两次调用共享。
#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    /// 在 `root` 下（未指定时在系统临时目录下）创建工作区
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("smartlearn-pipeline-");
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)
                    .context(format!("Failed to create work root: {:?}", root))?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .context("Failed to create pipeline work area")?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn raw_videos_path(&self) -> PathBuf {
        self.path().join(RAW_VIDEOS_FILE)
    }
}
