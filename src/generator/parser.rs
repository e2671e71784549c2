//! 从模型生成的自然语言文本中恢复阶段与步骤结构
//!
//! 解析失败不是错误：无法识别的行被忽略，最终体现为更短的结果列表。

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Phase, Step};
use crate::utils::text::{clean_markup, non_empty_lines};

/// `Phase 1: Basics` / `Day 2: Museums`
static PHASE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:phase|day)\s+(\d+):\s*(.+)$").unwrap());

/// `1.1 Learn syntax` / `1.1. Learn syntax` / `3. Read docs`
static NUMBERED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.\d+\.?|\d+\.)\s*(.+)$").unwrap());

/// `- Read docs`
static BULLET_STEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s*(.+)$").unwrap());

static NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*(.+)").unwrap());

/// 项目名无法识别时的默认值
pub const DEFAULT_PROJECT_NAME: &str = "Learning Journey";

/// 解析阶段列表
///
/// 出现在任何阶段标题之前的步骤行被丢弃；重复的阶段编号按出现顺序各自保留。
pub fn parse_phases(text: &str) -> Vec<Phase> {
    let cleaned = clean_markup(text);
    let mut phases = Vec::new();
    let mut current: Option<Phase> = None;

    for line in non_empty_lines(&cleaned) {
        if let Some(header) = parse_phase_header(line) {
            if let Some(done) = current.replace(header) {
                phases.push(done);
            }
            continue;
        }

        if let (Some(phase), Some(content)) = (current.as_mut(), parse_step_content(line)) {
            phase.steps.push(Step::from_content(content));
        }
    }

    if let Some(done) = current {
        phases.push(done);
    }

    phases
}

fn parse_phase_header(line: &str) -> Option<Phase> {
    let caps = PHASE_HEADER.captures(line)?;
    // 编号溢出时视为普通文本
    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let name = caps.get(2)?.as_str().trim();
    Some(Phase::new(number, name))
}

fn parse_step_content(line: &str) -> Option<&str> {
    let caps = NUMBERED_STEP
        .captures(line)
        .or_else(|| BULLET_STEP.captures(line))?;
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().trim())
        .find(|content| !content.is_empty())
}

/// 从模型回复中识别项目名
pub fn parse_project_name(text: &str) -> String {
    let cleaned = clean_markup(text);
    let lines = non_empty_lines(&cleaned);

    let labelled = lines.iter().take(3).find_map(|line| {
        let lower = line.to_lowercase();
        if lower.contains("project name") || lower.contains("title") {
            NAME_LABEL
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        } else {
            None
        }
    });

    let name = match (labelled, lines.first()) {
        (Some(name), _) => name,
        (None, Some(first)) if first.chars().count() < 50 => first.to_string(),
        _ => DEFAULT_PROJECT_NAME.to_string(),
    };

    let name = name.replace(['"', '\''], "");
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        name.to_string()
    }
}
