//! 解析训练排序阶段的标准输出

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{RankedVideo, VideoResource};

/// 结果段落的起始标记
static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)top\s+\d+\s+ranked\s+video\s+links:").unwrap());

/// `1. https://www.youtube.com/watch?v=xxxxxxxxxxx`
static NUMBERED_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\.\s*https?://(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})")
        .unwrap()
});

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*Title:\s*(.+?)(?:\.\.\.)?\s*$").unwrap());

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*Duration:\s*([\d.]+)\s*minutes").unwrap());

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*ML Score:\s*(-?[\d.]+)").unwrap());

static VIEWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*Views:\s*([\d,]+)").unwrap());

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 从排序阶段输出中恢复视频列表，保持输出中的顺序
///
/// 标题、时长、分数行只归属于最近一个编号链接；遇到新的编号行后不再向前归属。
/// 没有标题的条目使用 `ML Recommended Tutorial - <id>`。
pub fn parse_ranked_output(stdout: &str) -> Vec<RankedVideo> {
    let mut videos: Vec<RankedVideo> = Vec::new();
    let mut titled: Vec<bool> = Vec::new();
    let mut in_section = false;
    // 当前可接收属性行的条目
    let mut current: Option<usize> = None;

    for line in stdout.lines() {
        if SECTION_MARKER.is_match(line) {
            in_section = true;
            current = None;
            continue;
        }
        if !in_section || line.trim().is_empty() {
            continue;
        }

        if let Some(video_id) = capture(&NUMBERED_LINK, line) {
            videos.push(RankedVideo::new(VideoResource::from_video_id(
                String::new(),
                video_id,
            )));
            titled.push(false);
            current = Some(videos.len() - 1);
            continue;
        }
        if NUMBERED_LINE.is_match(line) {
            current = None;
            continue;
        }

        let Some(index) = current else {
            continue;
        };
        let video = &mut videos[index];

        if let Some(title) = capture(&TITLE, line) {
            video.video.title = title.trim().to_string();
            titled[index] = !video.video.title.is_empty();
        } else if let Some(minutes) = capture(&DURATION, line).and_then(|v| v.parse::<f64>().ok()) {
            video.duration_minutes = minutes;
        } else if let Some(score) = capture(&SCORE, line).and_then(|v| v.parse::<f64>().ok()) {
            video.sentiment_score = score;
        } else if let Some(views) = capture(&VIEWS, line).and_then(|v| v.replace(',', "").parse::<u64>().ok()) {
            video.view_count = views;
        }
    }

    for (video, has_title) in videos.iter_mut().zip(titled) {
        if !has_title {
            video.video.title = format!("ML Recommended Tutorial - {}", video.video.video_id);
        }
    }

    videos
}
