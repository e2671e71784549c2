//! 媒体批量解析：一次调用为路线图中的全部步骤获取视频或地图地点
//!
//! 回复按 `Activity N` 标签定位到步骤；没有编号的标签按出现顺序顺延。
//! 调用失败时每个步骤都会得到类别对应的默认资源，结果映射总是覆盖全部步骤。

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::generator::prompts::{map_locations_prompt, videos_prompt};
use crate::llm::TextGenerator;
use crate::types::{Category, MapResource, MediaResource, Phase, Step, VideoResource};
use crate::utils::text::{clean_markup, encode_component, non_empty_lines};

/// `(阶段编号, 步骤下标)` 到媒体列表的映射，步骤下标从0开始
pub type MediaMap = BTreeMap<(u32, usize), Vec<MediaResource>>;

/// `Activity 3:` / `- Activity:` / `Activity 2: Louvre Museum`
static ACTIVITY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*]\s*)?activity(?:\s+(\d+))?\s*:\s*(.*)$").unwrap()
});

/// `Title: ...` / `- Title: ...` / `1. Title: ...`
static VIDEO_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[-*]\s*|\d+\.\s*)?title:\s*(.+)$").unwrap()
});

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(?:www\.|m\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .unwrap()
});

const MAPS_EMBED_PREFIX: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3783.2061485699746!2d73.85542079999999!3d18.519584099999996!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bc2c1e2226b7b11%3A0xa4bb8106175ca68b!2s";
const MAPS_EMBED_SUFFIX: &str = "!5e0!3m2!1sen!2sin!4v1750155225368!5m2!1sen!2sin";

/// 路线图中的一个步骤及其位置
#[derive(Debug, Clone, Copy)]
pub struct StepRef<'a> {
    pub phase_number: u32,
    pub step_index: usize,
    pub step: &'a Step,
}

impl StepRef<'_> {
    pub fn key(&self) -> (u32, usize) {
        (self.phase_number, self.step_index)
    }
}

/// 按阶段、步骤顺序展开全部步骤
pub fn collect_steps(phases: &[Phase]) -> Vec<StepRef<'_>> {
    phases
        .iter()
        .flat_map(|phase| {
            phase
                .steps
                .iter()
                .enumerate()
                .map(move |(step_index, step)| StepRef {
                    phase_number: phase.number,
                    step_index,
                    step,
                })
        })
        .collect()
}

/// 为全部步骤解析媒体资源，最多发起一次生成调用
pub async fn resolve_media(
    generator: Option<&dyn TextGenerator>,
    phases: &[Phase],
    category: Category,
    destination: &str,
) -> MediaMap {
    let steps = collect_steps(phases);
    if steps.is_empty() {
        return MediaMap::new();
    }

    let Some(generator) = generator else {
        info!("ℹ️ 未配置模型服务，媒体资源使用默认值");
        return default_media(&steps, category, destination);
    };

    let descriptions: Vec<&Step> = steps.iter().map(|s| s.step).collect();
    let prompt = if category.is_travel() {
        map_locations_prompt(destination, &descriptions)
    } else {
        videos_prompt(&descriptions)
    };

    info!("🎬 正在为 {} 个步骤批量获取媒体资源...", steps.len());
    let reply = match generator.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("⚠️ 媒体资源获取失败，使用默认值: {}", e);
            return default_media(&steps, category, destination);
        }
    };

    let media = if category.is_travel() {
        parse_map_reply(&reply, &steps, destination)
    } else {
        parse_video_reply(&reply, &steps)
    };
    complete(media, &steps)
}

/// 生成调用不可用或失败时每个步骤的默认资源
pub fn default_media(steps: &[StepRef<'_>], category: Category, destination: &str) -> MediaMap {
    steps
        .iter()
        .map(|s| {
            let resources = if category.is_travel() {
                vec![MediaResource::Map(default_map_resource(destination))]
            } else {
                Vec::new()
            };
            (s.key(), resources)
        })
        .collect()
}

/// 补齐缺失的步骤，保证每个步骤都有条目
fn complete(mut media: MediaMap, steps: &[StepRef<'_>]) -> MediaMap {
    for s in steps {
        media.entry(s.key()).or_default();
    }
    media
}

/// 解析活动标签，返回 (标签编号, 冒号后的文本)
fn parse_activity_header(line: &str) -> Option<(Option<usize>, &str)> {
    let caps = ACTIVITY_HEADER.captures(line)?;
    let label = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .filter(|n| *n > 0);
    let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    Some((label, rest))
}

/// 标签优先，无标签时顺延到下一个位置
fn next_index(label: Option<usize>, next_position: usize) -> usize {
    label.map(|n| n - 1).unwrap_or(next_position)
}

fn extract_video_id(line: &str) -> Option<&str> {
    VIDEO_URL
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 与步骤本身几乎重复的视频，例如步骤 `Learn Rust` 对应的 `How to learn Rust`
pub fn is_redundant_video(video_title: &str, step_title: &str) -> bool {
    let video = video_title.to_lowercase();
    let step = step_title.to_lowercase();

    (video.starts_with("how to") && video.contains(&step))
        || video == format!("how to: {}", step)
        || video == format!("tutorial: {}", step)
}

/// 解析视频批量回复
pub fn parse_video_reply(reply: &str, steps: &[StepRef<'_>]) -> MediaMap {
    let cleaned = clean_markup(reply);
    let lines = non_empty_lines(&cleaned);

    let mut media = MediaMap::new();
    let mut current: Option<usize> = None;
    let mut next_position = 0;
    let mut buffer: Vec<VideoResource> = Vec::new();
    // 已与标题配对的URL行
    let mut paired = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some((label, _)) = parse_activity_header(line) {
            flush_videos(&mut media, steps, current, std::mem::take(&mut buffer));
            let index = next_index(label, next_position);
            current = Some(index);
            next_position = index + 1;
            continue;
        }

        let Some(index) = current else {
            continue;
        };

        if let Some(caps) = VIDEO_TITLE.captures(line) {
            let title = caps
                .get(1)
                .map(|m| m.as_str().trim().trim_matches('"').trim())
                .unwrap_or_default();

            for j in (i + 1)..lines.len().min(i + 3) {
                let candidate = lines[j];
                if VIDEO_TITLE.is_match(candidate) || ACTIVITY_HEADER.is_match(candidate) {
                    break;
                }
                if let Some(video_id) = extract_video_id(candidate) {
                    buffer.push(VideoResource::from_video_id(title, video_id));
                    paired.insert(j);
                    break;
                }
            }
        } else if !paired.contains(&i)
            && let Some(video_id) = extract_video_id(line)
        {
            let title = steps
                .get(index)
                .map(|s| format!("{} Tutorial", s.step.title))
                .unwrap_or_else(|| "Tutorial Video".to_string());
            buffer.push(VideoResource::from_video_id(title, video_id));
        }
    }
    flush_videos(&mut media, steps, current, buffer);

    media
}

fn flush_videos(
    media: &mut MediaMap,
    steps: &[StepRef<'_>],
    current: Option<usize>,
    videos: Vec<VideoResource>,
) {
    let Some(step) = current.and_then(|index| steps.get(index)) else {
        if !videos.is_empty() {
            debug!("丢弃 {} 个无法对应到步骤的视频", videos.len());
        }
        return;
    };

    let kept = videos
        .into_iter()
        .filter(|video| !is_redundant_video(&video.title, &step.step.title))
        .map(MediaResource::Video);
    media.entry(step.key()).or_default().extend(kept);
}

/// 解析地图地点批量回复；缺失的步骤使用目的地本身作为地点
pub fn parse_map_reply(reply: &str, steps: &[StepRef<'_>], destination: &str) -> MediaMap {
    let cleaned = clean_markup(reply);

    let mut locations: HashMap<usize, String> = HashMap::new();
    let mut next_position = 0;
    for line in non_empty_lines(&cleaned) {
        if let Some((label, rest)) = parse_activity_header(line) {
            let index = next_index(label, next_position);
            next_position = index + 1;
            let location = rest.trim_matches(['"', '[', ']']).trim();
            if !location.is_empty() {
                locations.entry(index).or_insert_with(|| location.to_string());
            }
        }
    }

    steps
        .iter()
        .enumerate()
        .map(|(index, s)| {
            let location = locations
                .get(&index)
                .map(String::as_str)
                .unwrap_or(destination);
            (s.key(), vec![MediaResource::Map(map_resource(location, destination))])
        })
        .collect()
}

/// 无需密钥的地图嵌入链接
pub fn maps_embed_url(location: &str, destination: &str) -> String {
    format!(
        "{}{}{}",
        MAPS_EMBED_PREFIX,
        encode_component(&format!("{}, {}", location, destination)),
        MAPS_EMBED_SUFFIX
    )
}

pub fn map_resource(location: &str, destination: &str) -> MapResource {
    MapResource {
        title: location.to_string(),
        map_url: format!(
            "https://www.google.com/maps/search/{}",
            encode_component(&format!("{}, {}", location, destination))
        ),
        embed_url: maps_embed_url(location, destination),
        description: format!("Visit {} in {}", location, destination),
    }
}

/// 目的地主区域，作为地图资源的兜底
pub fn default_map_resource(destination: &str) -> MapResource {
    MapResource {
        title: format!("{} - Main Area", destination),
        map_url: format!(
            "https://www.google.com/maps/search/{}",
            encode_component(destination)
        ),
        embed_url: maps_embed_url(destination, destination),
        description: format!("Explore {} area", destination),
    }
}
