//! 读取第一阶段输出的 `raw_videos.csv`，供快速抓取层级直接排序

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::types::{RankedVideo, VideoResource};

/// ISO-8601 时长，如 `PT2H5M10S` / `P1DT30M`
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$").unwrap()
});

/// `raw_videos.csv` 的一行
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawVideoRow {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comment_count: u64,
}

/// 计数列可能为空或带小数（pandas导出），无法解析时按0处理
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    Ok(raw
        .parse::<u64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u64))
        .unwrap_or(0))
}

impl RawVideoRow {
    pub fn duration_minutes(&self) -> f64 {
        parse_iso_duration_minutes(&self.duration).unwrap_or(0.0)
    }

    /// (点赞 + 评论) / 播放量
    pub fn engagement_score(&self) -> f64 {
        (self.like_count + self.comment_count) as f64 / self.view_count.max(1) as f64
    }

    pub fn into_ranked(self) -> RankedVideo {
        let duration_minutes = self.duration_minutes();
        let sentiment_score = self.engagement_score();
        RankedVideo {
            video: VideoResource::from_video_id(self.title.trim(), self.video_id.trim()),
            view_count: self.view_count,
            duration_minutes,
            sentiment_score,
        }
    }
}

/// ISO-8601 时长转换为分钟
pub fn parse_iso_duration_minutes(value: &str) -> Option<f64> {
    let caps = ISO_DURATION.captures(value.trim())?;
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Some(part(1) * 1440.0 + part(2) * 60.0 + part(3) + part(4) / 60.0)
}

/// 解析CSV；引号内的逗号属于字段内容。无法解析的行被跳过
pub fn parse_raw_videos<R: Read>(reader: R) -> Vec<RawVideoRow> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<RawVideoRow>()
        .filter_map(|row| match row {
            Ok(row) if !row.video_id.is_empty() && !row.title.is_empty() => Some(row),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("跳过无法解析的候选行: {}", e);
                None
            }
        })
        .collect()
}

pub fn read_raw_videos(path: &Path) -> Result<Vec<RawVideoRow>> {
    let file = std::fs::File::open(path)
        .context(format!("Failed to open candidate file: {:?}", path))?;
    Ok(parse_raw_videos(file))
}

/// 快速抓取层级的候选选择：优先使用时长达标的视频，全部不达标时使用全部候选
pub fn select_candidates(rows: Vec<RawVideoRow>, min_duration_minutes: f64) -> Vec<RankedVideo> {
    let (long, short): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|row| row.duration_minutes() >= min_duration_minutes);

    let chosen = if long.is_empty() { short } else { long };
    chosen.into_iter().map(RawVideoRow::into_ranked).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "video_id,title,description,publishedAt,duration,view_count,like_count,comment_count\n";

    #[test]
    fn test_quoted_field_with_comma_is_one_field() {
        let csv = format!(
            "{}abcdefghijk,\"tutorial, part 1\",\"intro, basics, and more\",2024-01-01T00:00:00Z,PT2H5M,1000,50,10\n",
            HEADER
        );
        let rows = parse_raw_videos(csv.as_bytes());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "tutorial, part 1");
        assert_eq!(rows[0].description, "intro, basics, and more");
        assert_eq!(rows[0].view_count, 1000);
        assert_eq!(rows[0].comment_count, 10);
    }

    #[test]
    fn test_iso_duration() {
        assert_eq!(parse_iso_duration_minutes("PT2H5M"), Some(125.0));
        assert_eq!(parse_iso_duration_minutes("PT30S"), Some(0.5));
        assert_eq!(parse_iso_duration_minutes("P1DT1H"), Some(1500.0));
        assert_eq!(parse_iso_duration_minutes("2 hours"), None);
    }

    #[test]
    fn test_engagement_score_guards_zero_views() {
        let csv = format!("{}aaaaaaaaaaa,A,,,PT1M,0,3,1\n", HEADER);
        let rows = parse_raw_videos(csv.as_bytes());
        assert_eq!(rows[0].engagement_score(), 4.0);
    }

    #[test]
    fn test_bad_rows_are_skipped_and_counts_are_lenient() {
        let csv = format!(
            "{}aaaaaaaaaaa,Good,,,PT3H,1200.0,,\n,Missing id,,,PT3H,1,1,1\nbbbbbbbbbbb,,,,PT3H,1,1,1\n",
            HEADER
        );
        let rows = parse_raw_videos(csv.as_bytes());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].view_count, 1200);
        assert_eq!(rows[0].like_count, 0);
    }

    #[test]
    fn test_select_candidates_prefers_long_videos() {
        let csv = format!(
            "{}aaaaaaaaaaa,Short,,,PT10M,100,90,0\nbbbbbbbbbbb,Long,,,PT2H30M,100,5,0\n",
            HEADER
        );
        let picked = select_candidates(parse_raw_videos(csv.as_bytes()), 120.0);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].video.title, "Long");
        assert_eq!(picked[0].duration_minutes, 150.0);
        assert_eq!(picked[0].sentiment_score, 0.05);

        let only_short = format!("{}aaaaaaaaaaa,Short,,,PT10M,100,90,0\n", HEADER);
        let picked = select_candidates(parse_raw_videos(only_short.as_bytes()), 120.0);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].video.title, "Short");
    }

    #[test]
    fn test_read_raw_videos_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("raw_videos.csv");
        std::fs::write(&path, format!("{}aaaaaaaaaaa,A,,,PT1M,1,1,1\n", HEADER)).unwrap();

        assert_eq!(read_raw_videos(&path).unwrap().len(), 1);
        assert!(read_raw_videos(&dir.path().join("missing.csv")).is_err());
    }
}
