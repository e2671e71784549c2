use serde::{Deserialize, Serialize};

/// 视频资源
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub title: String,
    pub url: String,
    pub video_id: String,
    pub thumbnail_url: String,
}

impl VideoResource {
    /// 根据11位视频ID构造标准链接与缩略图
    pub fn from_video_id(title: impl Into<String>, video_id: &str) -> Self {
        Self {
            title: title.into(),
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            video_id: video_id.to_string(),
            thumbnail_url: format!("https://img.youtube.com/vi/{}/mqdefault.jpg", video_id),
        }
    }
}

/// 地图位置资源
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapResource {
    pub title: String,
    pub map_url: String,
    pub embed_url: String,
    pub description: String,
}

/// 挂载在节点上的外部媒体
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaResource {
    Video(VideoResource),
    Map(MapResource),
}

impl MediaResource {
    pub fn title(&self) -> &str {
        match self {
            MediaResource::Video(v) => &v.title,
            MediaResource::Map(m) => &m.title,
        }
    }
}

/// 搜索链接
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SearchLink {
    pub title: String,
    pub url: String,
    pub description: String,
}
