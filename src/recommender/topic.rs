//! 从路线图请求中提炼视频搜索主题

use std::sync::LazyLock;

use regex::Regex;

static REQUEST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:create|generate|make|build)\s+(?:a\s+)?(?:roadmap\s+)?for\s+").unwrap()
});

static REQUEST_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:roadmap|plan|guide|tutorial)$").unwrap());

/// 关键词到标准主题的映射，按顺序匹配
const TOPIC_MAPPINGS: &[(&str, &str)] = &[
    ("web development", "web development"),
    ("web dev", "web development"),
    ("frontend development", "frontend development"),
    ("backend development", "backend development"),
    ("full stack development", "full stack development"),
    ("machine learning", "machine learning"),
    ("data science", "data science"),
    ("artificial intelligence", "artificial intelligence"),
    ("mobile development", "mobile app development"),
    ("android development", "android development"),
    ("ios development", "ios development"),
    ("react", "react development"),
    ("nodejs", "node.js development"),
    ("python", "python programming"),
    ("javascript", "javascript programming"),
    ("devops", "devops engineering"),
];

/// 没有可用内容时的主题
pub const DEFAULT_TOPIC: &str = "programming";

pub fn extract_main_topic(prompt: &str) -> String {
    let lowered = prompt.trim().to_lowercase();
    let without_prefix = REQUEST_PREFIX.replace(&lowered, "");
    let cleaned = REQUEST_SUFFIX.replace(&without_prefix, "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return DEFAULT_TOPIC.to_string();
    }

    TOPIC_MAPPINGS
        .iter()
        .find(|(keyword, _)| cleaned.contains(keyword))
        .map(|(_, topic)| topic.to_string())
        .unwrap_or_else(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_phrasing_is_stripped() {
        assert_eq!(
            extract_main_topic("Create a roadmap for React"),
            "react development"
        );
        assert_eq!(
            extract_main_topic("build for quantum computing roadmap"),
            "quantum computing"
        );
    }

    #[test]
    fn test_mapping_order() {
        assert_eq!(extract_main_topic("web dev bootcamp"), "web development");
        assert_eq!(extract_main_topic("Mobile Development"), "mobile app development");
        // machine learning 排在 python 之前
        assert_eq!(
            extract_main_topic("machine learning with python"),
            "machine learning"
        );
        assert_eq!(extract_main_topic("nodejs apis"), "node.js development");
    }

    #[test]
    fn test_unmatched_and_empty() {
        assert_eq!(extract_main_topic("Baking Sourdough"), "baking sourdough");
        assert_eq!(extract_main_topic("   "), DEFAULT_TOPIC);
        assert_eq!(extract_main_topic("Guide"), "guide");
    }
}
