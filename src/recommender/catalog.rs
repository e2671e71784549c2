//! 静态视频目录，流水线的最后一级兜底

use crate::types::{RankedVideo, VideoResource};

/// 没有任何类别匹配时使用的类别
pub const DEFAULT_CATEGORY: &str = "web development";

/// 按声明顺序排列，同分时靠前的类别胜出
const CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "web development",
        &[
            ("nu_pCVPKzTk", "Complete Web Development Course"),
            ("mJgBOIoGihA", "HTML CSS JavaScript Tutorial"),
            ("0pThnRneDjw", "Frontend Development Roadmap"),
        ],
    ),
    (
        "machine learning",
        &[
            ("PPLop4L2eGk", "Machine Learning Course by Andrew Ng"),
            ("7eh4d6sabA0", "Python for Machine Learning"),
            ("aircAruvnKk", "Deep Learning Fundamentals"),
        ],
    ),
    (
        "data science",
        &[
            ("ua-CiDNNj30", "Data Science Full Course"),
            ("vmEHCJofslg", "Python for Data Analysis"),
        ],
    ),
    (
        "react development",
        &[
            ("bMknfKXIFA8", "React Complete Course"),
            ("TNhaISOUy6Q", "React Hooks Tutorial"),
        ],
    ),
];

/// 词袋重叠度：任一方包含另一方即计为一次匹配，按较长一方的词数归一
pub fn topic_similarity(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split(' ').collect();
    let words_b: Vec<&str> = b.split(' ').collect();

    let mut matches = 0;
    for wa in &words_a {
        for wb in &words_b {
            if wa.contains(wb) || wb.contains(wa) {
                matches += 1;
            }
        }
    }

    matches as f64 / words_a.len().max(words_b.len()) as f64
}

/// 与主题最相近的目录类别；分数必须严格更高才会替换当前最佳
pub fn best_category(topic: &str) -> &'static str {
    let topic = topic.to_lowercase();
    let mut best = DEFAULT_CATEGORY;
    let mut best_score = 0.0;

    for (label, _) in CATALOG {
        let score = topic_similarity(&topic, label);
        if score > best_score {
            best_score = score;
            best = *label;
        }
    }

    best
}

/// 指定类别的目录条目，保持声明顺序
pub fn catalog_entries(category: &str) -> Vec<RankedVideo> {
    CATALOG
        .iter()
        .find(|(label, _)| *label == category)
        .map(|(_, videos)| {
            videos
                .iter()
                .map(|(id, title)| RankedVideo::new(VideoResource::from_video_id(*title, id)))
                .collect()
        })
        .unwrap_or_default()
}

/// 为主题选择目录视频
pub fn lookup(topic: &str) -> Vec<RankedVideo> {
    catalog_entries(best_category(topic))
}
