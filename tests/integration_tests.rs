use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use smartlearn_rs::config::{Config, PipelineConfig};
use smartlearn_rs::generator::context::GeneratorContext;
use smartlearn_rs::generator::workflow::generate_roadmap;
use smartlearn_rs::llm::TextGenerator;
use smartlearn_rs::recommender::VideoRecommender;
use smartlearn_rs::types::{
    Category, MediaResource, PhaseSource, RoadmapNode, RoadmapRequest, SourceTier, TripDescriptor,
};
use tempfile::TempDir;

/// 按提示词类型返回固定回复的生成器
struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.contains("location names") {
            return Ok("Activity 1: Fushimi Inari Shrine\nActivity 2: Nishiki Market\n".to_string());
        }
        if prompt.contains("travel itinerary") {
            return Ok(r#"**Day 1: Temples**
1.1 Sunrise walk at Fushimi Inari
1.2 Lunch at Nishiki Market
1.3 Visit Kiyomizu-dera
1.4 Evening stroll in Gion

**Day 2: Nature**
2.1 Arashiyama bamboo grove
"#
            .to_string());
        }
        anyhow::bail!("unexpected prompt")
    }
}

fn offline_config() -> Config {
    Config {
        pipeline: PipelineConfig {
            youtube_api_key: String::new(),
            ..PipelineConfig::default()
        },
        ..Config::default()
    }
}

fn context(generator: Option<Arc<dyn TextGenerator>>) -> GeneratorContext {
    let config = offline_config();
    let recommender = VideoRecommender::new(config.pipeline.clone());
    GeneratorContext::with_parts(config, generator, recommender)
}

#[tokio::test]
async fn test_travel_roadmap_with_generated_itinerary() {
    let context = context(Some(Arc::new(CannedGenerator)));
    let mut trip = TripDescriptor::new("Kyoto");
    trip.duration_days = 2;
    let request = RoadmapRequest::new("temples and food", Category::TravelPlanner).with_trip(trip);

    let roadmap = generate_roadmap(&context, &request).await.unwrap();

    assert_eq!(roadmap.project_name, "Journey to Kyoto");
    assert_eq!(roadmap.phase_source, PhaseSource::Generated);
    assert_eq!(roadmap.phases.len(), 2);
    assert_eq!(roadmap.phases[1].steps[3].title, "Additional activity 4");

    let phase = roadmap.nodes[0].as_phase().unwrap();
    assert_eq!(phase.description, "Day 1: Temples");

    let titles: Vec<&str> = roadmap
        .nodes
        .iter()
        .filter_map(RoadmapNode::as_step)
        .map(|s| match s.resources.media.as_slice() {
            [MediaResource::Map(map)] => map.title.as_str(),
            other => panic!("expected exactly one map, got {:?}", other),
        })
        .collect();
    assert_eq!(titles[0], "Fushimi Inari Shrine");
    assert_eq!(titles[1], "Nishiki Market");
    // 回复中缺失的活动使用目的地本身
    assert!(titles[2..].iter().all(|t| *t == "Kyoto"));
}

#[tokio::test]
async fn test_roadmap_invariants_and_serialization() {
    let context = context(None);
    let request = RoadmapRequest::new("calculus", Category::Subject);

    let first = generate_roadmap(&context, &request).await.unwrap();
    let second = generate_roadmap(&context, &request).await.unwrap();

    assert!(first.phases.iter().all(|p| p.steps.len() == 4));

    let positions = |nodes: &[RoadmapNode]| -> Vec<(String, (f64, f64))> {
        nodes
            .iter()
            .map(|n| (n.id().to_string(), n.position()))
            .collect()
    };
    assert_eq!(positions(&first.nodes), positions(&second.nodes));
    assert_ne!(first.id, second.id);

    let ids: HashSet<&str> = first.nodes.iter().map(RoadmapNode::id).collect();
    assert_eq!(ids.len(), first.nodes.len());

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["phaseSource"], "template");
    assert_eq!(json["nodes"][0]["type"], "phase");
    assert_eq!(json["nodes"][1]["type"], "step");
    assert_eq!(json["nodes"][1]["side"], "left");
    assert_eq!(json["nodes"][1]["stepNumber"], 1);
    assert!(json.get("recommendedVideos").is_none());
}

#[tokio::test]
async fn test_video_recommendation_without_credentials() {
    let recommender = VideoRecommender::new(offline_config().pipeline);

    let result = recommender.recommend("react development").await;

    assert_eq!(result.source_tier, SourceTier::Static);
    assert!(!result.videos.is_empty() && result.videos.len() <= 5);
    let ids: HashSet<&str> = result.videos.iter().map(|v| v.video_id()).collect();
    assert_eq!(ids, HashSet::from(["bMknfKXIFA8", "TNhaISOUy6Q"]));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["sourceTier"], "static");
    assert!(json["videos"][0]["thumbnailUrl"].as_str().unwrap().ends_with("mqdefault.jpg"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_pipeline_with_shell_stages() {
    let scripts = TempDir::new().unwrap();
    fs::write(
        scripts.path().join("collect_data_for_ml.py"),
        "printf 'video_id,title,description,publishedAt,duration,view_count,like_count,comment_count\\n' > raw_videos.csv\n\
         printf 'aaaaaaaaaaa,\"%s, long\",,2024-01-01,PT3H,100,10,0\\n' \"$1\" >> raw_videos.csv\n",
    )
    .unwrap();
    fs::write(scripts.path().join("features.py"), "test -f raw_videos.csv\n").unwrap();
    fs::write(scripts.path().join("train_and_rank.py"), "exit 1\n").unwrap();

    let config = PipelineConfig {
        youtube_api_key: "integration-key".to_string(),
        python: "sh".to_string(),
        scripts_dir: scripts.path().to_path_buf(),
        ..PipelineConfig::default()
    };
    let recommender = VideoRecommender::new(config);

    let run = recommender.run("rust").await;

    assert_eq!(run.result.source_tier, SourceTier::Simple);
    assert_eq!(run.result.videos.len(), 1);
    assert_eq!(run.result.videos[0].video.title, "rust, long");
    assert_eq!(run.result.videos[0].duration_minutes, 180.0);
}
