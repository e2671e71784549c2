use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cli::Command;
use crate::config::Config;
use crate::error::RoadmapError;
use crate::generator::context::GeneratorContext;
use crate::generator::layout::{attach_media, layout};
use crate::generator::media::resolve_media;
use crate::generator::normalizer::normalize_phases;
use crate::generator::parser::{parse_phases, parse_project_name};
use crate::generator::prompts::{phases_prompt, project_name_prompt};
use crate::generator::templates::fallback_phases;
use crate::recommender::topic::extract_main_topic;
use crate::types::{Phase, PhaseSource, PipelineRunResult, Roadmap, RoadmapRequest};

/// 一个主题的推荐结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecommendation {
    pub topic: String,
    #[serde(flatten)]
    pub result: PipelineRunResult,
}

/// 生成完整路线图
///
/// 只有缺少目标描述时返回错误；模型不可用或输出无法解析时使用静态模板。
pub async fn generate_roadmap(
    context: &GeneratorContext,
    request: &RoadmapRequest,
) -> Result<Roadmap, RoadmapError> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(RoadmapError::MalformedRequest(
            "a prompt describing the goal is required".to_string(),
        ));
    }

    let started = Instant::now();
    info!("🚀 开始生成路线图 [{}]: {}", request.category, prompt);

    let videos = async {
        if request.with_videos {
            let topic = extract_main_topic(prompt);
            Some(context.recommender.recommend(&topic).await)
        } else {
            None
        }
    };
    let (mut roadmap, recommended_videos) = tokio::join!(build_roadmap(context, request, prompt), videos);
    roadmap.recommended_videos = recommended_videos;

    info!(
        "📊 生成了 {} 个阶段，共 {} 个节点，耗时 {:.2}秒",
        roadmap.phases.len(),
        roadmap.nodes.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(roadmap)
}

async fn build_roadmap(context: &GeneratorContext, request: &RoadmapRequest, prompt: &str) -> Roadmap {
    let category = request.category;
    let (project_name, (phases, phase_source)) = tokio::join!(
        project_name(context, request, prompt),
        generate_phases(context, request, prompt)
    );

    let phases = normalize_phases(phases, category);
    let media = resolve_media(
        context.text_generator(),
        &phases,
        category,
        request.destination(),
    )
    .await;

    let mut nodes = layout(&phases, category);
    attach_media(&mut nodes, &media);

    Roadmap {
        id: Uuid::new_v4(),
        project_name,
        category,
        prompt: prompt.to_string(),
        phases,
        nodes,
        phase_source,
        generated_at: Utc::now(),
        recommended_videos: None,
    }
}

async fn project_name(context: &GeneratorContext, request: &RoadmapRequest, prompt: &str) -> String {
    if request.category.is_travel()
        && let Some(trip) = &request.trip
    {
        return format!("Journey to {}", trip.destination);
    }

    let fallback = format!("{} Journey", prompt);
    let Some(generator) = context.text_generator() else {
        return fallback;
    };

    match generator.generate(&project_name_prompt(prompt)).await {
        Ok(reply) => parse_project_name(&reply),
        Err(e) => {
            warn!("{}", RoadmapError::UpstreamUnavailable(format!("project name: {}", e)));
            fallback
        }
    }
}

async fn generate_phases(
    context: &GeneratorContext,
    request: &RoadmapRequest,
    prompt: &str,
) -> (Vec<Phase>, PhaseSource) {
    let template = || {
        (
            fallback_phases(request.category, prompt, request.trip.as_ref()),
            PhaseSource::Template,
        )
    };

    let Some(generator) = context.text_generator() else {
        return template();
    };

    let text = match generator
        .generate(&phases_prompt(prompt, request.category, request.trip.as_ref()))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("{}，使用静态模板", RoadmapError::UpstreamUnavailable(e.to_string()));
            return template();
        }
    };

    let phases = parse_phases(&text);
    if phases.is_empty() {
        warn!(
            "{}，使用静态模板",
            RoadmapError::UnparseableOutput("no phase headers found in generated text".to_string())
        );
        return template();
    }

    (phases, PhaseSource::Generated)
}

/// 输出JSON到文件或标准输出
fn write_output<T: Serialize>(output_path: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create output directory: {:?}", parent))?;
            }
            std::fs::write(path, json).context(format!("Failed to write output: {:?}", path))?;
            info!("💾 结果已保存到 {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// 运行一条CLI命令
pub async fn launch(config: &Config, command: &Command) -> Result<()> {
    let context = GeneratorContext::connect(config.clone()).await?;

    match command {
        Command::Roadmap(args) => {
            let roadmap = generate_roadmap(&context, &args.to_request()).await?;
            write_output(config.output_path.as_deref(), &roadmap)
        }
        Command::Videos { topics } => {
            let recommendations = join_all(topics.iter().map(|topic| {
                let recommender = &context.recommender;
                async move {
                    TopicRecommendation {
                        topic: topic.clone(),
                        result: recommender.recommend(topic).await,
                    }
                }
            }))
            .await;
            write_output(config.output_path.as_deref(), &recommendations)
        }
    }
}
