//! 树形布局：阶段沿中轴纵向排列，每个阶段的4个步骤左右各两个
//!
//! 坐标只由 (阶段序号, 步骤序号, 侧边) 决定，与内容无关。

use std::collections::HashSet;

use tracing::warn;

use crate::generator::media::MediaMap;
use crate::types::node::{phase_node_id, step_node_id};
use crate::types::{
    Category, NodeResources, Phase, PhaseNode, RoadmapNode, SearchLink, Side, StepNode,
};
use crate::utils::text::encode_component;

/// 画布宽度
pub const CANVAS_WIDTH: f64 = 1200.0;
pub const CENTER_X: f64 = CANVAS_WIDTH / 2.0;
/// 第一个阶段的纵坐标
pub const FIRST_PHASE_Y: f64 = 200.0;
pub const PHASE_SPACING: f64 = 700.0;
/// 步骤相对中轴的水平偏移
pub const BRANCH_OFFSET: f64 = 450.0;
pub const STEP_SPACING: f64 = 200.0;

/// 第 `phase_index` 个阶段（从0开始）的纵坐标
pub fn phase_y(phase_index: usize) -> f64 {
    FIRST_PHASE_Y + phase_index as f64 * PHASE_SPACING
}

/// 步骤所在侧：前两个在左，后两个在右
pub fn step_side(step_index: usize) -> Side {
    if step_index < 2 { Side::Left } else { Side::Right }
}

/// 第 `step_index` 个步骤（从0开始）相对所在阶段的坐标
pub fn step_position(phase_index: usize, step_index: usize) -> (f64, f64) {
    let x = match step_side(step_index) {
        Side::Left => CENTER_X - BRANCH_OFFSET,
        Side::Right => CENTER_X + BRANCH_OFFSET,
    };
    let side_start_y = phase_y(phase_index) - STEP_SPACING * 0.75;
    let y = side_start_y + (step_index % 2) as f64 * STEP_SPACING;
    (x, y)
}

fn search_url(query: &str) -> String {
    format!("https://google.com/search?q={}", encode_component(query))
}

/// 为已规整的阶段生成布局节点，顺序为：阶段节点，随后是它的各个步骤节点
pub fn layout(phases: &[Phase], category: Category) -> Vec<RoadmapNode> {
    let mut nodes = Vec::with_capacity(phases.len() * 5);
    let mut seen_phases = HashSet::new();

    for (phase_index, phase) in phases.iter().enumerate() {
        if !seen_phases.insert(phase.number) {
            warn!(
                "⚠️ 阶段编号 {} 重复出现，节点ID将会冲突: {}",
                phase.number, phase.name
            );
        }

        let level = phase_index as u32;
        let label = format!("{} {}", category.phase_label(), phase.number);

        let connections = (1..=phase.steps.len() as u32)
            .map(|step_number| step_node_id(phase.number, step_number))
            .collect();

        nodes.push(RoadmapNode::Phase(PhaseNode {
            id: phase_node_id(phase.number),
            title: phase.name.clone(),
            description: format!("{}: {}", label, phase.name),
            x: CENTER_X,
            y: phase_y(phase_index),
            level,
            category,
            phase_number: phase.number,
            connections,
            resources: NodeResources {
                summary: format!("{} focuses on {}", label, phase.name.to_lowercase()),
                media: Vec::new(),
                search_results: vec![SearchLink {
                    title: format!("{} Resources", phase.name),
                    url: search_url(&phase.name),
                    description: format!("Comprehensive resources for {}", phase.name),
                }],
            },
        }));

        for (step_index, step) in phase.steps.iter().enumerate() {
            let step_number = step_index as u32 + 1;
            let (x, y) = step_position(phase_index, step_index);
            let how_to = format!("How to {}", step.description);

            nodes.push(RoadmapNode::Step(StepNode {
                id: step_node_id(phase.number, step_number),
                title: step.title.clone(),
                description: step.description.clone(),
                x,
                y,
                level,
                category,
                phase_number: phase.number,
                step_number,
                side: step_side(step_index),
                resources: NodeResources {
                    summary: format!(
                        "{} {} of {}: {}",
                        category.step_label(),
                        step_number,
                        phase.name,
                        step.description
                    ),
                    media: Vec::new(),
                    search_results: vec![SearchLink {
                        url: search_url(&how_to.to_lowercase()),
                        title: how_to,
                        description: format!("Learn more about {}", step.description),
                    }],
                },
            }));
        }
    }

    nodes
}

/// 把媒体解析结果挂到对应的步骤节点上；映射中没有的步骤保持空列表
pub fn attach_media(nodes: &mut [RoadmapNode], media: &MediaMap) {
    for node in nodes.iter_mut() {
        if let RoadmapNode::Step(step) = node
            && let Some(resources) =
                media.get(&(step.phase_number, step.step_number as usize - 1))
        {
            step.resources.media = resources.clone();
        }
    }
}
