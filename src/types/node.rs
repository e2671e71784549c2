use serde::{Deserialize, Serialize};

use crate::types::category::Category;
use crate::types::media::{MediaResource, SearchLink};

/// 阶段节点ID
pub fn phase_node_id(phase_number: u32) -> String {
    format!("phase-{}", phase_number)
}

/// 步骤节点ID，`step_number` 从1开始
pub fn step_node_id(phase_number: u32, step_number: u32) -> String {
    format!("step-{}-{}", phase_number, step_number)
}

/// 步骤节点位于主干的哪一侧
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// 节点附带的资源
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeResources {
    pub summary: String,
    pub media: Vec<MediaResource>,
    pub search_results: Vec<SearchLink>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseNode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub level: u32,
    pub category: Category,
    pub phase_number: u32,
    /// 该阶段全部步骤节点的ID
    pub connections: Vec<String>,
    pub resources: NodeResources,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepNode {
    pub id: String,
    pub title: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub level: u32,
    pub category: Category,
    pub phase_number: u32,
    pub step_number: u32,
    pub side: Side,
    pub resources: NodeResources,
}

/// 布局输出单元
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RoadmapNode {
    Phase(PhaseNode),
    Step(StepNode),
}

impl RoadmapNode {
    pub fn id(&self) -> &str {
        match self {
            RoadmapNode::Phase(n) => &n.id,
            RoadmapNode::Step(n) => &n.id,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            RoadmapNode::Phase(n) => (n.x, n.y),
            RoadmapNode::Step(n) => (n.x, n.y),
        }
    }

    pub fn resources(&self) -> &NodeResources {
        match self {
            RoadmapNode::Phase(n) => &n.resources,
            RoadmapNode::Step(n) => &n.resources,
        }
    }

    pub fn as_step(&self) -> Option<&StepNode> {
        match self {
            RoadmapNode::Step(n) => Some(n),
            RoadmapNode::Phase(_) => None,
        }
    }

    pub fn as_phase(&self) -> Option<&PhaseNode> {
        match self {
            RoadmapNode::Phase(n) => Some(n),
            RoadmapNode::Step(_) => None,
        }
    }
}
