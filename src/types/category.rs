use serde::{Deserialize, Serialize};

/// 路线图类别
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    KitchenRecipe,
    TravelPlanner,
    #[default]
    Project,
    FitnessPlanner,
    Subject,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::KitchenRecipe => write!(f, "kitchen_recipe"),
            Category::TravelPlanner => write!(f, "travel_planner"),
            Category::Project => write!(f, "project"),
            Category::FitnessPlanner => write!(f, "fitness_planner"),
            Category::Subject => write!(f, "subject"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "kitchen_recipe" | "recipe" => Ok(Category::KitchenRecipe),
            "travel_planner" | "travel" => Ok(Category::TravelPlanner),
            "project" => Ok(Category::Project),
            "fitness_planner" | "fitness" => Ok(Category::FitnessPlanner),
            "subject" => Ok(Category::Subject),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl Category {
    pub fn is_travel(&self) -> bool {
        matches!(self, Category::TravelPlanner)
    }

    /// 阶段标签：旅行为 Day，其余为 Phase
    pub fn phase_label(&self) -> &'static str {
        if self.is_travel() { "Day" } else { "Phase" }
    }

    /// 步骤标签：旅行为 Activity，其余为 Step
    pub fn step_label(&self) -> &'static str {
        if self.is_travel() { "Activity" } else { "Step" }
    }

    /// 补齐步骤时使用的名词
    pub fn filler_noun(&self) -> &'static str {
        if self.is_travel() { "activity" } else { "task" }
    }

    pub fn filler_noun_plural(&self) -> &'static str {
        if self.is_travel() { "activities" } else { "tasks" }
    }

    /// 人类可读的类别名，如 `kitchen recipe`
    pub fn display_name(&self) -> String {
        self.to_string().replace('_', " ")
    }
}

/// 行程天数上限
pub const MAX_TRIP_DAYS: u32 = 30;

/// 旅行行程描述
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripDescriptor {
    pub destination: String,
    pub starting_location: String,
    pub duration_days: u32,
    pub traveler_count: u32,
    pub budget: f64,
}

impl TripDescriptor {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            starting_location: String::new(),
            duration_days: 3,
            traveler_count: 1,
            budget: 0.0,
        }
    }

    /// 实际规划的天数，限制在 `1..=MAX_TRIP_DAYS`
    pub fn days(&self) -> u32 {
        self.duration_days.clamp(1, MAX_TRIP_DAYS)
    }
}
