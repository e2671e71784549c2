//! 固定步骤数规整：每个阶段恰好4个步骤

use crate::types::{Category, Phase, Step};

/// 每个阶段的步骤数
pub const STEPS_PER_PHASE: usize = 4;

/// 补齐或截断到 [`STEPS_PER_PHASE`] 个步骤；多出的步骤直接丢弃
pub fn normalize_phase(mut phase: Phase, category: Category) -> Phase {
    phase.steps.truncate(STEPS_PER_PHASE);

    let noun = category.filler_noun();
    let plural = category.filler_noun_plural();
    let scope = if category.is_travel() { "day" } else { "phase" };
    while phase.steps.len() < STEPS_PER_PHASE {
        let k = phase.steps.len() + 1;
        phase.steps.push(Step::new(
            format!("Additional {} {}", noun, k),
            format!(
                "Complete additional {} for {} on this {}",
                plural,
                phase.name.to_lowercase(),
                scope
            ),
        ));
    }

    phase
}

pub fn normalize_phases(phases: Vec<Phase>, category: Category) -> Vec<Phase> {
    phases
        .into_iter()
        .map(|phase| normalize_phase(phase, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_with(n: usize) -> Phase {
        Phase::new(1, "Basics").with_steps(
            (1..=n)
                .map(|i| Step::from_content(&format!("step {}", i)))
                .collect(),
        )
    }

    #[test]
    fn test_arity_is_always_four() {
        for n in [0, 3, 4, 7] {
            let phase = normalize_phase(phase_with(n), Category::Project);
            assert_eq!(phase.steps.len(), STEPS_PER_PHASE, "input with {} steps", n);
        }
    }

    #[test]
    fn test_padding_uses_category_noun() {
        let phase = normalize_phase(phase_with(2), Category::Project);
        assert_eq!(phase.steps[2].title, "Additional task 3");
        assert_eq!(phase.steps[3].title, "Additional task 4");
        assert_eq!(
            phase.steps[2].description,
            "Complete additional tasks for basics on this phase"
        );

        let day = normalize_phase(Phase::new(2, "Museums"), Category::TravelPlanner);
        assert_eq!(day.steps[0].title, "Additional activity 1");
        assert_eq!(
            day.steps[0].description,
            "Complete additional activities for museums on this day"
        );
    }

    #[test]
    fn test_truncation_keeps_first_four_in_order() {
        let phase = normalize_phase(phase_with(7), Category::Subject);
        let descriptions: Vec<&str> = phase.steps.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(descriptions, vec!["step 1", "step 2", "step 3", "step 4"]);
    }

    #[test]
    fn test_number_and_name_are_preserved() {
        let phase = normalize_phase(Phase::new(9, "Deep Dive"), Category::Project);
        assert_eq!(phase.number, 9);
        assert_eq!(phase.name, "Deep Dive");
    }
}
