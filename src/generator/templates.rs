//! 静态阶段模板，在没有可用模型输出时兜底

use crate::types::{Category, Phase, Step, TripDescriptor};

/// 按类别选择模板
pub fn fallback_phases(category: Category, prompt: &str, trip: Option<&TripDescriptor>) -> Vec<Phase> {
    match category {
        Category::TravelPlanner => {
            let trip = trip
                .cloned()
                .unwrap_or_else(|| TripDescriptor::new("destination"));
            travel_phases(&trip)
        }
        Category::Subject => subject_phases(prompt),
        _ => generic_phases(prompt),
    }
}

/// 每天一个阶段：首日 Arrival，末日 Departure，其余 Explore
pub fn travel_phases(trip: &TripDescriptor) -> Vec<Phase> {
    let days = trip.days();
    let destination = &trip.destination;

    (1..=days)
        .map(|day| {
            let name = if day == 1 {
                "Arrival"
            } else if day == days {
                "Departure"
            } else {
                "Explore"
            };
            Phase::new(day, name).with_steps(vec![
                Step::new(
                    "Morning Activity",
                    format!("Start your day {} with a morning activity in {}", day, destination),
                ),
                Step::new(
                    "Afternoon Sightseeing",
                    format!("Explore key attractions and landmarks in {}", destination),
                ),
                Step::new("Evening Dining", "Experience local cuisine and dining culture"),
                Step::new("Night Rest", "Rest and prepare for the next day's adventures"),
            ])
        })
        .collect()
}

fn phase_from(number: u32, name: &str, steps: [(&str, String); 4]) -> Phase {
    Phase::new(number, name).with_steps(
        steps
            .into_iter()
            .map(|(title, description)| Step::new(title, description))
            .collect(),
    )
}

pub fn subject_phases(prompt: &str) -> Vec<Phase> {
    vec![
        phase_from(
            1,
            "Basics",
            [
                ("Study Fundamentals", format!("Learn the basic concepts and principles of {}", prompt)),
                ("Read Materials", format!("Read textbooks, articles, and resources about {}", prompt)),
                ("Take Notes", format!("Create comprehensive notes on key {} topics", prompt)),
                ("Review Concepts", format!("Review and understand core {} concepts", prompt)),
            ],
        ),
        phase_from(
            2,
            "Practice",
            [
                ("Solve Problems", format!("Work through practice problems related to {}", prompt)),
                ("Do Exercises", format!("Complete exercises and assignments in {}", prompt)),
                ("Join Discussions", format!("Participate in study groups or forums about {}", prompt)),
                ("Apply Knowledge", format!("Apply what you've learned about {} to real situations", prompt)),
            ],
        ),
        phase_from(
            3,
            "Mastery",
            [
                ("Advanced Topics", format!("Study advanced concepts and theories in {}", prompt)),
                ("Test Knowledge", format!("Take practice tests or quizzes on {}", prompt)),
                ("Teach Others", format!("Explain {} concepts to help solidify understanding", prompt)),
                ("Stay Current", format!("Keep up with latest developments in {}", prompt)),
            ],
        ),
    ]
}

pub fn generic_phases(prompt: &str) -> Vec<Phase> {
    vec![
        phase_from(
            1,
            "Foundation",
            [
                ("Research Basics", format!("Learn the fundamentals of {}", prompt)),
                ("Set Goals", format!("Define clear objectives for {}", prompt)),
                ("Gather Resources", format!("Collect materials needed for {}", prompt)),
                ("Create Plan", format!("Develop a structured approach for {}", prompt)),
            ],
        ),
        phase_from(
            2,
            "Development",
            [
                ("Build Skills", format!("Develop core skills for {}", prompt)),
                ("Practice Daily", format!("Apply what you've learned about {}", prompt)),
                ("Get Feedback", format!("Seek feedback on your {} progress", prompt)),
                ("Refine Approach", format!("Improve your {} methodology", prompt)),
            ],
        ),
        phase_from(
            3,
            "Mastery",
            [
                ("Advanced Techniques", format!("Master advanced aspects of {}", prompt)),
                ("Share Knowledge", format!("Teach others about {}", prompt)),
                ("Build Portfolio", format!("Create showcase projects for {}", prompt)),
                ("Continuous Learning", format!("Stay updated with {} trends", prompt)),
            ],
        ),
    ]
}
