//! 提示词构造

use crate::types::{Category, Step, TripDescriptor};

/// 项目名提示词
pub fn project_name_prompt(prompt: &str) -> String {
    format!(
        r#"Generate a short, catchy project name (2-4 words maximum) for this learning goal: {prompt}

Requirements:
- Keep it concise and memorable
- Make it relevant to the topic
- Avoid generic words like "journey" or "guide"
- Just return the name, nothing else

Example format: "React Mastery" or "Python Fundamentals""#
    )
}

/// 阶段生成提示词，按类别选择模板
pub fn phases_prompt(prompt: &str, category: Category, trip: Option<&TripDescriptor>) -> String {
    match (category, trip) {
        (Category::TravelPlanner, Some(trip)) => travel_prompt(prompt, trip),
        (Category::Subject, _) => subject_prompt(prompt),
        _ => generic_prompt(prompt, category),
    }
}

fn phase_skeleton() -> String {
    (1..=3)
        .map(|n| {
            let steps: Vec<String> = (1..=4).map(|k| format!("{}.{} [Step description]", n, k)).collect();
            format!("Phase {}: [Phase Name - 1-2 words]\n{}", n, steps.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn travel_prompt(prompt: &str, trip: &TripDescriptor) -> String {
    let days = trip.days();
    let day_block = |n: u32| {
        format!(
            "Day {n}: [Location/Theme - 1-2 words]\n\
             {n}.1 [Morning activity with specific location and time]\n\
             {n}.2 [Afternoon activity with specific location and time]\n\
             {n}.3 [Evening activity with specific location and time]\n\
             {n}.4 [Night activity or rest with specific location]"
        )
    };

    format!(
        r#"Create a detailed {days}-day travel itinerary for: {prompt}

Travel Details:
- Destination: {destination}
- Starting from: {start}
- Duration: {days} days
- Number of travelers: {travelers}
- Budget: ${budget}

CRITICAL REQUIREMENT: Create exactly {days} days, each day must have EXACTLY 4 activities, no more, no less.

Structure your response as days with activities:

{day1}

{day2}

Continue for all {days} days...

Requirements:
- Each day MUST have exactly 4 activities (this is mandatory)
- Include specific locations, attractions, restaurants, and accommodations
- Consider travel time between locations
- Include budget-appropriate suggestions
- Mix of sightseeing, dining, culture, and relaxation
- Day names should be location-based or theme-based (e.g., "Downtown", "Museums", "Nature")
- Do not use markdown formatting

Generate the complete {days}-day itinerary for: {prompt}"#,
        destination = trip.destination,
        start = trip.starting_location,
        travelers = trip.traveler_count,
        budget = trip.budget,
        day1 = day_block(1),
        day2 = day_block(2),
    )
}

fn subject_prompt(prompt: &str) -> String {
    format!(
        r#"Create a comprehensive learning roadmap for studying: {prompt}

CRITICAL REQUIREMENT: Each phase must have EXACTLY 4 steps, no more, no less.

Structure your response as phases with steps:

{skeleton}

Requirements for Subject Learning:
- Create phases that focus on academic learning and mastery
- Each phase MUST have exactly 4 steps (this is mandatory)
- Phase names should be 1-2 words only (e.g., "Basics", "Practice", "Mastery", "Advanced")
- Steps should focus on study techniques, understanding concepts, practice, and application
- Include activities like reading, note-taking, problem-solving, testing, and teaching
- Do not use markdown formatting

IMPORTANT: Do not create more or fewer than 4 steps per phase. This is a strict requirement.

Generate the subject learning roadmap for: {prompt}"#,
        skeleton = phase_skeleton(),
    )
}

fn generic_prompt(prompt: &str, category: Category) -> String {
    format!(
        r#"Create a comprehensive learning roadmap for: {prompt}

CRITICAL REQUIREMENT: Each phase must have EXACTLY 4 steps, no more, no less.

Structure your response as phases with steps:

{skeleton}

Requirements:
- Each phase MUST have exactly 4 steps (this is mandatory)
- Phase names should be 1-2 words only (e.g., "Foundation", "Practice", "Mastery")
- Steps should be specific and actionable
- Focus on practical, real-world implementation
- Make it appropriate for the category: {category}
- Do not use markdown formatting

IMPORTANT: Do not create more or fewer than 4 steps per phase. This is a strict requirement.

Generate the roadmap for: {prompt}"#,
        skeleton = phase_skeleton(),
        category = category.display_name(),
    )
}

fn numbered_activities(steps: &[&Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 地图地点批量提示词
pub fn map_locations_prompt(destination: &str, steps: &[&Step]) -> String {
    format!(
        r#"For a travel itinerary to {destination}, provide specific location names for these activities:

{activities}

For each activity, provide 1 specific location name in {destination}. Format your response as:

Activity 1: [Location name]
Activity 2: [Location name]
...

Only provide location names, no additional text."#,
        activities = numbered_activities(steps),
    )
}

/// 视频批量提示词
pub fn videos_prompt(steps: &[&Step]) -> String {
    format!(
        r#"For these learning activities, provide 2 real YouTube video URLs for each. Make sure the videos exist and are educational:

{activities}

For each activity, provide 2 real YouTube video URLs with their actual titles. Format your response as:

Activity 1:
Title: [Actual video title]
URL: [YouTube URL]
Title: [Actual video title]
URL: [YouTube URL]

Activity 2:
Title: [Actual video title]
URL: [YouTube URL]
Title: [Actual video title]
URL: [YouTube URL]

...

Provide real YouTube URLs and their actual titles, not placeholder text."#,
        activities = numbered_activities(steps),
    )
}
