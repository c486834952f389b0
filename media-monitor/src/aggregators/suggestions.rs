use crate::types::{Expert, TopicSuggestion, TrendingTopic};

pub const MAX_SUGGESTED_TRENDS: usize = 10;
pub const MAX_SUGGESTED_GUESTS: usize = 3;
const MAX_RELEVANCE: f64 = 10.0;

/// Podcast topic ideas from the current trends and the experts available for them.
///
/// `focus_areas` keeps only trends whose label contains one of the given strings.
pub fn topic_suggestions(
    trends: &[TrendingTopic],
    experts: &[Expert],
    focus_areas: Option<&[String]>,
) -> Vec<TopicSuggestion> {
    let mut suggestions: Vec<TopicSuggestion> = trends
        .iter()
        .take(MAX_SUGGESTED_TRENDS)
        .filter(|trend| match focus_areas {
            Some(areas) if !areas.is_empty() => areas.iter().any(|area| trend.topic.contains(area.as_str())),
            _ => true,
        })
        .map(|trend| {
            let guests: Vec<&Expert> = experts
                .iter()
                .filter(|e| e.expertise.contains(&trend.topic))
                .collect();

            let relevance_score =
                (trend.mentions as f64 * 0.5 + guests.len() as f64 * 2.0).min(MAX_RELEVANCE);

            TopicSuggestion {
                topic: trend.topic.clone(),
                relevance_score,
                reason: format!(
                    "{} artikelen deze week, {} beschikbare experts",
                    trend.mentions,
                    guests.len()
                ),
                potential_guests: guests.into_iter().take(MAX_SUGGESTED_GUESTS).cloned().collect(),
                unique_angle: trend
                    .suggested_angle
                    .clone()
                    .unwrap_or_else(|| format!("Praktijkervaringen met {}", trend.topic)),
                questions: interview_questions(&trend.topic),
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    suggestions
}

pub fn interview_questions(topic: &str) -> Vec<String> {
    let lower = topic.to_lowercase();
    let questions: [&str; 3] = if lower.contains("privacy") {
        [
            "Hoe ga je praktisch om met privacy bij AI-implementaties?",
            "Wat zijn de grootste misverstanden over AI en privacy?",
            "Welke concrete stappen moet een organisatie zetten?",
        ]
    } else if lower.contains("zorg") {
        [
            "Wat zijn succesvolle AI-toepassingen in jullie ziekenhuis?",
            "Hoe krijg je artsen mee in AI-innovaties?",
            "Wat zijn de grootste uitdagingen bij AI in de zorg?",
        ]
    } else if lower.contains("wetgeving") {
        [
            "Wat betekent de AI Act concreet voor Nederlandse bedrijven?",
            "Waar moeten organisaties nu al mee beginnen?",
            "Welke sectoren worden het meest geraakt?",
        ]
    } else {
        return vec![
            format!("Wat is de realiteit van {} in Nederland?", topic),
            "Wat zijn de grootste uitdagingen die je tegenkomt?".to_string(),
            "Welke kansen zie je voor de toekomst?".to_string(),
        ];
    };

    questions.iter().map(|q| q.to_string()).collect()
}
