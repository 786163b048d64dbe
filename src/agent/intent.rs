use crate::agent::persona::Persona;

// Keyword sets per facet, checked in this order; the first match wins.
// Matching is plain case-insensitive substring containment, not a
// classifier.
const IDENTITY_KEYWORDS: &[&str] = &["life story", "about you", "background"];
const STRENGTH_KEYWORDS: &[&str] = &["superpower", "strength", "best at"];
const GROWTH_KEYWORDS: &[&str] = &["grow", "improve", "development", "areas"];
const MISCONCEPTION_KEYWORDS: &[&str] = &["misconception", "assume", "coworkers", "colleagues"];
const BOUNDARY_KEYWORDS: &[&str] = &["boundaries", "limits", "challenge", "push"];

const GROWTH_LEAD_IN: &str = "The top 3 areas I'd like to grow in are: ";

/// Pick the persona facet a question targets and return its canned answer.
/// Every input yields some text; unrecognized questions fall back to a
/// generic line built from the first sentence of the life story.
pub fn suggest(persona: &Persona, question: &str) -> String {
    let question = question.to_lowercase();

    if contains_any(&question, IDENTITY_KEYWORDS) {
        return persona.life_story.clone();
    }
    if contains_any(&question, STRENGTH_KEYWORDS) {
        return persona.superpower.clone();
    }
    if contains_any(&question, GROWTH_KEYWORDS) {
        return format!("{GROWTH_LEAD_IN}{}", persona.growth_areas.join(" "));
    }
    if contains_any(&question, MISCONCEPTION_KEYWORDS) {
        return persona.misconception.clone();
    }
    if contains_any(&question, BOUNDARY_KEYWORDS) {
        return persona.pushing_boundaries.clone();
    }

    let first_sentence = persona.life_story.split('.').next().unwrap_or("");
    format!("That's an interesting question! Let me think about that in the context of my experience building intelligent systems and solving real-world problems. {first_sentence}.")
}

fn contains_any(question: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| question.contains(keyword))
}
