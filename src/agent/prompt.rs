use crate::agent::persona::Persona;

/// Build the single system instruction for the completion step: the whole
/// persona, an instruction to answer in character, and the suggested answer
/// offered as inspiration rather than a script. Pure string construction.
pub fn compose(persona: &Persona, suggested_answer: &str) -> String {
    format!(
        r#"You are responding as someone with this background and personality:

Life Story: {life_story}

#1 Superpower: {superpower}

Top 3 Growth Areas: {growth_areas}

Misconception: {misconception}

Pushing Boundaries: {pushing_boundaries}

Respond naturally and conversationally as this person would, incorporating relevant details from their background. Keep responses concise but personal. If the question directly relates to one of the specific topics above, use that information prominently in your response.

Here's a suggested response based on the person's background: "{suggested_answer}"

You can use this as inspiration but feel free to expand or modify it to sound more natural and conversational."#,
        life_story = persona.life_story,
        superpower = persona.superpower,
        growth_areas = persona.growth_areas.join(" "),
        misconception = persona.misconception,
        pushing_boundaries = persona.pushing_boundaries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_every_persona_field_verbatim() {
        let persona = Persona::me();
        let prompt = compose(&persona, "a suggested answer");

        assert!(prompt.contains(&persona.life_story));
        assert!(prompt.contains(&persona.superpower));
        assert!(prompt.contains(&persona.misconception));
        assert!(prompt.contains(&persona.pushing_boundaries));
        for area in &persona.growth_areas {
            assert!(prompt.contains(area));
        }
    }

    #[test]
    fn prompt_embeds_suggested_answer_verbatim() {
        let persona = Persona::me();
        let suggestion = "Turning complexity into clarity.";
        let prompt = compose(&persona, suggestion);

        assert!(prompt.contains(&format!("\"{suggestion}\"")));
        // The suggestion is framed as advisory, not as a mandatory script.
        assert!(prompt.contains("inspiration"));
    }

    #[test]
    fn growth_areas_are_joined_by_single_spaces() {
        let persona = Persona::me();
        let prompt = compose(&persona, "x");
        assert!(prompt.contains(&persona.growth_areas.join(" ")));
    }
}
