// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! System prompt for the voice agent playing the practice persona.

use crate::models::Card;
use std::fmt::Write;

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub persona: &'a str,
    pub persona_traits: &'a [String],
    pub goal: &'a str,
    pub context: &'a str,
    pub cards: &'a [Card],
}

/// Render the roleplay instructions for the conversational agent.
///
/// Section order: persona and traits, goal, context, one bullet per card,
/// then the behavioral directives.
pub fn compose_system_prompt(input: &PromptInput<'_>) -> String {
    let traits = input.persona_traits.join(", ");
    let mut prompt = String::with_capacity(1024);

    // Writing to a String cannot fail.
    let _ = write!(
        prompt,
        "You are roleplaying as {persona}. Your personality traits are: {traits}.\n\
         \n\
         The user is practicing a difficult conversation with you. Their goal is: {goal}\n\
         \n\
         Context of the situation: {context}\n\
         \n\
         Key perspectives they've learned:\n",
        persona = input.persona,
        goal = input.goal,
        context = input.context,
    );

    let bullets: Vec<String> = input
        .cards
        .iter()
        .map(|card| format!("- {}: {}", card.title, card.content))
        .collect();
    prompt.push_str(&bullets.join("\n"));

    let _ = write!(
        prompt,
        "\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         - Stay in character as {persona} with the traits: {traits}\n\
         - Respond naturally as this person would in this situation\n\
         - Be realistic - show the emotions and reactions this person would have\n\
         - Don't make it too easy - challenge the user appropriately\n\
         - Keep responses conversational and brief (2-3 sentences)\n\
         - If the user communicates well, acknowledge it naturally\n\
         - End the conversation naturally when it reaches a good conclusion",
        persona = input.persona,
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn card(title: &str, content: &str, position: i32) -> Card {
        Card {
            id: Uuid::new_v4(),
            perspective_session_id: Uuid::nil(),
            title: title.to_string(),
            content: content.to_string(),
            position,
        }
    }

    fn traits(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_embeds_persona_and_traits() {
        let persona_traits = traits(&["defensive", "busy"]);
        let prompt = compose_system_prompt(&PromptInput {
            persona: "My manager",
            persona_traits: &persona_traits,
            goal: "Ask for a raise",
            context: "Annual review",
            cards: &[],
        });

        assert!(prompt.starts_with(
            "You are roleplaying as My manager. Your personality traits are: defensive, busy."
        ));
        assert!(prompt.contains("Their goal is: Ask for a raise"));
        assert!(prompt.contains("Context of the situation: Annual review"));
        assert!(prompt.contains("- Stay in character as My manager with the traits: defensive, busy"));
    }

    #[test]
    fn test_one_bullet_per_card_in_order() {
        let persona_traits = traits(&["calm"]);
        let cards = [
            card("Workload", "They feel stretched thin", 0),
            card("Budget", "Raises are frozen until Q3", 1),
        ];
        let prompt = compose_system_prompt(&PromptInput {
            persona: "Sam",
            persona_traits: &persona_traits,
            goal: "g",
            context: "c",
            cards: &cards,
        });

        assert!(prompt.contains(
            "Key perspectives they've learned:\n\
             - Workload: They feel stretched thin\n\
             - Budget: Raises are frozen until Q3\n\nIMPORTANT INSTRUCTIONS:"
        ));
    }

    #[test]
    fn test_sections_in_order() {
        let persona_traits = traits(&["calm"]);
        let prompt = compose_system_prompt(&PromptInput {
            persona: "Sam",
            persona_traits: &persona_traits,
            goal: "the goal",
            context: "the context",
            cards: &[card("T", "C", 0)],
        });

        let positions: Vec<usize> = [
            "roleplaying as Sam",
            "the goal",
            "the context",
            "- T: C",
            "challenge the user appropriately",
            "2-3 sentences",
            "End the conversation naturally",
        ]
        .iter()
        .map(|needle| prompt.find(needle).expect(needle))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deterministic() {
        let persona_traits = traits(&["a", "b"]);
        let cards = [card("T", "C", 0)];
        let input = PromptInput {
            persona: "P",
            persona_traits: &persona_traits,
            goal: "G",
            context: "X",
            cards: &cards,
        };
        assert_eq!(compose_system_prompt(&input), compose_system_prompt(&input));
    }
}
