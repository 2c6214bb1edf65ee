//! Persona prompt templates for NPC conversations.
//!
//! Every prompt is a testable artifact. The templates here are the built-in
//! defaults; a game can substitute its own rendered strings.

/// System prompt establishing a character's persona for the whole session.
pub const PERSONA_SYSTEM: &str = r"You are {npc_name}, a resident of Kat Town.
{persona_description}
Your area of expertise: {expertise}.

RULES:
- Stay in character. Never break the fourth wall.
- You are speaking face to face with a visitor, so keep it conversational.
- Keep responses under 3 sentences.
- If asked about things outside your expertise, answer as your character
  would, not as an all-knowing assistant.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Render the default persona system prompt for one character.
#[must_use]
pub fn persona_prompt(npc_name: &str, persona: &str, expertise: &str) -> String {
    render_template(
        PERSONA_SYSTEM,
        &[
            ("npc_name", npc_name),
            ("persona_description", persona),
            ("expertise", expertise),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_placeholders() {
        let out = render_template("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and y and x");
    }

    #[test]
    fn unknown_placeholders_survive() {
        let out = render_template("{a} {missing}", &[("a", "x")]);
        assert_eq!(out, "x {missing}");
    }
}
