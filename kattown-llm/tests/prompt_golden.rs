//! Persona Prompt Quality — Golden Test Set.
//!
//! A curated set of persona→rendered-prompt pairs for validating that the
//! template produces coherent, fully-interpolated system prompts.
//!
//! ## Usage
//!
//! - **Offline eval:** `cargo test -p kattown-llm --test prompt_golden`
//!   verifies template rendering produces well-formed prompts. These run
//!   in CI with no backend required.

use kattown_llm::prompt;

/// A golden test case for prompt evaluation.
struct GoldenCase {
    /// Human-readable name for the test case.
    name: &'static str,
    /// NPC display name.
    npc_name: &'static str,
    /// Persona description handed to the backend.
    persona: &'static str,
    /// One-line expertise label.
    expertise: &'static str,
    /// Strings that MUST appear in the rendered prompt.
    prompt_must_contain: Vec<&'static str>,
    /// Strings that MUST NOT appear in the rendered prompt.
    prompt_must_not_contain: Vec<&'static str>,
}

fn golden_cases() -> Vec<GoldenCase> {
    vec![
        // ---------------------------------------------------------------
        // 1. Fisherman with a dream
        // ---------------------------------------------------------------
        GoldenCase {
            name: "kev_fisherman",
            npc_name: "Kev",
            persona: "Kev is a huge fishing lover. His dream is to become a captain.",
            expertise: "Expert Fisherman",
            prompt_must_contain: vec![
                "Kev",
                "fishing lover",
                "Expert Fisherman",
                "Stay in character",
            ],
            prompt_must_not_contain: vec!["{npc_name}", "{persona_description}", "{expertise}"],
        },
        // ---------------------------------------------------------------
        // 2. Adventurer far from home
        // ---------------------------------------------------------------
        GoldenCase {
            name: "ellie_adventurer",
            npc_name: "Ellie",
            persona: "Ellie left home dreaming of distant shores and still talks about them.",
            expertise: "Adventurer",
            prompt_must_contain: vec!["Ellie", "distant shores", "Adventurer"],
            prompt_must_not_contain: vec!["{expertise}"],
        },
        // ---------------------------------------------------------------
        // 3. Historian with awkward punctuation in the persona text
        // ---------------------------------------------------------------
        GoldenCase {
            name: "kenji_historian_braces_survive",
            npc_name: "Kenji",
            persona: "Kenji is a cheerful guy who says things like {citation needed}.",
            expertise: "Village Historian",
            prompt_must_contain: vec!["Kenji", "{citation needed}", "Village Historian"],
            prompt_must_not_contain: vec!["{persona_description}"],
        },
    ]
}

#[test]
fn golden_prompts_render_fully() {
    for case in golden_cases() {
        let rendered = prompt::persona_prompt(case.npc_name, case.persona, case.expertise);
        for needle in &case.prompt_must_contain {
            assert!(
                rendered.contains(needle),
                "case '{}': rendered prompt missing '{}'\n---\n{}",
                case.name,
                needle,
                rendered
            );
        }
        for needle in &case.prompt_must_not_contain {
            assert!(
                !rendered.contains(needle),
                "case '{}': rendered prompt still contains '{}'\n---\n{}",
                case.name,
                needle,
                rendered
            );
        }
    }
}

#[test]
fn persona_prompt_keeps_rules_block() {
    let rendered = prompt::persona_prompt("Kev", "Loves fishing.", "Expert Fisherman");
    assert!(rendered.contains("RULES:"));
    assert!(rendered.contains("under 3 sentences"));
    assert!(rendered.contains("Never break the fourth wall"));
}
