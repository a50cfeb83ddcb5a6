// Shared prompt fragments.
// Each agent owns its task instruction in agents/prompts.rs; this file only
// holds the cross-cutting pieces they append.

/// Appended to every structured-output instruction.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY valid JSON, no additional text or explanation.";

/// Opening line of the conversational reply instruction.
pub const ASSISTANT_PERSONA: &str = "You are a friendly, professional LinkedIn career assistant.";
