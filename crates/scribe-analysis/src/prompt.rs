//! Prompt templates for transcript analysis.

/// System instruction sent with every analysis.
pub const SYSTEM_PROMPT: &str = "You are an assistant that analyzes conversation transcripts. \
Read the transcript and respond with a JSON object containing a concise `summary` of what was \
discussed and a list of concrete `next_actions`, ordered by priority. Respond with JSON only.";

/// User instruction template; `{transcript}` is replaced with the input.
pub const USER_PROMPT_TEMPLATE: &str = "Analyze the following transcript.\n\n\
Transcript:\n\"\"\"\n{transcript}\n\"\"\"";

/// Embed a transcript into the user instruction.
pub fn render_user_prompt(transcript: &str) -> String {
    USER_PROMPT_TEMPLATE.replace("{transcript}", transcript)
}
