//! Fixed prompts for character extraction
//!
//! The reply contract is a bare JSON array so the parser has one shape to
//! deal with; `script_parser` still tolerates fenced or prefixed replies.

/// System instruction framing the extraction task
pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You turn prose into a dialogue script for audio narration. Segment the \
given text into an ordered list of spoken lines. Attribute each line to \
its character; lines not spoken by a character belong to the Narrator. \
Keep the original order and do not drop any content.

For each line, infer the speaker's vocal traits where the text supports \
it: gender, age (young, middle-aged, elderly), accent (e.g. british, \
american, australian, irish), tone (e.g. calm, formal, excited, gruff).

Return ONLY a JSON array in exactly this form, with no commentary and no \
code fences:
[
  {
    \"speaker\": \"Character Name\",
    \"text\": \"The words they speak\",
    \"traits\": {
      \"gender\": \"female\",
      \"age\": \"young\",
      \"accent\": \"british\",
      \"tone\": \"calm\"
    }
  }
]
Omit trait fields you cannot infer. The traits object may be empty.";

/// Build the user message for an extraction request
pub fn extraction_prompt(text: &str) -> String {
    format!("Segment this text into a dialogue script:\n\n{text}")
}
