//! Parsing of character-extraction replies
//!
//! Models rarely honor "ONLY a JSON array" perfectly: replies arrive
//! fenced, prefixed with prose, or with entries missing fields. The
//! parser strips the wrapping, salvages every valid entry, and re-indexes
//! the survivors so utterance indices stay contiguous from zero.

use domain::{Speaker, SpeakerTraits, Utterance};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Why a reply could not be decomposed into utterances
#[derive(Debug, Error)]
pub enum ParseError {
    /// No JSON array found in the reply
    #[error("No JSON array in reply: {0}")]
    NotJson(String),

    /// The array held no usable entries
    #[error("Reply contained no valid utterances")]
    NoUtterances,
}

/// One raw entry as the model writes it; field names vary between runs
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(alias = "speaker_name", alias = "name")]
    speaker: Option<String>,
    #[serde(alias = "speaker_text", alias = "line")]
    text: Option<String>,
    #[serde(default, alias = "properties")]
    traits: Option<SpeakerTraits>,
}

/// Parse an extraction reply into ordered utterances.
///
/// Tolerates code fences, leading/trailing prose, missing trait objects,
/// and speakers repeated across non-adjacent lines. Entries without text
/// are dropped with a warning; the rest are re-indexed in order.
pub fn parse_script(raw: &str) -> Result<Vec<Utterance>, ParseError> {
    let body = extract_json_array(raw).ok_or_else(|| {
        ParseError::NotJson(raw.chars().take(80).collect())
    })?;

    let entries: Vec<RawEntry> = serde_json::from_str(body)
        .map_err(|e| ParseError::NotJson(e.to_string()))?;

    let total = entries.len();
    let mut utterances = Vec::with_capacity(total);
    for (position, entry) in entries.into_iter().enumerate() {
        let Some(text) = entry.text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
        else {
            warn!(position, "Dropping script entry without text");
            continue;
        };

        let speaker = entry
            .speaker
            .map_or_else(Speaker::narrator, Speaker::new);

        let mut utterance = Utterance::new(utterances.len(), speaker, text);
        if let Some(traits) = entry.traits {
            utterance = utterance.with_traits(traits);
        }
        utterances.push(utterance);
    }

    if utterances.is_empty() {
        return Err(ParseError::NoUtterances);
    }
    if utterances.len() < total {
        warn!(
            kept = utterances.len(),
            dropped = total - utterances.len(),
            "Salvaged a partially valid script"
        );
    }

    Ok(utterances)
}

/// Locate the JSON array inside a possibly fenced or prefixed reply
fn extract_json_array(raw: &str) -> Option<&str> {
    let mut body = raw.trim();

    // Strip a markdown fence if present ("```json\n...\n```" or bare "```")
    if let Some(rest) = body.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end) = rest.rfind("```") {
            body = rest[..end].trim();
        }
    }

    // Fall back to the outermost bracket pair for replies with prose around
    let start = body.find('[')?;
    let end = body.rfind(']')?;
    (start < end).then(|| &body[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_REPLY: &str = r#"[
        {"speaker": "Alice", "text": "Hello.", "traits": {"gender": "female", "age": "young"}},
        {"speaker": "Bob", "text": "Hi there.", "traits": {"gender": "male"}}
    ]"#;

    #[test]
    fn parses_a_clean_reply() {
        let utterances = parse_script(CLEAN_REPLY).unwrap();
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].index, 0);
        assert_eq!(utterances[0].speaker.as_str(), "Alice");
        assert_eq!(utterances[0].text, "Hello.");
        assert_eq!(utterances[0].traits.gender.as_deref(), Some("female"));
        assert_eq!(utterances[1].index, 1);
        assert_eq!(utterances[1].speaker.as_str(), "Bob");
    }

    #[test]
    fn parses_a_fenced_reply() {
        let fenced = format!("```json\n{CLEAN_REPLY}\n```");
        let utterances = parse_script(&fenced).unwrap();
        assert_eq!(utterances.len(), 2);
    }

    #[test]
    fn parses_a_reply_with_surrounding_prose() {
        let chatty = format!("Here is the script you asked for:\n{CLEAN_REPLY}\nLet me know!");
        let utterances = parse_script(&chatty).unwrap();
        assert_eq!(utterances.len(), 2);
    }

    #[test]
    fn tolerates_alternate_field_names() {
        let reply = r#"[{"speaker_name": "Alice", "speaker_text": "Hello."}]"#;
        let utterances = parse_script(reply).unwrap();
        assert_eq!(utterances[0].speaker.as_str(), "Alice");
        assert_eq!(utterances[0].text, "Hello.");
    }

    #[test]
    fn missing_traits_become_empty() {
        let reply = r#"[{"speaker": "Alice", "text": "Hello."}]"#;
        let utterances = parse_script(reply).unwrap();
        assert!(utterances[0].traits.is_empty());
    }

    #[test]
    fn missing_speaker_becomes_narrator() {
        let reply = r#"[{"text": "It was a dark and stormy night."}]"#;
        let utterances = parse_script(reply).unwrap();
        assert!(utterances[0].speaker.is_narrator());
    }

    #[test]
    fn repeated_speakers_are_kept_per_line() {
        let reply = r#"[
            {"speaker": "Alice", "text": "One."},
            {"speaker": "Bob", "text": "Two."},
            {"speaker": "Alice", "text": "Three."}
        ]"#;
        let utterances = parse_script(reply).unwrap();
        assert_eq!(utterances.len(), 3);
        assert_eq!(utterances[2].speaker.as_str(), "Alice");
        assert_eq!(utterances[2].index, 2);
    }

    #[test]
    fn entries_without_text_are_dropped_and_reindexed() {
        let reply = r#"[
            {"speaker": "Alice", "text": "One."},
            {"speaker": "Ghost", "text": "   "},
            {"speaker": "Bob", "text": "Two."}
        ]"#;
        let utterances = parse_script(reply).unwrap();
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[1].speaker.as_str(), "Bob");
        assert_eq!(utterances[1].index, 1);
    }

    #[test]
    fn whitespace_in_text_is_trimmed() {
        let reply = r#"[{"speaker": "Alice", "text": "  Hello.  "}]"#;
        let utterances = parse_script(reply).unwrap();
        assert_eq!(utterances[0].text, "Hello.");
    }

    #[test]
    fn garbage_is_not_json() {
        let result = parse_script("I couldn't find any dialogue, sorry!");
        assert!(matches!(result, Err(ParseError::NotJson(_))));
    }

    #[test]
    fn empty_array_has_no_utterances() {
        let result = parse_script("[]");
        assert!(matches!(result, Err(ParseError::NoUtterances)));
    }

    #[test]
    fn array_of_textless_entries_has_no_utterances() {
        let result = parse_script(r#"[{"speaker": "Alice"}]"#);
        assert!(matches!(result, Err(ParseError::NoUtterances)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = parse_script(r#"[{"speaker": "Alice", "text": "Hello."#);
        assert!(matches!(result, Err(ParseError::NotJson(_))));
    }
}
