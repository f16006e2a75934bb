//! Prompt composition for the template merge flow.

use super::panel::PLACEHOLDER_NOTES;
use thiserror::Error;

/// Fixed instruction the completion service receives ahead of the text.
pub const MERGE_INSTRUCTION: &str = "Use the source text (transcription and additional notes) to fill in the template. \
Keep the template format. Do not remove headings or structure. \
If there is no information for a field, leave it blank or write [Not specified].";

const TRANSCRIPTION_HEADING: &str = "TRANSCRIPTION:";
const NOTES_HEADING: &str = "ADDITIONAL NOTES:";

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("There is no text available to complete the template")]
    NoSourceText,
    #[error("There is no template to complete")]
    BlankTemplate,
}

/// Classify the notes pane content. The placeholder seeded after a
/// transcription counts as absent, as does whitespace.
pub fn effective_notes(notes: &str) -> Option<&str> {
    let trimmed = notes.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER_NOTES {
        return None;
    }
    Some(trimmed)
}

/// Combine transcript and notes into the source text: a TRANSCRIPTION
/// section, then an ADDITIONAL NOTES section, each ending in a blank
/// line. `None` when there is nothing to send.
pub fn compose_source_text(transcript: Option<&str>, notes: Option<&str>) -> Option<String> {
    let mut source = String::new();

    if let Some(text) = transcript {
        if !text.trim().is_empty() {
            source.push_str(&format!("{}\n{}\n\n", TRANSCRIPTION_HEADING, text));
        }
    }
    if let Some(text) = notes {
        source.push_str(&format!("{}\n{}\n\n", NOTES_HEADING, text));
    }

    if source.trim().is_empty() { None } else { Some(source) }
}

/// The full prompt: instruction, source text, then the template.
pub fn build_prompt(source_text: &str, template: &str) -> String {
    format!(
        "{}\n\nSource text:\n{}\nTemplate:\n{}",
        MERGE_INSTRUCTION, source_text, template
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_notes_count_as_absent() {
        assert_eq!(effective_notes(PLACEHOLDER_NOTES), None);
        assert_eq!(effective_notes(&format!("  {}  ", PLACEHOLDER_NOTES)), None);
    }

    #[test]
    fn test_blank_notes_count_as_absent() {
        assert_eq!(effective_notes(""), None);
        assert_eq!(effective_notes("  \n\t "), None);
    }

    #[test]
    fn test_real_notes_come_back_trimmed() {
        assert_eq!(effective_notes("  urgent  "), Some("urgent"));
    }

    #[test]
    fn test_edited_placeholder_counts_as_real_notes() {
        let edited = format!("{} Call Bob tomorrow.", PLACEHOLDER_NOTES);
        assert!(effective_notes(&edited).is_some());
    }

    #[test]
    fn test_source_text_orders_transcription_before_notes() {
        let source = compose_source_text(Some("Hello"), Some("urgent")).unwrap();
        assert_eq!(source, "TRANSCRIPTION:\nHello\n\nADDITIONAL NOTES:\nurgent\n\n");
    }

    #[test]
    fn test_source_text_with_only_a_transcript() {
        let source = compose_source_text(Some("Hello"), None).unwrap();
        assert_eq!(source, "TRANSCRIPTION:\nHello\n\n");
    }

    #[test]
    fn test_source_text_with_only_notes() {
        let source = compose_source_text(None, Some("urgent")).unwrap();
        assert_eq!(source, "ADDITIONAL NOTES:\nurgent\n\n");
    }

    #[test]
    fn test_empty_sources_compose_to_none() {
        assert_eq!(compose_source_text(None, None), None);
        assert_eq!(compose_source_text(Some("   "), None), None);
    }

    #[test]
    fn test_prompt_carries_instruction_and_both_parts() {
        let source = compose_source_text(Some("Hello"), Some("urgent")).unwrap();
        let prompt = build_prompt(&source, "Name: \nNotes: ");

        assert!(prompt.starts_with(MERGE_INSTRUCTION));
        assert!(prompt.contains("[Not specified]"));
        assert!(prompt.contains("TRANSCRIPTION:\nHello"));
        assert!(prompt.contains("ADDITIONAL NOTES:\nurgent"));
        assert!(prompt.ends_with("Template:\nName: \nNotes: "));
    }
}
