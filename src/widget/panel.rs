//! Collapsible transcript panel and the retained transcript record.

use chrono::{DateTime, Local};

/// Seeded into the notes pane after a transcription; also the sentinel
/// the merge flow compares against to tell real notes apart. Keep it a
/// single constant so the two sides can never drift.
pub const PLACEHOLDER_NOTES: &str =
    "The transcribed text is available in the panel above. You can edit here to add additional notes.";

/// Body height ceiling when the panel is expanded, in lines.
pub const PANEL_BODY_MAX_LINES: usize = 12;

/// The last transcript the widget received. Overwritten wholesale by
/// each successful transcription; read by the merge flow.
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub text: String,
    pub source_file: String,
    pub received_at: DateTime<Local>,
}

impl TranscriptRecord {
    pub fn new(text: String, source_file: String) -> Self {
        Self {
            text,
            source_file,
            received_at: Local::now(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Display copy of a transcript, collapsed until toggled open.
#[derive(Debug, Clone)]
pub struct TranscriptPanel {
    text: String,
    char_count: usize,
    expanded: bool,
}

impl TranscriptPanel {
    pub fn new(record: &TranscriptRecord) -> Self {
        Self {
            text: record.text.clone(),
            char_count: record.char_count(),
            expanded: false,
        }
    }

    /// Flip between collapsed and expanded. Presentational only.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn header(&self) -> String {
        let arrow = if self.expanded { "▲" } else { "▼" };
        format!("📝 Transcription ({} characters) {}", self.char_count, arrow)
    }

    /// Transcript lines visible right now: none while collapsed, at most
    /// the height ceiling while expanded. Lines come back verbatim.
    pub fn body_lines(&self) -> Vec<&str> {
        if !self.expanded {
            return Vec::new();
        }
        self.text.lines().take(PANEL_BODY_MAX_LINES).collect()
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![self.header()];
        for line in self.body_lines() {
            lines.push(format!("  {}", line));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> TranscriptRecord {
        TranscriptRecord::new(text.to_string(), "meeting.mp3".to_string())
    }

    #[test]
    fn test_header_counts_characters() {
        let panel = TranscriptPanel::new(&record("Hello world"));
        assert_eq!(panel.header(), "📝 Transcription (11 characters) ▼");
    }

    #[test]
    fn test_char_count_is_unicode_aware() {
        assert_eq!(record("día").char_count(), 3);
    }

    #[test]
    fn test_new_panel_starts_collapsed() {
        let panel = TranscriptPanel::new(&record("Hello"));
        assert!(!panel.is_expanded());
        assert!(panel.body_lines().is_empty());
    }

    #[test]
    fn test_expanded_body_is_verbatim() {
        let mut panel = TranscriptPanel::new(&record("line one\n  indented\t line"));
        panel.toggle();
        assert_eq!(panel.body_lines(), ["line one", "  indented\t line"]);
    }

    #[test]
    fn test_expanded_body_respects_height_ceiling() {
        let long: Vec<String> = (0..30).map(|i| format!("line {}", i)).collect();
        let mut panel = TranscriptPanel::new(&record(&long.join("\n")));
        panel.toggle();
        assert_eq!(panel.body_lines().len(), PANEL_BODY_MAX_LINES);
    }

    #[test]
    fn test_toggle_pair_returns_to_collapsed_rendering() {
        let mut panel = TranscriptPanel::new(&record("Hello"));
        let collapsed = panel.render_lines();

        panel.toggle();
        assert_ne!(panel.render_lines(), collapsed);

        panel.toggle();
        assert_eq!(panel.render_lines(), collapsed);
    }
}
