//! In-memory host surface: a top bar, an optional transcript panel slot,
//! a notes pane and a template pane. The widget mutates it through the
//! named accessors and the terminal prints whatever `render` returns.

use crate::widget::TranscriptPanel;

/// A single editable region, stored as display lines.
///
/// `set_text` splits on `\n`, so multi-line text shows up as multiple
/// lines; `text` joins them back. Snapshot/restore works on whole panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pane {
    lines: Vec<String>,
}

impl Pane {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn from_text(text: &str) -> Self {
        let mut pane = Self::new();
        pane.set_text(text);
        pane
    }

    /// Replace the pane content, one line per newline-separated chunk.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|line| line.to_string()).collect();
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when the pane holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// The workspace the widget attaches to. Holds at most one transcript
/// panel; replacing it is how "remove the previous panel" is enforced.
#[derive(Debug, Default)]
pub struct Workspace {
    top_bar: Vec<String>,
    panel: Option<TranscriptPanel>,
    notes: Pane,
    template: Pane,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger label to the top bar. Triggers mount once, at
    /// widget construction, and live for the process lifetime.
    pub fn mount_trigger(&mut self, label: &str) {
        self.top_bar.push(label.to_string());
    }

    pub fn top_bar(&self) -> &[String] {
        &self.top_bar
    }

    pub fn notes_text(&self) -> String {
        self.notes.text()
    }

    pub fn set_notes_text(&mut self, text: &str) {
        self.notes.set_text(text);
    }

    pub fn template_text(&self) -> String {
        self.template.text()
    }

    pub fn set_template_text(&mut self, text: &str) {
        self.template.set_text(text);
    }

    pub fn template_pane(&self) -> &Pane {
        &self.template
    }

    /// Put back a previously taken snapshot of the template pane.
    pub fn restore_template(&mut self, snapshot: Pane) {
        self.template = snapshot;
    }

    pub fn panel(&self) -> Option<&TranscriptPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut TranscriptPanel> {
        self.panel.as_mut()
    }

    /// Install a transcript panel, dropping any previous one.
    pub fn set_panel(&mut self, panel: TranscriptPanel) {
        self.panel = Some(panel);
    }

    /// Plain-text view of the whole workspace. The panel renders
    /// immediately before the notes pane.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("══ dictapad ══");
        for trigger in &self.top_bar {
            out.push_str(&format!("  [{}]", trigger));
        }
        out.push('\n');

        if let Some(panel) = &self.panel {
            for line in panel.render_lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }

        out.push_str("── Notes ──\n");
        for line in self.notes.lines() {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("── Template ──\n");
        for line in self.template.lines() {
            out.push_str(line);
            out.push('\n');
        }

        out
    }
}
