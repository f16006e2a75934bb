//! The widget itself: a single object owning the workspace, the upload
//! dialog, the retained transcript and the backend seams. Constructed
//! once per process; its public methods are the trigger actions.

use crate::api::{AudioUpload, TemplateBackend, TranscribeError, TranscriptionBackend, TranscriptionOutcome};
use crate::widget::dialog::{DialogError, SelectedFile, UploadDialog};
use crate::widget::merge::{self, MergeError};
use crate::widget::panel::{TranscriptPanel, TranscriptRecord, PLACEHOLDER_NOTES};
use crate::widget::progress::{self, PROGRESS_CEILING, PROGRESS_TICK};
use crate::workspace::Workspace;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

pub const TRANSCRIBE_TRIGGER: &str = "🎵 Transcribe";
pub const MERGE_TRIGGER: &str = "📋 Complete template";

const MERGE_LOADING: &str = "🔄 Completing template...";

/// User-facing notifications, the terminal stand-in for alert and toast.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
    fn success(&self, message: &str);
}

/// Prints notifications straight to the terminal.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("⚠️  {}", message);
    }

    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }
}

pub struct Workbench {
    workspace: Workspace,
    dialog: UploadDialog,
    transcript: Option<TranscriptRecord>,
    transcriber: Box<dyn TranscriptionBackend>,
    completer: Box<dyn TemplateBackend>,
    notifier: Box<dyn Notifier>,
    progress_tick: Duration,
    progress_ceiling: Duration,
}

impl Workbench {
    /// Build the widget and mount its triggers onto the workspace top
    /// bar. Handlers attach here and live for the process lifetime.
    pub fn new(
        transcriber: Box<dyn TranscriptionBackend>,
        completer: Box<dyn TemplateBackend>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let mut workspace = Workspace::new();
        workspace.mount_trigger(TRANSCRIBE_TRIGGER);
        workspace.mount_trigger(MERGE_TRIGGER);

        Self {
            workspace,
            dialog: UploadDialog::new(),
            transcript: None,
            transcriber,
            completer,
            notifier,
            progress_tick: PROGRESS_TICK,
            progress_ceiling: PROGRESS_CEILING,
        }
    }

    /// Shorten the cosmetic progress timings (used by tests).
    pub fn with_progress_timing(mut self, tick: Duration, ceiling: Duration) -> Self {
        self.progress_tick = tick;
        self.progress_ceiling = ceiling;
        self
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn dialog(&self) -> &UploadDialog {
        &self.dialog
    }

    pub fn transcript(&self) -> Option<&TranscriptRecord> {
        self.transcript.as_ref()
    }

    pub fn open_dialog(&mut self) {
        self.dialog.open();
    }

    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    pub fn set_notes(&mut self, text: &str) {
        self.workspace.set_notes_text(text);
    }

    pub fn set_template(&mut self, text: &str) {
        self.workspace.set_template_text(text);
    }

    /// Stat the picked path and record the selection in the dialog.
    pub async fn select_file(&mut self, path: &Path) -> Result<String, DialogError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|source| DialogError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;
        self.dialog.select(path, meta.len())
    }

    /// Upload the selected file and render the transcript. The submit
    /// control stays disabled and the progress bar visible only while
    /// the request is in flight; both are restored when it settles.
    pub async fn transcribe_selected(&mut self) {
        if !self.dialog.is_open() {
            self.notifier.alert("Open the upload dialog first");
            return;
        }
        if !self.dialog.is_submit_enabled() {
            self.notifier.alert("A transcription is already in progress");
            return;
        }

        let file = match self.dialog.submission() {
            Ok(file) => file.clone(),
            Err(err) => {
                self.notifier.alert(&format!("{}", err));
                return;
            }
        };

        info!("Starting transcription of {} ({:.2} MB)", file.name, file.size_mb());
        self.dialog.begin_submission();
        let bar = progress::upload_bar();
        tokio::spawn(progress::run_simulation(
            bar.clone(),
            self.progress_tick,
            self.progress_ceiling,
        ));

        let outcome = self.run_upload(&file).await;

        bar.finish_and_clear();
        self.dialog.finish_submission();

        match outcome {
            Ok(outcome) => {
                let record = TranscriptRecord::new(outcome.transcript, file.name);
                info!(
                    "Transcript received at {} ({} characters)",
                    record.received_at.format("%H:%M:%S"),
                    record.char_count()
                );
                self.render_transcript(record);
                self.dialog.close();
                self.notifier.success("Transcription completed successfully");
            }
            Err(err) => {
                error!("Transcription failed: {}", err);
                self.notifier.alert(&format!("Error during transcription: {}", err));
            }
        }
    }

    async fn run_upload(&self, file: &SelectedFile) -> Result<TranscriptionOutcome, TranscribeError> {
        let bytes = tokio::fs::read(&file.path).await?;
        let upload = AudioUpload {
            file_name: file.name.clone(),
            format: file.format,
            bytes,
        };
        self.transcriber.transcribe(upload).await
    }

    /// Install the panel for `record`, seed the notes placeholder and
    /// retain the record. Any previous panel is replaced.
    pub fn render_transcript(&mut self, record: TranscriptRecord) {
        self.workspace.set_panel(TranscriptPanel::new(&record));
        self.workspace.set_notes_text(PLACEHOLDER_NOTES);
        self.transcript = Some(record);
    }

    pub fn toggle_panel(&mut self) {
        match self.workspace.panel_mut() {
            Some(panel) => panel.toggle(),
            None => self.notifier.alert("There is no transcript panel to toggle"),
        }
    }

    /// Compose transcript + notes + template into a prompt, post it and
    /// write the result into the template pane. On any failure after the
    /// loading indicator is shown, the pane is restored to its snapshot.
    pub async fn merge_template(&mut self) {
        let prompt = match self.build_merge_prompt() {
            Ok(prompt) => prompt,
            Err(err) => {
                self.notifier.alert(&format!("{}", err));
                return;
            }
        };

        let snapshot = self.workspace.template_pane().clone();
        self.workspace.set_template_text(MERGE_LOADING);
        info!("Requesting template completion");

        match self.completer.complete(&prompt).await {
            Ok(result) => {
                self.workspace.set_template_text(&result);
                self.notifier.success("Template completed successfully");
            }
            Err(err) => {
                error!("Template completion failed: {}", err);
                self.workspace.restore_template(snapshot);
                self.notifier.alert(&format!("Error completing template: {}", err));
            }
        }
    }

    fn build_merge_prompt(&self) -> Result<String, MergeError> {
        let notes_text = self.workspace.notes_text();
        let notes = merge::effective_notes(&notes_text);
        let transcript = self.transcript.as_ref().map(|record| record.text.as_str());

        let source = merge::compose_source_text(transcript, notes).ok_or(MergeError::NoSourceText)?;

        if self.workspace.template_pane().is_blank() {
            return Err(MergeError::BlankTemplate);
        }

        Ok(merge::build_prompt(&source, &self.workspace.template_text()))
    }

    /// Standalone liveness check, reported through the notifier.
    pub async fn report_status(&self) {
        match self.transcriber.check_health().await {
            Ok(()) => self.notifier.success("Transcription server is reachable"),
            Err(err) => self.notifier.alert(&format!("{}", err)),
        }
    }

    /// The whole view: workspace, plus the dialog block while it is open.
    pub fn view(&self) -> String {
        let mut out = self.workspace.render();
        if self.dialog.is_open() {
            out.push('\n');
            out.push_str(&self.dialog.render());
        }
        out
    }
}
