//! Upload dialog state: file selection, validation and the in-flight
//! flags around a submission.

use crate::api::{AudioFormat, MAX_UPLOAD_BYTES, MAX_UPLOAD_MB};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BYTES_PER_MB: f64 = (1024 * 1024) as f64;

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("Open the upload dialog first")]
    NotOpen,
    #[error("Please select an audio file")]
    NoFileSelected,
    #[error("The file is too large. The limit is {} MB", MAX_UPLOAD_MB)]
    FileTooLarge,
    #[error("Unsupported audio format: {0} (accepted: mp3, wav, m4a, flac, ogg, aac)")]
    UnsupportedFormat(String),
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

/// The user's current pick, captured at selection time.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub format: AudioFormat,
}

impl SelectedFile {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }

    /// Info line shown after selection: name, size with two decimals,
    /// and the detected format.
    pub fn describe(&self) -> String {
        format!("{} · {:.2} MB · {}", self.name, self.size_mb(), self.format)
    }

    pub fn is_too_large(&self) -> bool {
        self.size_bytes > MAX_UPLOAD_BYTES
    }
}

/// Modal dialog state machine. IO stays outside; callers stat the file
/// and hand the size in.
#[derive(Debug)]
pub struct UploadDialog {
    visible: bool,
    selected: Option<SelectedFile>,
    submit_enabled: bool,
    progress_visible: bool,
}

impl UploadDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: None,
            submit_enabled: true,
            progress_visible: false,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hide the dialog and discard any selection.
    pub fn close(&mut self) {
        self.visible = false;
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Record a picked file and return its info line. Rejects paths
    /// outside the audio allow-list.
    pub fn select(&mut self, path: &Path, size_bytes: u64) -> Result<String, DialogError> {
        if !self.visible {
            return Err(DialogError::NotOpen);
        }

        let format = AudioFormat::from_path(path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string();
            DialogError::UnsupportedFormat(ext)
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let file = SelectedFile {
            path: path.to_path_buf(),
            name,
            size_bytes,
            format,
        };
        let info = file.describe();
        self.selected = Some(file);
        Ok(info)
    }

    /// The file to submit, if the dialog state allows a submission.
    /// Exactly 25 MB passes; strictly larger is rejected.
    pub fn submission(&self) -> Result<&SelectedFile, DialogError> {
        let file = self.selected.as_ref().ok_or(DialogError::NoFileSelected)?;
        if file.is_too_large() {
            return Err(DialogError::FileTooLarge);
        }
        Ok(file)
    }

    /// Disable the submit control and show the progress section.
    pub fn begin_submission(&mut self) {
        self.submit_enabled = false;
        self.progress_visible = true;
    }

    /// Restore the controls once the request settles, success or not.
    pub fn finish_submission(&mut self) {
        self.submit_enabled = true;
        self.progress_visible = false;
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_progress_visible(&self) -> bool {
        self.progress_visible
    }

    /// Dialog block for the workspace view.
    pub fn render(&self) -> String {
        let mut out = String::from("┄┄ Upload audio ┄┄\n");
        match &self.selected {
            Some(file) => out.push_str(&format!("  Selected: {}\n", file.describe())),
            None => out.push_str("  No file selected (use: pick <path>)\n"),
        }
        if self.progress_visible {
            out.push_str("  Uploading...\n");
        }
        let submit = if self.submit_enabled { "submit" } else { "submit (busy)" };
        out.push_str(&format!("  Actions: {}, close\n", submit));
        out
    }
}

impl Default for UploadDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_dialog() -> UploadDialog {
        let mut dialog = UploadDialog::new();
        dialog.open();
        dialog
    }

    #[test]
    fn test_select_requires_open_dialog() {
        let mut dialog = UploadDialog::new();
        let err = dialog.select(Path::new("meeting.mp3"), 1024).unwrap_err();
        assert!(matches!(err, DialogError::NotOpen));
    }

    #[test]
    fn test_select_describes_file_with_two_decimals() {
        let mut dialog = open_dialog();
        let info = dialog.select(Path::new("/audio/meeting.mp3"), 3_355_443).unwrap();
        assert_eq!(info, "meeting.mp3 · 3.20 MB · MP3");
    }

    #[test]
    fn test_select_rejects_unknown_extension() {
        let mut dialog = open_dialog();
        let err = dialog.select(Path::new("notes.txt"), 10).unwrap_err();
        assert!(matches!(err, DialogError::UnsupportedFormat(ext) if ext == "txt"));
        assert!(dialog.selected().is_none());
    }

    #[test]
    fn test_submission_requires_a_file() {
        let dialog = open_dialog();
        assert!(matches!(dialog.submission(), Err(DialogError::NoFileSelected)));
    }

    #[test]
    fn test_exactly_25_mb_passes() {
        let mut dialog = open_dialog();
        dialog.select(Path::new("big.wav"), 25 * 1024 * 1024).unwrap();
        assert!(dialog.submission().is_ok());
    }

    #[test]
    fn test_one_byte_over_25_mb_is_rejected() {
        let mut dialog = open_dialog();
        dialog.select(Path::new("big.wav"), 25 * 1024 * 1024 + 1).unwrap();
        assert!(matches!(dialog.submission(), Err(DialogError::FileTooLarge)));
    }

    #[test]
    fn test_submission_flags_restore() {
        let mut dialog = open_dialog();
        dialog.begin_submission();
        assert!(!dialog.is_submit_enabled());
        assert!(dialog.is_progress_visible());

        dialog.finish_submission();
        assert!(dialog.is_submit_enabled());
        assert!(!dialog.is_progress_visible());
    }

    #[test]
    fn test_close_discards_selection() {
        let mut dialog = open_dialog();
        dialog.select(Path::new("clip.ogg"), 512).unwrap();
        dialog.close();
        assert!(!dialog.is_open());
        assert!(dialog.selected().is_none());
    }
}
