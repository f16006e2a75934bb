//! The transcription widget: upload dialog, cosmetic progress,
//! transcript panel, merge prompt composition and the workbench object
//! that ties them to the workspace.

pub mod dialog;
pub mod merge;
pub mod panel;
pub mod progress;
pub mod workbench;

pub use dialog::{DialogError, SelectedFile, UploadDialog};
pub use merge::{MergeError, MERGE_INSTRUCTION};
pub use panel::{TranscriptPanel, TranscriptRecord, PANEL_BODY_MAX_LINES, PLACEHOLDER_NOTES};
pub use progress::{ProgressSimulator, PROGRESS_CEILING, PROGRESS_TICK};
pub use workbench::{Notifier, TerminalNotifier, Workbench, MERGE_TRIGGER, TRANSCRIBE_TRIGGER};
