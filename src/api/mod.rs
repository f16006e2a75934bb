pub mod template;
pub mod transcription;

pub use template::{TemplateBackend, TemplateClient, TemplateError, COMPLETE_TEMPLATE_PATH};
pub use transcription::{
    AudioFormat, AudioUpload, TranscribeError, TranscriptionBackend, TranscriptionClient,
    TranscriptionOutcome, HEALTH_PATH, MAX_UPLOAD_BYTES, MAX_UPLOAD_MB, TRANSCRIBE_PATH,
};
