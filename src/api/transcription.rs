//! Client for the remote transcription service: liveness check plus a
//! multipart upload that returns the transcribed text.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Hard client-side ceiling on uploaded audio, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;
/// The same ceiling in whole megabytes, for user-facing messages.
pub const MAX_UPLOAD_MB: u64 = 25;

pub const HEALTH_PATH: &str = "/api/health";
pub const TRANSCRIBE_PATH: &str = "/api/transcribe";

/// Multipart field name the server expects the audio under.
const UPLOAD_FIELD: &str = "file";

const BYTES_PER_MB: f64 = (1024 * 1024) as f64;

/// Audio formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
    Flac,
    Ogg,
    Aac,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "m4a" => Some(AudioFormat::M4a),
            "flac" => Some(AudioFormat::Flac),
            "ogg" => Some(AudioFormat::Ogg),
            "aac" => Some(AudioFormat::Aac),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// MIME type used for the multipart file part.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::M4a => "audio/mp4",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Aac => "audio/aac",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioFormat::Mp3 => write!(f, "MP3"),
            AudioFormat::Wav => write!(f, "WAV"),
            AudioFormat::M4a => write!(f, "M4A"),
            AudioFormat::Flac => write!(f, "FLAC"),
            AudioFormat::Ogg => write!(f, "OGG"),
            AudioFormat::Aac => write!(f, "AAC"),
        }
    }
}

/// An audio payload ready for upload.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub format: AudioFormat,
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / BYTES_PER_MB
    }
}

/// What a successful transcription hands back to the caller.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: String,
    /// Name the server stored the upload under, when it reports one.
    pub stored_as: Option<String>,
}

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Could not read the audio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("No audio data to upload")]
    EmptyUpload,
    #[error("The file is too large: {0:.2} MB exceeds the {} MB limit", MAX_UPLOAD_MB)]
    TooLarge(f64),
    #[error("Cannot reach the transcription server: {0}")]
    Unreachable(String),
    #[error("Transcription request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Transcription failed: HTTP {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("{0}")]
    Server(String),
    #[error("The server response did not include a transcript")]
    MissingTranscript,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Seam between the widget and the transcription service, so flows can
/// run against fakes in tests.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Liveness probe; any non-success status counts as unreachable.
    async fn check_health(&self) -> Result<(), TranscribeError>;

    /// Validate, upload and interpret the response. The liveness check
    /// runs first and a failure aborts before any upload happens.
    async fn transcribe(&self, upload: AudioUpload) -> Result<TranscriptionOutcome, TranscribeError>;
}

/// HTTP client for the transcription endpoints.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    base_url: String,
    http: reqwest::Client,
}

impl TranscriptionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TranscriptionBackend for TranscriptionClient {
    async fn check_health(&self) -> Result<(), TranscribeError> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TranscribeError::Unreachable(format!("{}", e)))?;

        if !response.status().is_success() {
            return Err(TranscribeError::Unreachable(format!(
                "health check returned HTTP {}",
                response.status().as_u16()
            )));
        }

        debug!("Transcription server is up");
        Ok(())
    }

    async fn transcribe(&self, upload: AudioUpload) -> Result<TranscriptionOutcome, TranscribeError> {
        if upload.bytes.is_empty() {
            return Err(TranscribeError::EmptyUpload);
        }
        if upload.size_bytes() > MAX_UPLOAD_BYTES {
            return Err(TranscribeError::TooLarge(upload.size_mb()));
        }

        self.check_health().await?;

        info!(
            "Uploading {} ({:.2} MB) for transcription",
            upload.file_name,
            upload.size_mb()
        );

        let AudioUpload { file_name, format, bytes } = upload;
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(format.mime_type())?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let url = format!("{}{}", self.base_url, TRANSCRIBE_PATH);
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        debug!("Transcription response: HTTP {}", status.as_u16());
        if !status.is_success() {
            return Err(TranscribeError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: TranscribeResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(TranscribeError::Server(message));
        }

        let transcript = body.transcript.ok_or(TranscribeError::MissingTranscript)?;
        if let Some(stored) = &body.file {
            info!("Server stored the upload as {}", stored);
        }

        Ok(TranscriptionOutcome { transcript, stored_as: body.file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        let cases = [
            ("mp3", Some(AudioFormat::Mp3)),
            ("WAV", Some(AudioFormat::Wav)),
            ("m4a", Some(AudioFormat::M4a)),
            ("flac", Some(AudioFormat::Flac)),
            ("ogg", Some(AudioFormat::Ogg)),
            ("aac", Some(AudioFormat::Aac)),
            ("webm", None),
            ("txt", None),
            ("", None),
        ];

        for (ext, expected) in cases {
            assert_eq!(AudioFormat::from_extension(ext), expected, "extension {:?}", ext);
        }
    }

    #[test]
    fn test_format_from_path_uses_final_extension() {
        assert_eq!(
            AudioFormat::from_path(Path::new("/tmp/meeting.backup.mp3")),
            Some(AudioFormat::Mp3)
        );
        assert_eq!(AudioFormat::from_path(Path::new("/tmp/no-extension")), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::M4a.mime_type(), "audio/mp4");
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
    }

    #[test]
    fn test_upload_size_helpers() {
        let upload = AudioUpload {
            file_name: "clip.wav".to_string(),
            format: AudioFormat::Wav,
            bytes: vec![0u8; 1024 * 1024],
        };
        assert_eq!(upload.size_bytes(), 1024 * 1024);
        assert!((upload.size_mb() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_too_large_message_shows_two_decimals() {
        let err = TranscribeError::TooLarge(30.456);
        assert_eq!(
            format!("{}", err),
            "The file is too large: 30.46 MB exceeds the 25 MB limit"
        );
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TranscriptionClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
    }
}
