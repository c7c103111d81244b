//! OpenAI Whisper transcription over HTTP.
//!
//! Uploads the clip as a multipart form to `/v1/audio/transcriptions`.  The
//! request body is built from a copy of the clip bytes that lives only for
//! the duration of the call.

use async_trait::async_trait;
use serde::Deserialize;

use crate::audio::CapturedClip;
use crate::config::{ApiConfig, TranscriberConfig};

use super::transcriber::{Transcriber, TranscriptionError};

/// Upload limit of the transcription endpoint (25 MiB).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Transcribes clips with a Whisper model behind an OpenAI-compatible API.
pub struct WhisperTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    language: Option<String>,
}

impl WhisperTranscriber {
    pub fn from_config(api: &ApiConfig, stt: &TranscriberConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            model: stt.model.clone(),
            language: stt.language.clone(),
        }
    }

    /// Reject clips the endpoint would refuse anyway.
    fn check_clip(clip: &CapturedClip) -> Result<(), TranscriptionError> {
        let size = clip.bytes().len();
        if size == 0 {
            return Err(TranscriptionError::EmptyAudio);
        }
        if size > MAX_UPLOAD_BYTES {
            return Err(TranscriptionError::TooLarge {
                size,
                max: MAX_UPLOAD_BYTES,
            });
        }
        Ok(())
    }

    fn error_for_status(status: u16, body: String) -> TranscriptionError {
        match status {
            400 | 415 => TranscriptionError::InvalidAudio(body),
            401 | 403 => TranscriptionError::Unauthorized(body),
            _ => TranscriptionError::Upstream { status, body },
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, clip: &CapturedClip) -> Result<String, TranscriptionError> {
        Self::check_clip(clip)?;
        log::debug!(
            "stt: uploading clip {} ({} bytes, {:?})",
            clip.id(),
            clip.bytes().len(),
            clip.duration()
        );

        let format = clip.format();
        let part = reqwest::multipart::Part::bytes(clip.bytes().to_vec())
            .file_name(format.file_name())
            .mime_str(format.mime_type())
            .map_err(|e| TranscriptionError::Request(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        let mut req = self.client.post(&url).multipart(form);

        let key = self.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("stt: Whisper API error {status}: {body}");
            return Err(Self::error_for_status(status.as_u16(), body));
        }

        let result: WhisperResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;

        let text = result.text.trim().to_string();
        log::info!("stt: transcription complete ({} chars)", text.chars().count());
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
