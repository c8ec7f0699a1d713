//! Upload/transcribe client.
//!
//! Sends the current audio artifact to the backend's `/upload` endpoint
//! as one multipart request and returns the transcript. The response
//! contract is fixed: a 2xx JSON body `{transcription: string}`; any
//! other shape is treated as a server error rather than guessed at.

use serde::Deserialize;

use crate::audio::AudioArtifact;
use crate::config::BackendConfig;
use crate::error::{ApiError, body_snippet};
use crate::http::get_http_client;

/// Multipart field name the backend expects the audio bytes under
const AUDIO_FIELD: &str = "audio";

#[derive(Deserialize)]
struct TranscriptionResponse {
    transcription: String,
}

/// Upload an artifact's WAV bytes and return the transcript.
///
/// Issues exactly one POST to `/upload` with a single multipart field
/// named `audio`. No retries; the shared client's timeout bounds the
/// call. On failure the caller keeps any prior transcript and surfaces
/// the error separately.
pub async fn transcribe_artifact(
    backend: &BackendConfig,
    artifact: &AudioArtifact,
) -> Result<String, ApiError> {
    let client = get_http_client()?;

    let part = reqwest::multipart::Part::bytes(artifact.wav_bytes().to_vec())
        .file_name("audio.wav")
        .mime_str("audio/wav")?;
    let form = reqwest::multipart::Form::new().part(AUDIO_FIELD, part);

    crate::verbose!(
        "POST {} ({} KB, {})",
        backend.endpoint("/upload"),
        artifact.wav_bytes().len() / 1024,
        artifact.label()
    );

    let response = client
        .post(backend.endpoint("/upload"))
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_failure(status, &body));
    }
    parse_transcription_body(&body)
}

fn parse_transcription_body(body: &str) -> Result<String, ApiError> {
    serde_json::from_str::<TranscriptionResponse>(body)
        .map(|r| r.transcription)
        .map_err(|_| ApiError::InvalidResponse(body_snippet(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_transcription_field() {
        let text = parse_transcription_body(r#"{"transcription":"hello world"}"#).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_bare_string_body_is_invalid() {
        assert!(matches!(
            parse_transcription_body("hello world"),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_differently_named_field_is_invalid() {
        assert!(matches!(
            parse_transcription_body(r#"{"text":"hello world"}"#),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
