//! The current audio artifact: an in-memory playable WAV plus a label.
//!
//! Exactly one artifact is current at a time; replacing it drops the
//! previous buffers (callers also stop any playback of the old one).

use anyhow::{Context, Result};
use std::path::Path;

use super::recorder::RecordedAudio;
use super::wav::{DecodedAudio, decode_wav, encode_wav};

/// Label given to artifacts produced by the microphone
const RECORDED_LABEL: &str = "Recorded Audio";

/// Where an artifact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource {
    Recording,
    File,
}

/// An in-memory audio clip ready for playback or upload.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    wav_bytes: Vec<u8>,
    label: String,
    source: ArtifactSource,
}

impl AudioArtifact {
    /// Finalize a microphone recording into an artifact.
    pub fn from_recording(recording: &RecordedAudio) -> Result<Self> {
        let wav_bytes = encode_wav(&recording.samples, recording.sample_rate)
            .context("Failed to encode recording")?;
        Ok(Self {
            wav_bytes,
            label: RECORDED_LABEL.to_string(),
            source: ArtifactSource::Recording,
        })
    }

    /// Build an artifact from a locally selected file. No network call;
    /// the bytes are validated as WAV up front so playback and upload
    /// can't fail later on a bad pick.
    pub fn from_file(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("wav") => {}
            Some(ext) => anyhow::bail!(
                "Unsupported audio format: .{ext}\nCurrently supported: WAV"
            ),
            None => anyhow::bail!("File has no extension. Please provide a WAV file."),
        }

        let wav_bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        decode_wav(&wav_bytes)
            .with_context(|| format!("{} is not a valid WAV file", path.display()))?;

        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Selected Audio")
            .to_string();

        Ok(Self {
            wav_bytes,
            label,
            source: ArtifactSource::File,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn wav_bytes(&self) -> &[u8] {
        &self.wav_bytes
    }

    pub fn source(&self) -> ArtifactSource {
        self.source
    }

    /// Decode to samples for playback.
    pub fn decode(&self) -> Result<DecodedAudio> {
        decode_wav(&self.wav_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_artifact_label() {
        let recording = RecordedAudio {
            samples: vec![0.1, -0.1, 0.2],
            sample_rate: 44100,
        };
        let artifact = AudioArtifact::from_recording(&recording).unwrap();
        assert_eq!(artifact.label(), "Recorded Audio");
        assert_eq!(artifact.source(), ArtifactSource::Recording);
        assert!(!artifact.wav_bytes().is_empty());
    }

    #[test]
    fn test_file_artifact_uses_file_name_as_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.wav");
        let bytes = encode_wav(&[0.0, 0.5, -0.5], 16000).unwrap();
        std::fs::write(&path, bytes).unwrap();

        let artifact = AudioArtifact::from_file(&path).unwrap();
        assert_eq!(artifact.label(), "meeting.wav");
        assert_eq!(artifact.source(), ArtifactSource::File);
    }

    #[test]
    fn test_file_artifact_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"junk").unwrap();
        assert!(AudioArtifact::from_file(&path).is_err());
    }

    #[test]
    fn test_file_artifact_rejects_invalid_wav_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"RIFFnope").unwrap();
        assert!(AudioArtifact::from_file(&path).is_err());
    }

    #[test]
    fn test_decode_round_trips_recording() {
        let recording = RecordedAudio {
            samples: vec![0.25; 1600],
            sample_rate: 16000,
        };
        let artifact = AudioArtifact::from_recording(&recording).unwrap();
        let decoded = artifact.decode().unwrap();
        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.samples.len(), 1600);
    }
}
