//! Audio playback with a play/pause toggle.
//!
//! Plays the current artifact's samples on a cpal output stream. The
//! toggle flips on explicit user action; when playback reaches the end
//! of the samples it resets itself to paused-at-start, so the next
//! toggle plays from the beginning. Loading a new artifact stops any
//! playback in progress.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// State shared with the output callback.
struct PlaybackState {
    samples: Mutex<Vec<f32>>,
    position: Mutex<usize>,
    playing: AtomicBool,
}

impl PlaybackState {
    fn new() -> Self {
        Self {
            samples: Mutex::new(Vec::new()),
            position: Mutex::new(0),
            playing: AtomicBool::new(false),
        }
    }

    /// Pull the next block of samples, advancing the position.
    ///
    /// Reaching the end flips `playing` off and rewinds to the start,
    /// which is how "auto-reset to paused at end" becomes observable.
    fn next_block(&self, count: usize) -> Option<Vec<f32>> {
        let samples = self.samples.lock().unwrap();
        let mut position = self.position.lock().unwrap();

        if *position >= samples.len() {
            self.playing.store(false, Ordering::Relaxed);
            *position = 0;
            return None;
        }

        let end = (*position + count).min(samples.len());
        let block = samples[*position..end].to_vec();
        *position = end;

        if *position >= samples.len() {
            self.playing.store(false, Ordering::Relaxed);
            *position = 0;
        }

        Some(block)
    }
}

pub struct AudioPlayer {
    state: Arc<PlaybackState>,
    stream: Option<Stream>,
    sample_rate: u32,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(PlaybackState::new()),
            stream: None,
            sample_rate: 0,
        }
    }

    /// Replace the loaded audio. Any playback in progress stops and the
    /// position rewinds; the output stream is rebuilt on next play since
    /// the sample rate may differ.
    pub fn load(&mut self, samples: Vec<f32>, sample_rate: u32) {
        self.state.playing.store(false, Ordering::Relaxed);
        self.stream = None;
        *self.state.position.lock().unwrap() = 0;
        *self.state.samples.lock().unwrap() = samples;
        self.sample_rate = sample_rate;
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing.load(Ordering::Relaxed)
    }

    /// Flip play/pause. Returns whether audio is now playing.
    pub fn toggle(&mut self) -> Result<bool> {
        if self.is_playing() {
            self.state.playing.store(false, Ordering::Relaxed);
            return Ok(false);
        }

        if self.state.samples.lock().unwrap().is_empty() {
            anyhow::bail!("No audio loaded for playback");
        }

        self.ensure_stream()?;
        self.state.playing.store(true, Ordering::Relaxed);
        Ok(true)
    }

    /// Open the output stream at the loaded audio's sample rate.
    fn ensure_stream(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No audio output device available"))?;
        let supported = device
            .default_output_config()
            .context("Failed to query output device configuration")?;

        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: self.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_output_stream::<f32>(&device, &config, self.state.clone()),
            cpal::SampleFormat::I16 => build_output_stream::<i16>(&device, &config, self.state.clone()),
            cpal::SampleFormat::U16 => build_output_stream::<u16>(&device, &config, self.state.clone()),
            format => anyhow::bail!("Unsupported output sample format: {format:?}"),
        }?;

        stream.play().context("Failed to start output stream")?;
        self.stream = Some(stream);
        Ok(())
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an output stream, duplicating mono samples across channels.
fn build_output_stream<T>(
    device: &Device,
    config: &StreamConfig,
    state: Arc<PlaybackState>,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    let err_fn = |err| {
        crate::verbose!("Audio output error (non-fatal): {err}");
    };

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let silence = T::from_sample(0.0f32);

            if !state.playing.load(Ordering::Relaxed) {
                data.fill(silence);
                return;
            }

            let frames = data.len() / channels.max(1);
            let block = state.next_block(frames).unwrap_or_default();

            for (i, frame) in data.chunks_mut(channels.max(1)).enumerate() {
                let sample = block.get(i).copied().unwrap_or(0.0);
                frame.fill(T::from_sample(sample));
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_without_audio_is_rejected() {
        let mut player = AudioPlayer::new();
        assert!(player.toggle().is_err());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_load_resets_playback() {
        let mut player = AudioPlayer::new();
        player.load(vec![0.1; 100], 16000);
        assert!(!player.is_playing());
        assert_eq!(*player.state.position.lock().unwrap(), 0);
    }

    #[test]
    fn test_next_block_advances_and_auto_resets_at_end() {
        let state = PlaybackState::new();
        *state.samples.lock().unwrap() = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        state.playing.store(true, Ordering::Relaxed);

        let first = state.next_block(3).unwrap();
        assert_eq!(first.len(), 3);
        assert!(state.playing.load(Ordering::Relaxed));

        // Final (partial) block flips playing off and rewinds.
        let last = state.next_block(3).unwrap();
        assert_eq!(last.len(), 2);
        assert!(!state.playing.load(Ordering::Relaxed));
        assert_eq!(*state.position.lock().unwrap(), 0);
    }

    #[test]
    fn test_next_block_past_end_returns_none() {
        let state = PlaybackState::new();
        assert!(state.next_block(4).is_none());
        assert!(!state.playing.load(Ordering::Relaxed));
    }
}
