//! Microphone capture.
//!
//! One recording may be active at a time: `start()` opens an input
//! stream that accumulates mono f32 samples into a shared buffer, and
//! `stop()` tears the stream down (releasing the device) and hands the
//! captured samples back. The callback also tracks an RMS input level
//! for the cosmetic meter shown while recording.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::devices::find_input_device;
use super::wav::downmix_to_mono;

/// Recording lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

/// Samples captured between `start()` and `stop()`.
#[derive(Debug, Clone)]
pub struct RecordedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Read-only handle to the live input level, 0.0–1.0.
///
/// Purely presentational; resets to zero when recording ends.
#[derive(Clone)]
pub struct LevelMeter(Arc<AtomicU32>);

impl LevelMeter {
    fn new() -> Self {
        Self(Arc::new(AtomicU32::new(0)))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

pub struct AudioRecorder {
    state: RecordingState,
    samples: Arc<Mutex<Vec<f32>>>,
    level: LevelMeter,
    stream: Option<Stream>,
    sample_rate: u32,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
            samples: Arc::new(Mutex::new(Vec::new())),
            level: LevelMeter::new(),
            stream: None,
            sample_rate: 0,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// Handle for rendering the input level while recording.
    pub fn level_meter(&self) -> LevelMeter {
        self.level.clone()
    }

    /// Begin capturing from the named device (or the system default).
    ///
    /// Device errors (no device, unsupported config, stream failure)
    /// leave the recorder `Idle` for the caller to report and retry.
    pub fn start(&mut self, device_name: Option<&str>) -> Result<()> {
        if self.is_recording() {
            anyhow::bail!("Recording already in progress");
        }

        let device = find_input_device(device_name)?;
        let supported = device
            .default_input_config()
            .context("Failed to query input device configuration")?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.config();

        self.samples.lock().unwrap().clear();
        self.sample_rate = config.sample_rate;

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, self.samples.clone(), self.level.clone())
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, self.samples.clone(), self.level.clone())
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, self.samples.clone(), self.level.clone())
            }
            format => anyhow::bail!("Unsupported input sample format: {format:?}"),
        }?;

        stream.play().context("Failed to start input stream")?;
        crate::verbose!("Recording at {} Hz", self.sample_rate);

        self.stream = Some(stream);
        self.state = RecordingState::Recording;
        Ok(())
    }

    /// End capture and return the recording.
    ///
    /// Dropping the stream releases the microphone. Returns `None` when
    /// nothing was captured (or when called while idle) so an aborted
    /// recording produces no artifact.
    pub fn stop(&mut self) -> Option<RecordedAudio> {
        if !self.is_recording() {
            return None;
        }

        drop(self.stream.take());
        self.level.set(0.0);
        self.state = RecordingState::Idle;

        let samples = std::mem::take(&mut *self.samples.lock().unwrap());
        if samples.is_empty() {
            crate::verbose!("Recording stopped with no captured samples");
            return None;
        }

        crate::verbose!(
            "Captured {:.1}s of audio",
            samples.len() as f64 / self.sample_rate as f64
        );
        Some(RecordedAudio {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an input stream for any sample type cpal hands us.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
    level: LevelMeter,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels;

    // Stream errors are common on Linux and non-fatal; keep them out of
    // the interactive display.
    let err_fn = |err| {
        crate::verbose!("Audio stream error (non-fatal): {err}");
    };

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let f32_samples: Vec<f32> =
                data.iter().map(|&s| cpal::Sample::from_sample(s)).collect();
            let mono = if channels > 1 {
                downmix_to_mono(&f32_samples, channels)
            } else {
                f32_samples
            };

            level.set(rms(&mono));
            samples.lock().unwrap().extend_from_slice(&mono);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Root-mean-square of a sample block, the meter's level source.
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recorder_is_idle() {
        let recorder = AudioRecorder::new();
        assert_eq!(recorder.state(), RecordingState::Idle);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_stop_while_idle_yields_no_artifact() {
        let mut recorder = AudioRecorder::new();
        assert!(recorder.stop().is_none());
    }

    #[test]
    fn test_rms_of_silence_is_zero() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rms_of_constant_signal() {
        let level = rms(&[0.5, -0.5, 0.5, -0.5]);
        assert!((level - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_level_meter_round_trips() {
        let meter = LevelMeter::new();
        assert_eq!(meter.get(), 0.0);
        meter.set(0.75);
        assert!((meter.get() - 0.75).abs() < f32::EPSILON);
    }
}
