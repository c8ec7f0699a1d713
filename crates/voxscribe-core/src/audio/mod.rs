//! Audio capture, artifacts, and playback.

mod artifact;
pub mod devices;
mod player;
mod recorder;
mod wav;

pub use artifact::{ArtifactSource, AudioArtifact};
pub use player::AudioPlayer;
pub use recorder::{AudioRecorder, LevelMeter, RecordedAudio, RecordingState};
pub use wav::{DecodedAudio, decode_wav, encode_wav};
