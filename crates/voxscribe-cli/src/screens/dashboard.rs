//! Audio dashboard: record, pick a file, play back, transcribe.
//!
//! Owns the single current audio artifact. Recording or selecting a
//! file replaces it (stopping playback of the old one and clearing the
//! old transcript); transcription requires one to be current, so the
//! action only appears once an artifact exists. A failed transcription
//! leaves the prior transcript untouched.

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use voxscribe_core::{
    AudioArtifact, AudioPlayer, AudioRecorder, AuthClient, BackendConfig, LevelMeter,
    RecordedAudio, SessionStore, transcribe_artifact,
};

use crate::ui;

pub enum DashboardOutcome {
    SignedOut,
    Quit,
}

#[derive(Clone, Copy)]
enum Action {
    Record,
    SelectFile,
    TogglePlayback,
    Transcribe,
    Logout,
    Quit,
}

pub async fn run(
    name: &str,
    backend: &BackendConfig,
    auth: &AuthClient,
    session: &SessionStore,
    device: Option<&str>,
) -> Result<DashboardOutcome> {
    ui::header(&format!("VoxScribe - {name}"));

    let mut recorder = AudioRecorder::new();
    let mut player = AudioPlayer::new();
    let mut current: Option<AudioArtifact> = None;
    let mut transcript: Option<String> = None;

    loop {
        if let Some(artifact) = &current {
            ui::info(&format!("Current audio: {}", artifact.label()));
        }

        let (labels, actions) = build_menu(current.as_ref(), &player);
        let items: Vec<&str> = labels.iter().map(String::as_str).collect();
        let choice = ui::select("What would you like to do?", &items, Some(0))?;

        match actions[choice] {
            Action::Record => match record_clip(&mut recorder, device) {
                Ok(Some(recording)) => {
                    match AudioArtifact::from_recording(&recording) {
                        Ok(artifact) => {
                            replace_artifact(artifact, &mut current, &mut player, &mut transcript);
                            ui::success("Recording saved as the current audio");
                        }
                        Err(e) => ui::error(&e.to_string()),
                    }
                }
                Ok(None) => ui::info("Nothing was captured; keeping the previous audio"),
                Err(e) => ui::error(&e.to_string()),
            },
            Action::SelectFile => {
                let path = ui::input("Path to a WAV file")?;
                if path.trim().is_empty() {
                    continue;
                }
                match AudioArtifact::from_file(Path::new(path.trim())) {
                    Ok(artifact) => {
                        let label = artifact.label().to_string();
                        replace_artifact(artifact, &mut current, &mut player, &mut transcript);
                        ui::success(&format!("Selected {label}"));
                    }
                    Err(e) => ui::error(&e.to_string()),
                }
            }
            Action::TogglePlayback => match player.toggle() {
                Ok(true) => ui::info("Playing..."),
                Ok(false) => ui::info("Paused"),
                Err(e) => ui::error(&e.to_string()),
            },
            Action::Transcribe => {
                let Some(artifact) = &current else {
                    continue;
                };
                ui::status("Transcribing...");
                match transcribe_artifact(backend, artifact).await {
                    Ok(text) => {
                        ui::clear_status();
                        transcript = Some(text);
                        show_transcript(transcript.as_deref());
                    }
                    Err(e) => {
                        // Prior transcript stays; only the error is new.
                        ui::clear_status();
                        ui::error(&format!("Transcription failed: {e}"));
                    }
                }
            }
            Action::Logout => {
                ui::status("Signing out...");
                match auth.sign_out().await {
                    Ok(()) => {
                        ui::clear_status();
                        session.clear()?;
                        ui::success("Signed out");
                        return Ok(DashboardOutcome::SignedOut);
                    }
                    Err(e) => {
                        // Session stays intact on anything but a clean 200.
                        ui::clear_status();
                        ui::error(&format!("Could not sign out: {e}"));
                    }
                }
            }
            Action::Quit => return Ok(DashboardOutcome::Quit),
        }
    }
}

/// Menu entries depend on whether an artifact is current: playback and
/// transcription are only offered when there is something to act on.
fn build_menu(current: Option<&AudioArtifact>, player: &AudioPlayer) -> (Vec<String>, Vec<Action>) {
    let mut labels = vec![
        "Record from microphone".to_string(),
        "Select an audio file".to_string(),
    ];
    let mut actions = vec![Action::Record, Action::SelectFile];

    if let Some(artifact) = current {
        labels.push(if player.is_playing() {
            "Pause playback".to_string()
        } else {
            "Play current audio".to_string()
        });
        actions.push(Action::TogglePlayback);

        labels.push(format!("Transcribe \"{}\"", artifact.label()));
        actions.push(Action::Transcribe);
    }

    labels.push("Log out".to_string());
    actions.push(Action::Logout);
    labels.push("Quit".to_string());
    actions.push(Action::Quit);

    (labels, actions)
}

/// Install a new current artifact: stop playback of the old one, load
/// the new samples, and drop the transcript tied to the old audio.
fn replace_artifact(
    artifact: AudioArtifact,
    current: &mut Option<AudioArtifact>,
    player: &mut AudioPlayer,
    transcript: &mut Option<String>,
) {
    match artifact.decode() {
        Ok(decoded) => {
            ui::info(&format!("Loaded {:.1}s of audio", decoded.duration_secs()));
            player.load(decoded.samples, decoded.sample_rate);
        }
        Err(e) => ui::error(&format!("Playback unavailable: {e}")),
    }
    *transcript = None;
    *current = Some(artifact);
}

/// Capture from the microphone until the user presses Enter, rendering
/// the input level meter while recording.
fn record_clip(recorder: &mut AudioRecorder, device: Option<&str>) -> Result<Option<RecordedAudio>> {
    recorder.start(device)?;
    ui::info("Recording... press Enter to stop");

    let meter = recorder.level_meter();
    let running = Arc::new(AtomicBool::new(true));
    let meter_running = running.clone();
    let meter_thread = std::thread::spawn(move || {
        while meter_running.load(Ordering::Relaxed) {
            draw_meter(&meter);
            std::thread::sleep(Duration::from_millis(100));
        }
    });

    let waited = ui::wait_for_enter();

    running.store(false, Ordering::Relaxed);
    let _ = meter_thread.join();
    clear_meter_line();

    // Release the microphone even if the Enter wait failed.
    if let Err(e) = waited {
        let _ = recorder.stop();
        return Err(e);
    }

    Ok(recorder.stop())
}

const METER_WIDTH: usize = 30;

fn draw_meter(meter: &LevelMeter) {
    // Speech RMS rarely exceeds ~0.25; scale up so the bar moves.
    let level = (meter.get() * 4.0).clamp(0.0, 1.0);
    let filled = (level * METER_WIDTH as f32).round() as usize;
    print!(
        "\r  [{}{}]",
        "#".repeat(filled),
        "-".repeat(METER_WIDTH - filled)
    );
    std::io::stdout().flush().ok();
}

fn clear_meter_line() {
    print!("\r{:width$}\r", "", width = METER_WIDTH + 4);
    std::io::stdout().flush().ok();
}

fn show_transcript(transcript: Option<&str>) {
    if let Some(text) = transcript {
        println!();
        ui::success("Transcript:");
        println!("  {text}");
        println!();
    }
}
