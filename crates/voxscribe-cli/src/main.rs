mod args;
mod screens;
mod shell;
mod ui;

use anyhow::Result;
use clap::Parser;
use voxscribe_core::{BackendConfig, Settings, set_verbose};

use crate::args::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    set_verbose(args.verbose);

    match args.command {
        Some(Command::Devices) => list_devices(),
        Some(Command::Config {
            backend_url,
            device,
            show,
        }) => update_config(backend_url, device, show),
        None => {
            let settings = Settings::load();
            let backend = BackendConfig::resolve(args.backend_url.as_deref(), &settings)?;
            let device = args.device.or(settings.microphone_device);
            shell::run(backend, device.as_deref()).await
        }
    }
}

fn list_devices() -> Result<()> {
    let devices = voxscribe_core::audio::devices::list_input_devices()?;
    println!("Available input devices:");
    for device in devices {
        if device.is_default {
            println!("  {} (default)", device.name);
        } else {
            println!("  {}", device.name);
        }
    }
    Ok(())
}

fn update_config(backend_url: Option<String>, device: Option<String>, show: bool) -> Result<()> {
    let mut settings = Settings::load();
    let mut changed = false;

    if let Some(url) = backend_url {
        // Validate before persisting so a bad URL can't stick.
        let backend = BackendConfig::new(&url)?;
        settings.backend_url = Some(backend.base_url().to_string());
        changed = true;
    }
    if let Some(name) = device {
        settings.microphone_device = Some(name);
        changed = true;
    }

    if changed {
        settings.save()?;
        ui::success("Configuration saved");
    }

    if show || !changed {
        println!(
            "backend_url: {}",
            settings.backend_url.as_deref().unwrap_or("(not set)")
        );
        println!(
            "microphone_device: {}",
            settings.microphone_device.as_deref().unwrap_or("(default)")
        );
    }

    Ok(())
}
