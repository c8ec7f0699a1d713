//! Interactive prompt helpers using dialoguer
//!
//! Provides themed, consistent prompts for all screens.

use anyhow::Result;
use console::style;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use std::io::Write;

/// Get the shared theme for all prompts
fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Select from a list of options with arrow keys
pub fn select(prompt: &str, items: &[&str], default: Option<usize>) -> Result<usize> {
    let theme = theme();
    let mut select = Select::with_theme(&theme).with_prompt(prompt).items(items);

    if let Some(idx) = default {
        select = select.default(idx);
    }

    Ok(select.interact()?)
}

/// Get text input
pub fn input(prompt: &str) -> Result<String> {
    let theme = theme();
    Ok(Input::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

/// Get password/secret input (hidden)
pub fn password(prompt: &str) -> Result<String> {
    let theme = theme();
    Ok(Password::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

/// Print a styled header
pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
    println!();
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}

/// Print an in-progress status line (no newline)
pub fn status(text: &str) {
    print!("{} ", style(text).dim());
    std::io::stdout().flush().ok();
}

/// Clear a pending status line
pub fn clear_status() {
    println!();
}

/// Block until the user presses Enter, without echoing keystrokes
pub fn wait_for_enter() -> Result<()> {
    std::io::stdout().flush()?;

    enable_raw_mode()?;
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.code == KeyCode::Enter {
                break;
            }
        }
    }
    disable_raw_mode()?;

    Ok(())
}
