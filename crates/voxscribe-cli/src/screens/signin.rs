//! Sign-in screen.
//!
//! Collects credentials and exchanges them for the user's display name.
//! A successful exchange is the only place the session identity gets
//! written; every failure leaves the session untouched and returns to
//! the prompt for a retry.

use anyhow::Result;
use voxscribe_core::{AuthClient, SessionStore};

use crate::ui;

pub enum SignInOutcome {
    SignedIn,
    GoToSignUp,
    Quit,
}

pub async fn run(auth: &AuthClient, session: &SessionStore) -> Result<SignInOutcome> {
    ui::header("Welcome back");

    loop {
        let choice = ui::select(
            "What would you like to do?",
            &["Sign in", "Create an account", "Quit"],
            Some(0),
        )?;

        match choice {
            0 => {
                let email = ui::input("Email")?;
                let password = ui::password("Password")?;

                if email.trim().is_empty() || password.is_empty() {
                    ui::error("Email and password are required");
                    continue;
                }

                ui::status("Signing in...");
                match auth.sign_in(email.trim(), &password).await {
                    Ok(username) => {
                        ui::clear_status();
                        // Sole writer of the session identity.
                        session.set(&username)?;
                        ui::success(&format!("Signed in as {username}"));
                        return Ok(SignInOutcome::SignedIn);
                    }
                    Err(e) => {
                        ui::clear_status();
                        ui::error(&e.to_string());
                    }
                }
            }
            1 => return Ok(SignInOutcome::GoToSignUp),
            _ => return Ok(SignInOutcome::Quit),
        }
    }
}
