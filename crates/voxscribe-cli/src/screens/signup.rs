//! Sign-up screen.
//!
//! Collects the registration form and validates it locally first: a
//! password/confirm mismatch (or empty field) is reported inline and no
//! request is sent. On success the user is routed to sign-in; creating
//! an account does not establish a session.

use anyhow::Result;
use voxscribe_core::{AuthClient, SignUpForm};

use crate::ui;

pub enum SignUpOutcome {
    Created,
    GoToSignIn,
    Quit,
}

pub async fn run(auth: &AuthClient) -> Result<SignUpOutcome> {
    ui::header("Create your account");

    loop {
        let choice = ui::select(
            "What would you like to do?",
            &["Sign up", "Back to sign in", "Quit"],
            Some(0),
        )?;

        match choice {
            0 => {
                let form = SignUpForm {
                    name: ui::input("Name")?,
                    email: ui::input("Email")?,
                    password: ui::password("Password")?,
                    confirm_password: ui::password("Confirm password")?,
                };

                // Validation failures never reach the network.
                if let Err(message) = form.validate() {
                    ui::error(&message);
                    continue;
                }

                ui::status("Creating account...");
                match auth
                    .sign_up(form.name.trim(), form.email.trim(), &form.password)
                    .await
                {
                    Ok(()) => {
                        ui::clear_status();
                        ui::success("Account created. Sign in to continue.");
                        return Ok(SignUpOutcome::Created);
                    }
                    Err(e) => {
                        ui::clear_status();
                        ui::error(&e.to_string());
                    }
                }
            }
            1 => return Ok(SignUpOutcome::GoToSignIn),
            _ => return Ok(SignUpOutcome::Quit),
        }
    }
}
