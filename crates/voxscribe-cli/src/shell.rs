//! Session-gated screen loop.
//!
//! Before every screen the shell re-reads the observed session value:
//! no identity routes to the auth screens, a present identity routes to
//! the dashboard addressed by that name. The dashboard only reads the
//! identity; a session restored from disk lands there directly.

use anyhow::Result;
use voxscribe_core::{AuthClient, BackendConfig, SessionStore};

use crate::screens::{DashboardOutcome, SignInOutcome, SignUpOutcome, dashboard, signin, signup};

enum AuthScreen {
    SignIn,
    SignUp,
}

pub async fn run(backend: BackendConfig, device: Option<&str>) -> Result<()> {
    let session = SessionStore::load();
    let session_rx = session.subscribe();
    let auth = AuthClient::new(backend.clone())?;

    let mut screen = AuthScreen::SignIn;

    loop {
        let identity = session_rx.borrow().clone();

        if let Some(name) = identity {
            match dashboard::run(&name, &backend, &auth, &session, device).await? {
                DashboardOutcome::SignedOut => {
                    screen = AuthScreen::SignIn;
                    continue;
                }
                DashboardOutcome::Quit => return Ok(()),
            }
        }

        screen = match screen {
            AuthScreen::SignIn => match signin::run(&auth, &session).await? {
                // The store changed; the next pass gates into the dashboard.
                SignInOutcome::SignedIn => continue,
                SignInOutcome::GoToSignUp => AuthScreen::SignUp,
                SignInOutcome::Quit => return Ok(()),
            },
            AuthScreen::SignUp => match signup::run(&auth).await? {
                SignUpOutcome::Created => AuthScreen::SignIn,
                SignUpOutcome::GoToSignIn => AuthScreen::SignIn,
                SignUpOutcome::Quit => return Ok(()),
            },
        };
    }
}
