//! Authentication flows against the backend.
//!
//! Three endpoints, each a single request/response exchange:
//! - `POST /signin` with `{email, password}` returns `{Username}`
//! - `POST /signup` with `{email, password, name}` returns `{}`
//! - `POST /signout` with no body, success is HTTP 200 exactly
//!
//! Non-2xx responses carrying an `{error}` payload are surfaced
//! verbatim; everything else maps to the [`ApiError`] taxonomy. The
//! client performs no session writes itself.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::{ApiError, body_snippet};
use crate::http::get_http_client;

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    #[serde(rename = "Username")]
    username: String,
}

/// Client for the backend's authentication endpoints.
pub struct AuthClient {
    backend: BackendConfig,
    client: &'static reqwest::Client,
}

impl AuthClient {
    pub fn new(backend: BackendConfig) -> Result<Self> {
        Ok(Self {
            client: get_http_client()?,
            backend,
        })
    }

    /// Exchange credentials for the user's display name.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        crate::verbose!("POST {}", self.backend.endpoint("/signin"));
        let response = self
            .client
            .post(self.backend.endpoint("/signin"))
            .json(&SignInBody { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_failure(status, &body));
        }
        parse_sign_in_body(&body)
    }

    /// Create an account. A 2xx response means created; no identity is
    /// returned and no session is established.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        crate::verbose!("POST {}", self.backend.endpoint("/signup"));
        let response = self
            .client
            .post(self.backend.endpoint("/signup"))
            .json(&SignUpBody {
                email,
                password,
                name,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::from_failure(status, &body));
        }
        Ok(())
    }

    /// End the backend session. Only HTTP 200 counts as signed out;
    /// callers must leave the local session intact on any other status.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        crate::verbose!("POST {}", self.backend.endpoint("/signout"));
        let response = self
            .client
            .post(self.backend.endpoint("/signout"))
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await?;
            return Err(ApiError::from_failure(status, &body));
        }
        Ok(())
    }
}

fn parse_sign_in_body(body: &str) -> Result<String, ApiError> {
    serde_json::from_str::<SignInResponse>(body)
        .map(|r| r.username)
        .map_err(|_| ApiError::InvalidResponse(body_snippet(body)))
}

/// Sign-up form state, validated client-side before any network call.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Check the form. A violation blocks submission entirely: no
    /// request is constructed and no network call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_password_mismatch_blocks_submission() {
        let err = form("Ann", "ann@x.com", "p", "q").validate().unwrap_err();
        assert_eq!(err, "Passwords do not match");
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(form("", "ann@x.com", "p", "p").validate().is_err());
        assert!(form("Ann", "", "p", "p").validate().is_err());
        assert!(form("Ann", "ann@x.com", "", "").validate().is_err());
    }

    #[test]
    fn test_matching_passwords_pass() {
        assert!(form("Ann", "ann@x.com", "p", "p").validate().is_ok());
    }

    #[test]
    fn test_sign_in_body_parses_username() {
        let name = parse_sign_in_body(r#"{"Username":"Ann"}"#).unwrap();
        assert_eq!(name, "Ann");
    }

    #[test]
    fn test_sign_in_body_rejects_other_shapes() {
        assert!(matches!(
            parse_sign_in_body(r#"{"user":"Ann"}"#),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_sign_in_body("Ann"),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
