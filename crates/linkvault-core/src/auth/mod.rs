//! Sign-up, sign-in and sign-out flows on top of the session store.

use std::fmt;

use serde::Serialize;

use crate::api::{ApiClient, ApiError, TokenResponse};
use crate::error::{Error, Result};
use crate::feedback::{self, TransientMessage};

pub const SIGN_IN_SUCCESS: &str = "Signed in successfully!";
pub const SIGN_IN_FAILURE: &str = "Signin failed. Please check your credentials.";
pub const SIGN_UP_SUCCESS: &str = "Account created successfully!";
pub const SIGN_UP_FAILURE: &str = "Signup failed. Please try again.";

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn validated(&self) -> Result<Self> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::InvalidInput("Email is required".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(Error::InvalidInput("Password is required".to_string()));
        }
        Ok(Self {
            email: email.to_string(),
            password: self.password.clone(),
            name: crate::util::normalize_text_option(self.name.clone()),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The backend returned a token and the session now holds it.
    SignedIn,
    /// The account exists but the user still has to sign in.
    AccountCreated,
}

/// Result of an auth action: what happened plus the message to show.
#[derive(Debug)]
pub struct AuthReport<T> {
    pub result: Result<T>,
    pub message: TransientMessage,
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> AuthReport<SignUpOutcome> {
        let result = self.try_sign_up(credentials).await;
        let message = match &result {
            Ok(_) => TransientMessage::success(SIGN_UP_SUCCESS),
            Err(error) => feedback::failure_message(error, SIGN_UP_FAILURE),
        };
        AuthReport { result, message }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> AuthReport<()> {
        let result = self.try_sign_in(credentials).await;
        let message = match &result {
            Ok(()) => TransientMessage::success(SIGN_IN_SUCCESS),
            Err(error) => feedback::failure_message(error, SIGN_IN_FAILURE),
        };
        AuthReport { result, message }
    }

    /// Drop the held token. The backend keeps no server-side session.
    pub fn sign_out(&self) -> Result<()> {
        self.api.session().clear()?;
        Ok(())
    }

    async fn try_sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome> {
        let credentials = credentials.validated()?;
        let response = self.api.sign_up(&credentials).await.inspect_err(|error| {
            log_auth_failure("signup", error);
        })?;
        match non_empty_token(response.data) {
            Some(token) => {
                self.api.session().set(&token)?;
                Ok(SignUpOutcome::SignedIn)
            }
            None => Ok(SignUpOutcome::AccountCreated),
        }
    }

    async fn try_sign_in(&self, credentials: &Credentials) -> Result<()> {
        let credentials = credentials.validated()?;
        let response = self.api.sign_in(&credentials).await.inspect_err(|error| {
            log_auth_failure("signin", error);
        })?;
        let token = non_empty_token(response.data).ok_or_else(|| {
            ApiError::Decode("Sign-in response did not include a token".to_string())
        })?;
        self.api.session().set(&token)?;
        Ok(())
    }
}

fn non_empty_token(response: TokenResponse) -> Option<String> {
    response
        .token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn log_auth_failure(action: &str, error: &ApiError) {
    tracing::warn!(
        action,
        status = error.status(),
        code = error.code(),
        "Auth request failed: {}",
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("a@b.c", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_require_email_and_password() {
        assert!(Credentials::new(" ", "pw").validated().is_err());
        assert!(Credentials::new("a@b.c", "  ").validated().is_err());
        let ok = Credentials::new(" a@b.c ", "pw").validated().unwrap();
        assert_eq!(ok.email, "a@b.c");
    }

    #[test]
    fn blank_tokens_are_ignored() {
        assert_eq!(
            non_empty_token(TokenResponse {
                token: Some("  ".to_string())
            }),
            None
        );
        assert_eq!(
            non_empty_token(TokenResponse {
                token: Some("t".to_string())
            })
            .as_deref(),
            Some("t")
        );
    }
}
