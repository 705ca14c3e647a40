use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::util::compact_text;

/// Connection-level failure code, mirroring the codes browsers and Node report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorCode {
    ConnectionRefused,
    TimedOut,
    Other,
}

impl NetworkErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::TimedOut => "ETIMEDOUT",
            Self::Other => "ERR_NETWORK",
        }
    }
}

impl std::fmt::Display for NetworkErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error ({code}): {message}")]
    Network {
        code: NetworkErrorCode,
        message: String,
    },
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error code as reported by the transport or the backend body.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Network { code, .. } => Some(code.as_str()),
            Self::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let (code, message) = parse_error_body(status, body);
        Self::Http {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Self::Decode(error.to_string());
        }
        if error.is_builder() {
            return Self::InvalidConfiguration(error.to_string());
        }
        let code = if error.is_timeout() {
            NetworkErrorCode::TimedOut
        } else if error.is_connect() {
            NetworkErrorCode::ConnectionRefused
        } else {
            NetworkErrorCode::Other
        };
        Self::Network {
            code,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
    code: Option<serde_json::Value>,
}

fn parse_error_body(status: StatusCode, body: &str) -> (Option<String>, String) {
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        let code = payload.code.and_then(|code| match code {
            serde_json::Value::String(code) => Some(code),
            serde_json::Value::Number(code) => Some(code.to_string()),
            _ => None,
        });
        if let Some(message) = payload.msg.or(payload.message).or(payload.error) {
            return (code, compact_text(&message));
        }
        if code.is_some() {
            return (code, format!("HTTP {}", status.as_u16()));
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        (None, format!("HTTP {}", status.as_u16()))
    } else {
        (None, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_error_body_populates_code_and_message() {
        let error = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"msg":"Token is not valid","code":"AUTH_INVALID"}"#,
        );
        assert_eq!(
            error,
            ApiError::Http {
                status: 401,
                code: Some("AUTH_INVALID".to_string()),
                message: "Token is not valid".to_string(),
            }
        );
        assert_eq!(error.status(), Some(401));
        assert_eq!(error.code(), Some("AUTH_INVALID"));
    }

    #[test]
    fn plain_text_and_empty_bodies_fall_back() {
        let text = ApiError::from_response(StatusCode::BAD_GATEWAY, " upstream down ");
        assert_eq!(text.to_string(), "HTTP 502: upstream down");

        let empty = ApiError::from_response(StatusCode::NOT_FOUND, "");
        assert_eq!(empty.to_string(), "HTTP 404: HTTP 404");
        assert!(!empty.is_network());
    }

    #[test]
    fn network_codes_render_like_transport_codes() {
        assert_eq!(NetworkErrorCode::ConnectionRefused.as_str(), "ECONNREFUSED");
        let error = ApiError::Network {
            code: NetworkErrorCode::ConnectionRefused,
            message: "connection refused".to_string(),
        };
        assert!(error.is_network());
        assert_eq!(error.code(), Some("ECONNREFUSED"));
        assert_eq!(error.status(), None);
    }
}
