//! Share link generation.

use url::Url;

use crate::api::{ApiClient, ApiError};
use crate::error::{Error, Result};
use crate::routes::Route;

/// Public read-only URL for the signed-in user's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: Url,
    pub token: String,
}

impl ShareLink {
    /// Parse the backend's `shareLink` value.
    ///
    /// Relative values (`/shared/abc`) are resolved against `app_origin`.
    pub fn parse(raw: &str, app_origin: &Url) -> Result<Self> {
        let raw = raw.trim();
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => app_origin
                .join(raw)
                .map_err(|error| invalid_share_link(&error.to_string()))?,
            Err(error) => return Err(invalid_share_link(&error.to_string())),
        };
        let token = share_token(&url).ok_or_else(|| invalid_share_link("missing share token"))?;
        Ok(Self { url, token })
    }
}

impl std::fmt::Display for ShareLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Token embedded in a share URL.
///
/// Prefers the `/shared/:token` route and falls back to the last path
/// segment for backends that mount the page elsewhere.
pub fn share_token(url: &Url) -> Option<String> {
    if let Some(Route::Shared { token }) = Route::parse(url.path()) {
        return Some(token);
    }
    let segment = url.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    urlencoding::decode(segment)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn invalid_share_link(reason: &str) -> Error {
    Error::Api(ApiError::Decode(format!("Invalid share link: {reason}")))
}

/// Mints share links through the backend. Holds no previous link.
#[derive(Clone)]
pub struct ShareLinkGenerator {
    api: ApiClient,
}

impl ShareLinkGenerator {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Request a new share token. Each call may return a different link.
    pub async fn generate(&self) -> Result<ShareLink> {
        let response = self.api.generate_share().await?;
        ShareLink::parse(&response.data.share_link, &self.api.config().app_origin)
    }
}
