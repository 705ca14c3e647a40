//! REST client for the LinkVault backend.
//!
//! One method per backend resource. Every request carries the session token
//! in the `x-auth-token` header whenever the session store holds one, public
//! endpoints included. Failures are returned as-is: no retry, no backoff and
//! no timeout beyond the transport default.

mod error;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiResult, NetworkErrorCode};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::models::{Folder, FolderId, FolderUpdate, Link, LinkId, NewFolder, NewLink};
use crate::session::SessionStore;

pub const AUTH_HEADER: &str = "x-auth-token";

/// Parsed body of a successful response plus its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

/// Body of `/auth/signup` and `/auth/signin` responses.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TokenResponse")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Body of `POST /share/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    #[serde(rename = "shareLink")]
    pub share_link: String,
}

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionStore) -> ApiResult<Self> {
        Ok(Self {
            config,
            client: Client::builder().build()?,
            session,
        })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> ApiResult<ApiResponse<TokenResponse>> {
        self.send_json(self.request(Method::POST, "/auth/signup").json(credentials))
            .await
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<ApiResponse<TokenResponse>> {
        self.send_json(self.request(Method::POST, "/auth/signin").json(credentials))
            .await
    }

    pub async fn list_links(&self) -> ApiResult<ApiResponse<Vec<Link>>> {
        self.send_json(self.request(Method::GET, "/links")).await
    }

    pub async fn create_link(&self, link: &NewLink) -> ApiResult<ApiResponse<Link>> {
        self.send_json(self.request(Method::POST, "/links").json(link))
            .await
    }

    pub async fn delete_link(&self, id: &LinkId) -> ApiResult<ApiResponse<()>> {
        let path = format!("/links/{}", urlencoding::encode(id.as_str()));
        self.send_ack(self.request(Method::DELETE, &path)).await
    }

    pub async fn list_folders(&self) -> ApiResult<ApiResponse<Vec<Folder>>> {
        self.send_json(self.request(Method::GET, "/folders")).await
    }

    pub async fn create_folder(&self, folder: &NewFolder) -> ApiResult<ApiResponse<Folder>> {
        self.send_json(self.request(Method::POST, "/folders").json(folder))
            .await
    }

    pub async fn update_folder(
        &self,
        id: &FolderId,
        update: &FolderUpdate,
    ) -> ApiResult<ApiResponse<Folder>> {
        let path = format!("/folders/{}", urlencoding::encode(id.as_str()));
        self.send_json(self.request(Method::PUT, &path).json(update))
            .await
    }

    pub async fn delete_folder(&self, id: &FolderId) -> ApiResult<ApiResponse<()>> {
        let path = format!("/folders/{}", urlencoding::encode(id.as_str()));
        self.send_ack(self.request(Method::DELETE, &path)).await
    }

    pub async fn generate_share(&self) -> ApiResult<ApiResponse<ShareResponse>> {
        self.send_json(self.request(Method::POST, "/share/generate"))
            .await
    }

    pub async fn fetch_shared_links(&self, token: &str) -> ApiResult<ApiResponse<Vec<Link>>> {
        let path = format!("/share/{}", urlencoding::encode(token.trim()));
        self.send_json(self.request(Method::GET, &path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!(method = %method, url = %url, "Dispatching API request");

        let request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match self.session.token() {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        let body = response.bytes().await?;
        Ok(ApiResponse {
            status: status.as_u16(),
            data: serde_json::from_slice(&body)?,
        })
    }

    async fn send_ack(&self, request: RequestBuilder) -> ApiResult<ApiResponse<()>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        Ok(ApiResponse {
            status: status.as_u16(),
            data: (),
        })
    }
}
