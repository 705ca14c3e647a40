#![allow(dead_code)]

use linkvault_core::api::ApiClient;
use linkvault_core::config::ClientConfig;
use linkvault_core::session::SessionStore;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const APP_ORIGIN: &str = "http://localhost:3000";

pub fn client_for(server: &MockServer, session: SessionStore) -> ApiClient {
    client_at(&format!("{}/api", server.uri()), session)
}

pub fn client_at(base_url: &str, session: SessionStore) -> ApiClient {
    let config = ClientConfig::new(base_url, APP_ORIGIN).unwrap();
    ApiClient::new(config, session).unwrap()
}

pub fn signed_in(token: &str) -> SessionStore {
    let session = SessionStore::in_memory();
    session.set(token).unwrap();
    session
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

pub fn link_json(id: &str, title: &str, folder: Option<&str>) -> Value {
    json!({
        "_id": id,
        "url": format!("https://example.com/{id}"),
        "title": title,
        "type": "Article",
        "tags": [],
        "folder": folder,
    })
}

pub fn folder_json(id: &str, name: &str, parent: Option<&str>) -> Value {
    json!({ "_id": id, "name": name, "parent": parent })
}

pub fn ids(links: &[linkvault_core::Link]) -> Vec<String> {
    links.iter().map(|link| link.id.to_string()).collect()
}
