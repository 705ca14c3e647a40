mod common;

use linkvault_core::api::{ApiError, NetworkErrorCode, AUTH_HEADER};
use linkvault_core::auth::Credentials;
use linkvault_core::models::{FolderId, FolderUpdate, LinkId, LinkType, NewLink};
use linkvault_core::session::SessionStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_at, client_for, link_json, signed_in, unreachable_base_url};

#[tokio::test]
async fn token_header_follows_session_presence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let api = client_for(&server, session.clone());

    api.list_links().await.unwrap();
    session.set("tok-1").unwrap();
    api.list_links().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get(AUTH_HEADER).is_none());
    assert_eq!(
        requests[1]
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some("tok-1")
    );
}

#[tokio::test]
async fn token_is_attached_to_public_endpoints_too() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(header(AUTH_HEADER, "stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/share/abc"))
        .and(header(AUTH_HEADER, "stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server, signed_in("stale"));
    let response = api
        .sign_in(&Credentials::new("a@b.c", "pw"))
        .await
        .unwrap();
    assert_eq!(response.data.token.as_deref(), Some("fresh"));
    api.fetch_shared_links("abc").await.unwrap();
}

#[tokio::test]
async fn create_link_sends_create_shape_and_returns_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/links"))
        .and(body_json(json!({
            "url": "https://x.com/1",
            "title": "T",
            "type": "Tweet",
            "tags": ["news"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(link_json("l1", "T", None)))
        .mount(&server)
        .await;

    let api = client_for(&server, signed_in("tok"));
    let draft = NewLink::new("https://x.com/1", "T", LinkType::Tweet).with_tags(["news"]);
    let response = api.create_link(&draft.validated().unwrap()).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.data.id, LinkId::new("l1"));
}

#[tokio::test]
async fn delete_and_update_encode_identifiers() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/links/a%20b"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/folders/f1"))
        .and(body_json(json!({ "parent": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "f1",
            "name": "Docs",
            "parent": null
        })))
        .mount(&server)
        .await;

    let api = client_for(&server, signed_in("tok"));
    assert_eq!(api.delete_link(&LinkId::new("a b")).await.unwrap().status, 204);

    let folder = api
        .update_folder(&FolderId::new("f1"), &FolderUpdate::move_to(None))
        .await
        .unwrap()
        .data;
    assert_eq!(folder.parent, None);
}

#[tokio::test]
async fn http_errors_surface_status_code_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/links"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "msg": "Token is not valid", "code": "AUTH" })),
        )
        .mount(&server)
        .await;

    let api = client_for(&server, signed_in("bad"));
    let error = api.list_links().await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Http {
            status: 401,
            code: Some("AUTH".to_string()),
            message: "Token is not valid".to_string(),
        }
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = client_at(&unreachable_base_url(), SessionStore::in_memory());
    let error = api.list_links().await.unwrap_err();

    assert!(error.is_network());
    assert_eq!(error.code(), Some(NetworkErrorCode::ConnectionRefused.as_str()));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = client_for(&server, signed_in("tok"));
    assert!(matches!(
        api.list_folders().await.unwrap_err(),
        ApiError::Decode(_)
    ));
}
