//
//  klog-sdk
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use klog_sdk::{
    CategoryCreateRequest, ClientConfig, CommentCreateRequest, CommentStatus, CommentUpdateRequest, Klog,
    KlogClient, KlogConfig, KlogError, LoginRequest, MediaQueryParams, MediaUploadRequest, MemoryTokenStore,
    PostQueryParams, PostStatus, ProgressCallback, RegisterRequest, RequestOptions, SettingBatchRequest,
    SettingUpsertRequest, SortOrder, Tag, TokenStore, UserUpdateRequest, NETWORK_ERROR_MESSAGE,
};

fn sdk(base_url: &str) -> Klog {
    Klog::new(KlogConfig::new(base_url).token_store(MemoryTokenStore::new())).unwrap()
}

fn credentials() -> LoginRequest {
    LoginRequest {
        login: "ada".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn test_get_returns_unwrapped_data() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":[{"id":1,"name":"go","slug":"go"}]}"#)
        .create_async()
        .await;

    let tags = sdk(&server.url()).tags.list().await.unwrap();

    assert_eq!(
        tags,
        vec![Tag {
            id: 1,
            name: "go".to_string(),
            slug: "go".to_string()
        }]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_structured_error_is_classified() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/tags")
        .with_status(400)
        .with_body(r#"{"success":false,"error":{"code":"INVALID_PARAMS","message":"bad slug"}}"#)
        .create_async()
        .await;

    let client = KlogClient::new(ClientConfig::new(server.url())).unwrap();
    let err = client
        .post::<Value, _>("/api/v1/tags", &json!({"name": "go", "slug": "bad slug"}))
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(!err.is_network_error());
    assert_eq!(err.to_string(), "bad slug");
    assert_eq!(err.code(), Some("INVALID_PARAMS"));
}

#[tokio::test]
async fn test_not_found_and_unstructured_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/posts/99")
        .with_status(404)
        .with_body(r#"{"success":false,"error":{"code":"NOT_FOUND","message":"post not found"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/posts/1")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let sdk = sdk(&server.url());

    let missing = sdk.posts.get(99).await.unwrap_err();
    assert!(missing.is_not_found_error());

    let gateway = sdk.posts.get(1).await.unwrap_err();
    assert!(gateway.is_network_error());
    assert_eq!(gateway.status_code(), Some(502));
    assert_eq!(gateway.to_string(), "Request failed: 502");
}

#[tokio::test]
async fn test_token_expired_hook_fires_once_per_401() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/auth/me")
        .with_status(401)
        .with_body(r#"{"success":false,"error":{"code":"UNAUTHORIZED","message":"token expired"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/settings")
        .with_status(401)
        .create_async()
        .await;

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let sdk = Klog::new(
        KlogConfig::new(server.url())
            .token_store(MemoryTokenStore::with_token("stale"))
            .on_token_expired(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    )
    .unwrap();

    let structured = sdk.auth.me().await.unwrap_err();
    assert!(structured.is_auth_error());
    assert!(matches!(structured, KlogError::Api { .. }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    let bare = sdk.settings.list().await.unwrap_err();
    assert!(bare.is_network_error());
    assert_eq!(bare.status_code(), Some(401));
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    // The hook is advisory; the token is left alone.
    assert_eq!(sdk.token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_delete_tolerates_no_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v1/tags/3")
        .with_status(204)
        .create_async()
        .await;

    let client = KlogClient::new(ClientConfig::new(server.url())).unwrap();
    let result: Option<Value> = client.delete("/api/v1/tags/3").await.unwrap();
    assert!(result.is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_sets_and_logout_clears_bearer_header() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/login")
        .match_body(Matcher::Json(json!({"login": "ada", "password": "secret"})))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"token":"abc123"}}"#)
        .create_async()
        .await;
    let authed = server
        .mock("GET", "/api/v1/tags")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v1/auth/logout")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{}}"#)
        .create_async()
        .await;
    let anonymous = server
        .mock("GET", "/api/v1/tags")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let sdk = Klog::new(KlogConfig::new(server.url()).shared_token_store(store.clone())).unwrap();

    let response = sdk.auth.login(&credentials()).await.unwrap();
    assert_eq!(response.token, "abc123");
    assert!(sdk.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("abc123"));

    sdk.tags.list().await.unwrap();
    authed.assert_async().await;

    sdk.auth.logout().await.unwrap();
    assert!(!sdk.is_authenticated());
    assert!(store.token().is_none());

    sdk.tags.list().await.unwrap();
    anonymous.assert_async().await;
}

#[tokio::test]
async fn test_failed_logout_keeps_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/logout")
        .with_status(500)
        .with_body(r#"{"success":false,"error":{"code":"INTERNAL","message":"boom"}}"#)
        .create_async()
        .await;

    let sdk = Klog::new(KlogConfig::new(server.url()).token_store(MemoryTokenStore::with_token("abc123"))).unwrap();

    assert!(sdk.auth.logout().await.is_err());
    assert_eq!(sdk.token().as_deref(), Some("abc123"));

    sdk.clear_token();
    assert!(!sdk.is_authenticated());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1.
    let sdk = sdk("http://127.0.0.1:1");
    let err = sdk.tags.list().await.unwrap_err();

    assert!(err.is_network_error());
    assert!(!err.is_auth_error());
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_post_list_sends_query_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("status".into(), "published".into()),
            Matcher::UrlEncoded("sortBy".into(), "created_at".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
            Matcher::UrlEncoded("detail".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"total":21,"page":2,"limit":10,"data":[],"next_cursor":"c2"}}"#)
        .create_async()
        .await;

    let params = PostQueryParams {
        page: Some(2),
        status: Some(PostStatus::Published),
        sort_by: Some("created_at".to_string()),
        order: Some(SortOrder::Desc),
        detail: Some(true),
        ..Default::default()
    };
    let page = sdk(&server.url()).posts.list(&params).await.unwrap();

    assert_eq!(page.total, 21);
    assert_eq!(page.total_pages(), 3);
    assert!(page.has_next());
    assert_eq!(page.extra.get("next_cursor"), Some(&json!("c2")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_multipart_upload_reports_progress() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/media/upload")
        .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".to_string()))
        .match_body(Matcher::Regex(r#"name="file"; filename="notes.txt""#.to_string()))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"id":7,"file_name":"notes.txt","file_path":"2024/01/notes.txt",
                "file_hash":"abc","url":"http://cdn/notes.txt","mime_type":"text/plain","size":40960,
                "created_at":"2024-01-01T00:00:00Z"}}"#,
        )
        .create_async()
        .await;

    let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let on_progress: ProgressCallback = Arc::new(move |p: u32| sink.lock().unwrap().push(p));
    let stored = sdk(&server.url())
        .media
        .upload_file(
            "notes.txt",
            "text/plain",
            vec![b'x'; 40 * 1024],
            Some(on_progress),
        )
        .await
        .unwrap();

    assert_eq!(stored.id, 7);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_is_authenticated_follows_token_state() {
    let sdk = sdk("http://localhost:8080");
    assert!(!sdk.is_authenticated());

    sdk.set_token(Some(""));
    assert!(!sdk.is_authenticated());

    sdk.set_token(Some("abc123"));
    assert!(sdk.is_authenticated());

    sdk.set_token(None);
    assert!(!sdk.is_authenticated());

    sdk.set_token(Some("abc123"));
    sdk.clear_token();
    assert!(!sdk.is_authenticated());
}

#[tokio::test]
async fn test_caller_authorization_header_is_replaced_by_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/tags")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .create_async()
        .await;

    let client = KlogClient::new(ClientConfig::new(server.url())).unwrap();
    client.set_token(Some("tok"));
    let options = RequestOptions::new().header("Authorization", "Basic other");
    let tags: Vec<Tag> = client.get_with("/api/v1/tags", &options).await.unwrap();

    assert!(tags.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_category_list_and_create() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/v1/categories")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"id":1,"name":"Engineering","slug":"engineering","description":null}]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v1/categories")
        .match_body(Matcher::Json(json!({"name": "Life", "slug": "life"})))
        .with_status(201)
        .with_body(r#"{"success":true,"data":{"id":2,"name":"Life","slug":"life"}}"#)
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    let categories = sdk.categories.list().await.unwrap();
    assert_eq!(categories[0].slug, "engineering");
    assert_eq!(categories[0].description, None);

    let created = sdk
        .categories
        .create(&CategoryCreateRequest {
            name: "Life".to_string(),
            slug: "life".to_string(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 2);

    list.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_user_get_and_update() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/api/v1/users/5")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"id":5,"username":"ada","email":"a@x.io","nickname":"Ada"}}"#)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/v1/users/5")
        .match_body(Matcher::Json(json!({"bio": "Writes compilers"})))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"id":5,"username":"ada","email":"a@x.io","nickname":"Ada","bio":"Writes compilers"}}"#,
        )
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    let user = sdk.users.get(5).await.unwrap();
    assert_eq!(user.nickname, "Ada");
    assert_eq!(user.avatar_url, None);

    let updated = sdk
        .users
        .update(
            5,
            &UserUpdateRequest {
                bio: Some("Writes compilers".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Writes compilers"));

    get.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn test_comment_routes() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/v1/posts/9/comments")
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":[{"id":1,"post_id":9,"name":"guest","content":"hi",
                "status":"pending","created_at":"2024-01-01T00:00:00Z"}]}"#,
        )
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v1/posts/9/comments")
        .match_body(Matcher::Json(json!({
            "content": "reply",
            "parent_id": 1,
            "name": "guest",
            "email": "g@x.io"
        })))
        .with_status(201)
        .with_body(
            r#"{"success":true,"data":{"id":2,"post_id":9,"name":"guest","content":"reply",
                "status":"pending","parent_id":1,"created_at":"2024-01-02T00:00:00Z"}}"#,
        )
        .create_async()
        .await;
    let moderate = server
        .mock("PUT", "/api/v1/comments/2")
        .match_body(Matcher::Json(json!({"status": "approved"})))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"id":2,"post_id":9,"name":"guest","content":"reply",
                "status":"approved","parent_id":1,"created_at":"2024-01-02T00:00:00Z"}}"#,
        )
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    let comments = sdk.comments.list_for_post(9).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].status, CommentStatus::Pending);

    let reply = sdk
        .comments
        .create(
            9,
            &CommentCreateRequest {
                content: "reply".to_string(),
                parent_id: Some(1),
                name: Some("guest".to_string()),
                email: Some("g@x.io".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(reply.parent_id, Some(1));

    let approved = sdk
        .comments
        .update_status(
            reply.id,
            &CommentUpdateRequest {
                status: CommentStatus::Approved,
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.status, CommentStatus::Approved);

    list.assert_async().await;
    create.assert_async().await;
    moderate.assert_async().await;
}

#[tokio::test]
async fn test_setting_routes() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/v1/settings")
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"key":"site_title","value":"My Blog"}]}"#)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/v1/settings/site_title")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"key":"site_title","value":"My Blog"}}"#)
        .create_async()
        .await;
    let upsert = server
        .mock("PUT", "/api/v1/settings")
        .match_body(Matcher::Json(json!({"key": "posts_per_page", "value": "10"})))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"key":"posts_per_page","value":"10"}}"#)
        .create_async()
        .await;
    let batch = server
        .mock("PUT", "/api/v1/settings/batch")
        .match_body(Matcher::Json(json!({"settings": [
            {"key": "a", "value": "1"},
            {"key": "b", "value": "2"}
        ]})))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"settings":[{"key":"a","value":"1"},{"key":"b","value":"2"}]}}"#,
        )
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v1/settings/site_title")
        .with_status(204)
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    assert_eq!(sdk.settings.list().await.unwrap().len(), 1);
    assert_eq!(sdk.settings.get("site_title").await.unwrap().value, "My Blog");

    let written = sdk
        .settings
        .upsert(&SettingUpsertRequest::new("posts_per_page", "10"))
        .await
        .unwrap();
    assert_eq!(written.value, "10");

    let batch_result = sdk
        .settings
        .batch_upsert(&SettingBatchRequest {
            settings: vec![SettingUpsertRequest::new("a", "1"), SettingUpsertRequest::new("b", "2")],
        })
        .await
        .unwrap();
    assert_eq!(batch_result.settings.len(), 2);

    sdk.settings.delete("site_title").await.unwrap();

    list.assert_async().await;
    get.assert_async().await;
    upsert.assert_async().await;
    batch.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_setting_key_is_inserted_verbatim() {
    let mut server = Server::new_async().await;
    let nested = server
        .mock("GET", "/api/v1/settings/theme/dark")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"key":"theme/dark","value":"on"}}"#)
        .create_async()
        .await;

    let setting = sdk(&server.url()).settings.get("theme/dark").await.unwrap();

    // The slash is not encoded, so the request lands on a nested path.
    assert_eq!(setting.key, "theme/dark");
    nested.assert_async().await;
}

#[tokio::test]
async fn test_media_routes() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/api/v1/media/upload")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "file_name": "a.txt",
            "data": "aGVsbG8=",
            "mime_type": "text/plain"
        })))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"id":3,"file_name":"a.txt","file_path":"2024/01/a.txt",
                "url":"http://cdn/a.txt","mime_type":"text/plain","size":5,
                "created_at":"2024-01-01T00:00:00Z"}}"#,
        )
        .create_async()
        .await;
    let list = server
        .mock("GET", "/api/v1/media")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"success":true,"data":{"total":6,"page":2,"limit":5,"data":[{"id":3,"file_name":"a.txt",
                "file_path":"2024/01/a.txt","mime_type":"text/plain","size":5,
                "created_at":"2024-01-01T00:00:00Z"}]}}"#,
        )
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/v1/media/3")
        .with_status(200)
        .with_body(r#"{"success":true,"data":null}"#)
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    let stored = sdk
        .media
        .upload_base64(&MediaUploadRequest::from_bytes("a.txt", "text/plain", b"hello"))
        .await
        .unwrap();
    assert_eq!(stored.url, "http://cdn/a.txt");

    let page = sdk.media.list(MediaQueryParams { page: 2, limit: 5 }).await.unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.data[0].file_path, "2024/01/a.txt");
    assert!(!page.has_next());

    sdk.media.delete(3).await.unwrap();

    upload.assert_async().await;
    list.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_register_does_not_store_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/auth/register")
        .match_body(Matcher::Json(json!({
            "username": "ada",
            "email": "a@x.io",
            "password": "secret",
            "nickname": "Ada"
        })))
        .with_status(201)
        .with_body(r#"{"success":true,"data":{"id":11,"username":"ada","email":"a@x.io","nickname":"Ada"}}"#)
        .create_async()
        .await;

    let sdk = sdk(&server.url());
    let account = sdk
        .auth
        .register(&RegisterRequest {
            username: "ada".to_string(),
            email: "a@x.io".to_string(),
            password: "secret".to_string(),
            nickname: "Ada".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(account.id, 11);
    assert!(!sdk.is_authenticated());
    mock.assert_async().await;
}

/// Accepts connections and never answers them.
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let base_url = silent_server().await;
    let sdk = Klog::new(
        KlogConfig::new(base_url)
            .token_store(MemoryTokenStore::new())
            .timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let err = sdk.tags.list().await.unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_per_request_timeout_is_network_error() {
    let base_url = silent_server().await;
    let client = KlogClient::new(ClientConfig::new(base_url)).unwrap();
    let options = RequestOptions::new().timeout(Duration::from_millis(100));

    let err = client.get_with::<Value>("/api/v1/tags", &options).await.unwrap_err();

    assert!(err.is_network_error());
    assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
}
