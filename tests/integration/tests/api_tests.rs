//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Google is replaced by a local mock started per test server.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, cookie_value, fixtures::*,
    mock_google::MOCK_CHANNELS, Session, TestServer, FRONTEND_URL,
};
use reqwest::StatusCode;

async fn synced_session(server: &TestServer) -> Session {
    let session = server.login().await.unwrap();
    let response = server
        .get_youtube("/api/v1/subscribe/info", session.access_token())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    session
}

async fn list(server: &TestServer, session: &Session, query: &str) -> PageResponse<SubscriptionItem> {
    let response = server
        .get_auth(&format!("/api/v1/subscribe/list{query}"), session.access_token())
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn create_group(server: &TestServer, session: &Session, title: &str) -> GroupResponse {
    let response = server
        .post_auth(
            "/api/v1/subscribe/groups",
            session.access_token(),
            &CreateGroupRequest::titled(title),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health-check").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health-check/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_google_login_creates_one_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let first = server.login().await.unwrap();
    assert_eq!(first.auth.user.email, server.google.email);
    assert_eq!(first.auth.user.first_name, "Test");
    assert_eq!(first.auth.user.role, "user");
    assert!(!first.access_token().is_empty());
    assert!(first.auth.google_access_token.is_some());
    assert!(first.google_cookie.is_some());

    // Same Google account signs in again
    let second = server.login().await.unwrap();
    assert_eq!(second.auth.user.id, first.auth.user.id);

    let response = server
        .get_auth("/api/v1/user/profile", second.access_token())
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!profile.is_public);
}

#[tokio::test]
async fn test_google_error_redirects() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(
            "/api/v1/user/auth/login/google",
            &serde_json::json!({ "error": "access_denied" }),
        )
        .await
        .unwrap();

    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["redirect"], format!("{FRONTEND_URL}?error=access_denied"));
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    let response = server
        .with_cookie(server.get_builder("/api/v1/user/auth/token"), "refresh", &session.refresh_cookie)
        .await
        .unwrap();
    let rotated = cookie_value(&response, "refresh").expect("rotated cookie");
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, session.auth.user.id);
    assert_ne!(rotated, session.refresh_cookie);

    // The old token was revoked
    let response = server
        .with_cookie(server.get_builder("/api/v1/user/auth/token"), "refresh", &session.refresh_cookie)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/user/auth/token").await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Refresh token is missing");
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    let response = server
        .with_cookie(server.delete_builder("/api/v1/user/auth/token"), "refresh", &session.refresh_cookie)
        .await
        .unwrap();
    assert_eq!(cookie_value(&response, "refresh").as_deref(), Some(""));
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .with_cookie(server.get_builder("/api/v1/user/auth/token"), "refresh", &session.refresh_cookie)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_private_routes_require_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/user/info").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_only_creators_publish() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    let response = server
        .patch_auth(
            "/api/v1/user/profile",
            session.access_token(),
            &serde_json::json!({ "is_public": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/user/custom-links",
            session.access_token(),
            &serde_json::json!({ "name": "Blog", "url": "https://blog.example.com" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_sync_is_throttled() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    let response = server
        .get_youtube("/api/v1/subscribe/info", session.access_token())
        .await
        .unwrap();
    let first: SyncResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(first.is_data_synced);
    assert_eq!(first.subscriptions_count, MOCK_CHANNELS.len() as i64);
    assert!(first.last_sync_date.is_some());

    let response = server
        .get_youtube("/api/v1/subscribe/info", session.access_token())
        .await
        .unwrap();
    let second: SyncResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!second.is_data_synced);
    assert_eq!(second.subscriptions_count, first.subscriptions_count);

    assert_eq!(server.google.subscription_calls(), 1);
}

#[tokio::test]
async fn test_sync_requires_google_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    let response = server
        .get_auth("/api/v1/subscribe/info", session.access_token())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "X-Google-Token header is missing");
}

#[tokio::test]
async fn test_list_pagination_and_ordering() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = synced_session(&server).await;

    let page = list(&server, &session, "?page_size=1&ordering=-title").await;
    assert_eq!(page.count, 2);
    assert_eq!(page.next, Some(2));
    assert_eq!(page.previous, None);
    assert_eq!(page.results[0].title, "Beta Channel");

    let page = list(&server, &session, "?page=2&page_size=1&ordering=-title").await;
    assert_eq!(page.next, None);
    assert_eq!(page.previous, Some(1));
    assert_eq!(page.results[0].title, "Alpha Channel");

    let page = list(&server, &session, "?search=ALPHA").await;
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].channel_id, "UC-alpha");
}

#[tokio::test]
async fn test_enrich_attaches_latest_upload() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = synced_session(&server).await;

    let response = server
        .get_youtube("/api/v1/subscribe/enrich", session.access_token())
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["is_data_synced"], true);

    let page = list(&server, &session, "?search=alpha").await;
    let upload = page.results[0].upload.as_ref().expect("upload");
    assert_eq!(upload.video_url, "https://www.youtube.com/watch?v=vid-UU-UC-alpha");
    assert_eq!(upload.title, "Latest upload vid-UU-UC-alpha");
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_group_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = synced_session(&server).await;
    let token = session.access_token();

    let music = create_group(&server, &session, "Music").await;
    let tech = create_group(&server, &session, "Tech").await;
    let alpha = list(&server, &session, "?search=alpha").await.results.remove(0);

    let add = AddSubscriptionRequest {
        subscription_id: alpha.id.clone(),
    };

    let response = server
        .post_auth(&format!("/api/v1/subscribe/groups/{}/add-subscription", music.id), token, &add)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Already there
    let response = server
        .post_auth(&format!("/api/v1/subscribe/groups/{}/add-subscription", music.id), token, &add)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Failed to add subscription to a group.");

    // Moving leaves exactly one group
    let response = server
        .post_auth(&format!("/api/v1/subscribe/groups/{}/add-subscription", tech.id), token, &add)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let in_tech = list(&server, &session, &format!("?group={}", tech.id)).await;
    assert_eq!(in_tech.count, 1);
    assert_eq!(in_tech.results[0].group.as_ref().map(|g| g.title.as_str()), Some("Tech"));
    assert_eq!(list(&server, &session, &format!("?group={}", music.id)).await.count, 0);
    assert_eq!(list(&server, &session, "?group=ungroup").await.count, 1);

    let path = format!("/api/v1/subscribe/groups/remove-subscription/{}", alpha.id);
    let response = server.delete_auth(&path, token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&path, token).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Subscription does not belong to any group associated with the user.");
}

#[tokio::test]
async fn test_group_limits_and_duplicates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();

    create_group(&server, &session, "Group 0").await;
    let response = server
        .post_auth(
            "/api/v1/subscribe/groups",
            session.access_token(),
            &CreateGroupRequest::titled("Group 0"),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "A group with this combination of fields already exists.");

    for i in 1..15 {
        create_group(&server, &session, &format!("Group {i}")).await;
    }

    let response = server
        .post_auth(
            "/api/v1/subscribe/groups",
            session.access_token(),
            &CreateGroupRequest::titled("One too many"),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "You can create up to 15 groups.");
}

#[tokio::test]
async fn test_foreign_group_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let owner_server = TestServer::start().await.expect("Failed to start server");
    let owner = owner_server.login().await.unwrap();
    let group = create_group(&owner_server, &owner, "Private").await;

    let other_server = TestServer::start().await.expect("Failed to start server");
    let other = other_server.login().await.unwrap();

    let response = other_server
        .get_auth(&format!("/api/v1/subscribe/groups/{}", group.id), other.access_token())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Share Link Tests
// ============================================================================

#[tokio::test]
async fn test_share_link_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = synced_session(&server).await;
    let token = session.access_token();

    let group = create_group(&server, &session, "Shared").await;
    let alpha = list(&server, &session, "?search=alpha").await.results.remove(0);
    let response = server
        .post_auth(
            &format!("/api/v1/subscribe/groups/{}/add-subscription", group.id),
            token,
            &AddSubscriptionRequest {
                subscription_id: alpha.id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/subscribe/share/group-link?group_id={}&path=/shared", group.id),
            token,
        )
        .await
        .unwrap();
    let link: ShareLinkResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(link.link.starts_with("/shared?token="));
    let share_token = link.token().expect("token").to_string();

    // Anonymous reads
    let response = server
        .get(&format!("/api/v1/subscribe/share/subscriptions?token={share_token}"))
        .await
        .unwrap();
    let shared: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0]["channel_id"], "UC-alpha");

    let response = server
        .get(&format!("/api/v1/subscribe/share/group-info?token={share_token}"))
        .await
        .unwrap();
    let info: SharedGroupInfoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(info.group.id, group.id);
    assert_eq!(info.owner.first_name, "Test");
    assert!(info.expiration_date > 0);

    let response = server
        .get("/api/v1/subscribe/share/group-info?token=tampered")
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "Invalid token");
}

#[tokio::test]
async fn test_share_empty_group() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = server.login().await.unwrap();
    let group = create_group(&server, &session, "Empty").await;

    let response = server
        .get_auth(
            &format!("/api/v1/subscribe/share/group-link?group_id={}&path=/s", group.id),
            session.access_token(),
        )
        .await
        .unwrap();
    let link: ShareLinkResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!(
            "/api/v1/subscribe/share/subscriptions?token={}",
            link.token().expect("token")
        ))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Failed to fetch group or no subscriptions found.");
}
