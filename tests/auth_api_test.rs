//! Integration tests for the identity provider client
//!
//! Drives the REST client against a local mock server and checks that
//! provider error codes surface as their enumerated user-facing messages.

use mockito::Matcher;
use vitalis::adapters::auth::IdentityClient;
use vitalis::config::IdentityConfig;
use vitalis::domain::{AuthError, VitalError};

fn config(base_url: &str) -> IdentityConfig {
    let mut config: IdentityConfig = toml::from_str("api_key = \"test-key\"").unwrap();
    config.base_url = base_url.to_string();
    config
}

fn provider_error(code: &str) -> String {
    serde_json::json!({ "error": { "code": 400, "message": code } }).to_string()
}

#[tokio::test]
async fn create_account_returns_a_session() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/accounts:signUp")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJsonString(
            r#"{"email": "new@example.com", "displayName": "New User", "returnSecureToken": true}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "localId": "uid-123",
                "email": "new@example.com",
                "displayName": "New User",
                "idToken": "token-abc",
                "refreshToken": "refresh-abc",
                "expiresIn": "3600"
            }"#,
        )
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    let session = client
        .create_account("new@example.com", "s3cret!", "New User")
        .await
        .unwrap();

    assert_eq!(session.user_id.as_str(), "uid-123");
    assert_eq!(session.display_name.as_deref(), Some("New User"));
    mock.assert_async().await;
}

#[tokio::test]
async fn duplicate_email_maps_to_already_registered() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/accounts:signUp")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(provider_error("EMAIL_EXISTS"))
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    let err = client
        .create_account("dup@example.com", "s3cret!", "Dup")
        .await
        .err()
        .unwrap();

    match err {
        VitalError::Auth(auth) => {
            assert!(matches!(auth, AuthError::EmailAlreadyRegistered));
            assert_eq!(
                auth.user_message(),
                "An account with this email already exists"
            );
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_credentials_map_to_invalid_credentials() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(provider_error("INVALID_LOGIN_CREDENTIALS"))
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    let err = client
        .sign_in("who@example.com", "wrong")
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err,
        VitalError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn rate_limit_code_maps_to_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(provider_error("TOO_MANY_ATTEMPTS_TRY_LATER"))
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    let err = client.sign_in("who@example.com", "pw").await.err().unwrap();

    assert!(matches!(err, VitalError::Auth(AuthError::RateLimited)));
}

#[tokio::test]
async fn password_reset_posts_the_oob_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/accounts:sendOobCode")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJsonString(
            r#"{"requestType": "PASSWORD_RESET", "email": "me@example.com"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"email": "me@example.com"}"#)
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    client.send_password_reset("me@example.com").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn profile_lookup_uses_the_session_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/accounts:signInWithPassword")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"localId": "uid-9", "email": "me@example.com", "idToken": "token-9"}"#,
        )
        .create_async()
        .await;
    server
        .mock("POST", "/accounts:lookup")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJsonString(
            r#"{"idToken": "token-9"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            r#"{"users": [{"localId": "uid-9", "email": "me@example.com", "displayName": "Me"}]}"#,
        )
        .create_async()
        .await;

    let client = IdentityClient::new(config(&server.url())).unwrap();
    let session = client.sign_in("me@example.com", "pw").await.unwrap();
    let profile = client.get_profile(&session).await.unwrap();

    assert_eq!(profile.user_id.as_str(), "uid-9");
    assert_eq!(profile.display_name.as_deref(), Some("Me"));
    client.sign_out(session);
}
