use pfm_auth_application::RefreshError;
use pfm_auth_core::{RefreshToken, SignedToken, TokenError, TokenKind};

use crate::helpers::{PASSWORD, TestApp, random_email};

#[tokio::test]
async fn refresh_rotates_the_pair() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    let rotated = app
        .service
        .refresh(session.tokens.refresh_token.clone())
        .await
        .unwrap();

    assert_ne!(rotated.refresh_token, session.tokens.refresh_token);
    let claims = app.service.authenticate(&rotated.access_token).unwrap();
    assert_eq!(claims.user_id, session.user.id);
}

#[tokio::test]
async fn a_refresh_token_can_only_be_used_once() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    app.service
        .refresh(session.tokens.refresh_token.clone())
        .await
        .unwrap();
    let replay = app.service.refresh(session.tokens.refresh_token).await;

    assert!(matches!(replay, Err(RefreshError::TokenNotFound)));
}

#[tokio::test]
async fn rotated_token_keeps_working() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    let first = app
        .service
        .refresh(session.tokens.refresh_token)
        .await
        .unwrap();
    let second = app.service.refresh(first.refresh_token).await;

    assert!(second.is_ok());
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    let result = app
        .service
        .refresh(RefreshToken::from(
            session.tokens.access_token.as_str().to_owned(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(RefreshError::InvalidToken(TokenError::WrongKind {
            expected: TokenKind::Refresh,
            found: TokenKind::Access,
        }))
    ));
}

#[tokio::test]
async fn garbage_refresh_token_is_invalid() {
    let app = TestApp::new();

    let result = app
        .service
        .refresh(RefreshToken::from("not-a-jwt".to_owned()))
        .await;

    assert!(matches!(
        result,
        Err(RefreshError::InvalidToken(TokenError::Malformed))
    ));
}

#[tokio::test]
async fn deactivated_user_cannot_refresh() {
    let app = TestApp::new();
    let email = random_email();
    let session = app.register(&email, PASSWORD).await;
    app.deactivate(&email).await;

    let result = app.service.refresh(session.tokens.refresh_token).await;

    assert!(matches!(result, Err(RefreshError::AccountDeactivated)));
}
