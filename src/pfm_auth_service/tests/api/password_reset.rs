use pfm_auth_adapters::AuthApiError;
use pfm_auth_application::{
    FORGOT_PASSWORD_MESSAGE, LoginError, PASSWORD_RESET_MESSAGE, RESET_EMAIL_SUBJECT,
    RefreshError, ResetPasswordError,
};
use pfm_auth_core::{ResetToken, SignedToken};

use crate::helpers::{OTHER_PASSWORD, PASSWORD, RESET_URL, TestApp, password, random_email};

#[tokio::test]
async fn forgot_password_sends_a_reset_link_to_known_users() {
    let app = TestApp::new();
    let email = random_email();
    app.register(&email, PASSWORD).await;

    let response = app.service.forgot_password(email.clone()).await;

    assert_eq!(response.message, FORGOT_PASSWORD_MESSAGE);
    let sent = app.emails.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, email.as_str());
    assert_eq!(sent[0].subject, RESET_EMAIL_SUBJECT);
    assert!(sent[0].content.contains(&format!("{RESET_URL}?token=")));
}

#[tokio::test]
async fn forgot_password_for_unknown_email_looks_the_same() {
    let app = TestApp::new();

    let response = app.service.forgot_password(random_email()).await;

    assert_eq!(response.message, FORGOT_PASSWORD_MESSAGE);
    assert!(app.emails.sent().await.is_empty());
}

#[tokio::test]
async fn reset_password_replaces_the_password_and_ends_sessions() {
    let app = TestApp::new();
    let email = random_email();
    let session = app.register(&email, PASSWORD).await;
    app.service.forgot_password(email.clone()).await;
    let reset_token = app.last_reset_token().await;

    let response = app
        .service
        .reset_password(reset_token, password(OTHER_PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.message, PASSWORD_RESET_MESSAGE);
    assert_eq!(
        app.service
            .login(email.clone(), password(PASSWORD))
            .await
            .unwrap_err(),
        LoginError::InvalidCredentials
    );
    assert!(app.service.login(email, password(OTHER_PASSWORD)).await.is_ok());
    assert!(matches!(
        app.service.refresh(session.tokens.refresh_token).await,
        Err(RefreshError::TokenNotFound)
    ));
}

#[tokio::test]
async fn reset_requires_a_reset_token() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    for token in [
        session.tokens.access_token.as_str().to_owned(),
        session.tokens.refresh_token.as_str().to_owned(),
        "garbage".to_owned(),
    ] {
        let error = app
            .service
            .reset_password(ResetToken::from(token), password(OTHER_PASSWORD))
            .await
            .unwrap_err();

        assert!(matches!(error, ResetPasswordError::InvalidOrExpiredToken));
        assert_eq!(
            AuthApiError::from(error).status_code(),
            http::StatusCode::BAD_REQUEST
        );
    }
}

#[tokio::test]
async fn reset_rejects_a_weak_new_password() {
    let app = TestApp::new();
    let email = random_email();
    app.register(&email, PASSWORD).await;
    app.service.forgot_password(email.clone()).await;
    let reset_token = app.last_reset_token().await;

    let result = app
        .service
        .reset_password(reset_token, password("weak"))
        .await;

    assert!(matches!(result, Err(ResetPasswordError::WeakPassword(_))));
    assert!(app.service.login(email, password(PASSWORD)).await.is_ok());
}
