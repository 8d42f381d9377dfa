use pfm_auth_application::RefreshError;

use crate::helpers::{PASSWORD, TestApp, password, random_email};

#[tokio::test]
async fn logout_revokes_every_session_of_the_user() {
    let app = TestApp::new();
    let email = random_email();
    let first = app.register(&email, PASSWORD).await;
    let second = app.service.login(email, password(PASSWORD)).await.unwrap();

    app.service.logout(first.user.id).await.unwrap();

    for token in [first.tokens.refresh_token, second.tokens.refresh_token] {
        let result = app.service.refresh(token).await;
        assert!(matches!(result, Err(RefreshError::TokenNotFound)));
    }
}

#[tokio::test]
async fn logout_leaves_other_users_alone() {
    let app = TestApp::new();
    let leaving = app.register(&random_email(), PASSWORD).await;
    let staying = app.register(&random_email(), PASSWORD).await;

    app.service.logout(leaving.user.id).await.unwrap();

    assert!(app.service.refresh(staying.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    app.service.logout(session.user.id).await.unwrap();

    assert!(app.service.logout(session.user.id).await.is_ok());
}

#[tokio::test]
async fn access_token_stays_valid_after_logout() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    app.service.logout(session.user.id).await.unwrap();

    assert!(app.service.authenticate(&session.tokens.access_token).is_ok());
}
