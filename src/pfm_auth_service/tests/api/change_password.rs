use pfm_auth_adapters::AuthApiError;
use pfm_auth_application::{ChangePasswordError, LoginError, RefreshError};
use pfm_auth_core::UserId;

use crate::helpers::{OTHER_PASSWORD, PASSWORD, TestApp, password, random_email};

#[tokio::test]
async fn change_password_switches_credentials_and_ends_sessions() {
    let app = TestApp::new();
    let email = random_email();
    let session = app.register(&email, PASSWORD).await;

    app.service
        .change_password(session.user.id, password(PASSWORD), password(OTHER_PASSWORD))
        .await
        .unwrap();

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
async fn wrong_old_password_changes_nothing() {
    let app = TestApp::new();
    let email = random_email();
    let session = app.register(&email, PASSWORD).await;

    let error = app
        .service
        .change_password(
            session.user.id,
            password("Wr0ng-Password"),
            password(OTHER_PASSWORD),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ChangePasswordError::WrongOldPassword));
    assert_eq!(
        AuthApiError::from(error).status_code(),
        http::StatusCode::BAD_REQUEST
    );
    assert!(app.service.login(email, password(PASSWORD)).await.is_ok());
}

#[tokio::test]
async fn weak_new_password_is_rejected() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    let result = app
        .service
        .change_password(session.user.id, password(PASSWORD), password("short"))
        .await;

    assert!(matches!(result, Err(ChangePasswordError::WeakPassword(_))));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new();

    let error = app
        .service
        .change_password(UserId::new(), password(PASSWORD), password(OTHER_PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(error, ChangePasswordError::UserNotFound));
    assert_eq!(
        AuthApiError::from(error).status_code(),
        http::StatusCode::NOT_FOUND
    );
}
