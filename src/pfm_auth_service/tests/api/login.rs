use pfm_auth_adapters::AuthApiError;
use pfm_auth_application::LoginError;

use crate::helpers::{PASSWORD, TestApp, password, random_email};

#[tokio::test]
async fn login_with_correct_credentials_opens_a_new_session() {
    let app = TestApp::new();
    let email = random_email();
    let registered = app.register(&email, PASSWORD).await;

    let session = app.service.login(email, password(PASSWORD)).await.unwrap();

    assert_eq!(session.user.id, registered.user.id);
    assert_ne!(session.tokens.refresh_token, registered.tokens.refresh_token);
    assert_eq!(app.refresh_token_store.len().await, 2);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new();
    let email = random_email();
    app.register(&email, PASSWORD).await;

    let wrong_password = app
        .service
        .login(email, password("Wr0ng-Password"))
        .await
        .unwrap_err();
    let unknown_email = app
        .service
        .login(random_email(), password(PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(wrong_password, LoginError::InvalidCredentials);
    assert_eq!(unknown_email, LoginError::InvalidCredentials);
    assert_eq!(
        AuthApiError::from(wrong_password).to_response(),
        AuthApiError::from(unknown_email).to_response()
    );
}

#[tokio::test]
async fn deactivated_account_is_only_revealed_with_the_right_password() {
    let app = TestApp::new();
    let email = random_email();
    app.register(&email, PASSWORD).await;
    app.deactivate(&email).await;

    let right = app
        .service
        .login(email.clone(), password(PASSWORD))
        .await
        .unwrap_err();
    let wrong = app
        .service
        .login(email, password("Wr0ng-Password"))
        .await
        .unwrap_err();

    assert_eq!(right, LoginError::AccountDeactivated);
    assert_eq!(wrong, LoginError::InvalidCredentials);
}
