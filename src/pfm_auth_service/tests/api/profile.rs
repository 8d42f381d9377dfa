use pfm_auth_application::{ProfileError, UpdateProfileRequest};
use pfm_auth_core::UserId;

use crate::helpers::{PASSWORD, TestApp, random_email};

#[tokio::test]
async fn profile_reflects_registration() {
    let app = TestApp::new();
    let email = random_email();
    let session = app.register(&email, PASSWORD).await;

    let profile = app.service.get_profile(session.user.id).await.unwrap();

    assert_eq!(profile, session.user);
}

#[tokio::test]
async fn update_profile_changes_only_the_given_names() {
    let app = TestApp::new();
    let session = app.register(&random_email(), PASSWORD).await;

    let profile = app
        .service
        .update_profile(
            session.user.id,
            UpdateProfileRequest {
                first_name: None,
                last_name: Some("Murray Hopper".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(profile.first_name, "Grace");
    assert_eq!(profile.last_name, "Murray Hopper");
    assert_eq!(profile.full_name, "Grace Murray Hopper");
}

#[tokio::test]
async fn profile_of_unknown_user_is_not_found() {
    let app = TestApp::new();

    let result = app.service.get_profile(UserId::new()).await;

    assert!(matches!(result, Err(ProfileError::UserNotFound)));
}
