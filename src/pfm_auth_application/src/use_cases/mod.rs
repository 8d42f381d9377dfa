pub mod change_password;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod reset_password;

use pfm_auth_core::Password;

/// Rejection message for a password that fails the strength policy.
pub(crate) fn strength_rejection(password: &Password) -> Option<String> {
    let report = password.strength();
    if report.is_valid {
        return None;
    }
    Some(
        report
            .primary_feedback()
            .unwrap_or("Password is too weak")
            .to_owned(),
    )
}
