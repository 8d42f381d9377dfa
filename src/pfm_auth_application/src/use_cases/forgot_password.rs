use pfm_auth_core::{Email, EmailClient, SignedToken, TokenSigner, UserStore, UserStoreError};

use crate::responses::{FORGOT_PASSWORD_MESSAGE, MessageResponse};
use crate::side_effect::best_effort;

pub const RESET_EMAIL_SUBJECT: &str = "Reset your password";

/// Forgot password use case - mails a reset link to a registered address
///
/// The response is the same whether or not the address is registered.
pub struct ForgotPasswordUseCase<'a, U, S, E>
where
    U: UserStore,
    S: TokenSigner,
    E: EmailClient,
{
    user_store: &'a U,
    token_signer: &'a S,
    email_client: &'a E,
    password_reset_url: &'a str,
}

impl<'a, U, S, E> ForgotPasswordUseCase<'a, U, S, E>
where
    U: UserStore,
    S: TokenSigner,
    E: EmailClient,
{
    pub fn new(
        user_store: &'a U,
        token_signer: &'a S,
        email_client: &'a E,
        password_reset_url: &'a str,
    ) -> Self {
        Self {
            user_store,
            token_signer,
            email_client,
            password_reset_url,
        }
    }

    /// Execute the forgot password use case
    ///
    /// # Arguments
    /// * `email` - Address the caller claims to own
    ///
    /// # Returns
    /// The generic acknowledgement, always
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> MessageResponse {
        let user = match self.user_store.find_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                tracing::debug!("Password reset requested for unknown email");
                return MessageResponse::new(FORGOT_PASSWORD_MESSAGE);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up user for password reset");
                return MessageResponse::new(FORGOT_PASSWORD_MESSAGE);
            }
        };

        let reset_token = match self.token_signer.issue_reset(user.id, &user.email) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to issue reset token");
                return MessageResponse::new(FORGOT_PASSWORD_MESSAGE);
            }
        };

        let content = format!(
            "Use the link below to reset your password. It expires soon.\n\n{}?token={}",
            self.password_reset_url,
            reset_token.as_str()
        );
        best_effort(
            "send password reset email",
            self.email_client
                .send_email(&user.email, RESET_EMAIL_SUBJECT, &content),
        )
        .await;

        MessageResponse::new(FORGOT_PASSWORD_MESSAGE)
    }
}
