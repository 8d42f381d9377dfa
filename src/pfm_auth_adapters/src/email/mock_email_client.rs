use pfm_auth_core::{Email, EmailClient};

/// Accepts every message and delivers nothing. For local runs without a mail
/// provider.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    #[tracing::instrument(name = "Discarding email", skip_all)]
    async fn send_email(
        &self,
        _recipient: &Email,
        subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "Email not delivered by mock client");
        Ok(())
    }
}
