use pfm_auth_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Delivers mail through the Postmark `/email` endpoint.
///
/// Callers hand over plain text. It is sent as `TextBody` unchanged and an
/// HTML rendition with clickable links goes out as `HtmlBody`.
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    fn endpoint(&self) -> Result<Url, String> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join("/email"))
            .map_err(|e| format!("Invalid Postmark base url: {e}"))
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "PostmarkEmailClient::send_email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let html_body = render_html(content);
        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject,
            html_body: &html_body,
            text_body: content,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint()?)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| format!("Postmark request failed: {e}"))?;

        response
            .error_for_status()
            .map_err(|e| format!("Postmark rejected the message: {e}"))?;

        Ok(())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

/// Blank lines separate paragraphs, single newlines become `<br>` and
/// http(s) URLs become links. Everything else is escaped.
fn render_html(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph.lines().map(render_line).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect()
}

fn render_line(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            let escaped = escape_html(word);
            if word.starts_with("https://") || word.starts_with("http://") {
                format!(r#"<a href="{escaped}">{escaped}</a>"#)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
