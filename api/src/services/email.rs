//! Outgoing notification mail.
//!
//! SMTP settings come from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME` and
//! `SMTP_PASSWORD`. Notifications go to `USER_EMAIL`. With no credentials
//! configured every send fails with [`EmailError::NotConfigured`].

use db::models::enquiry;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
};
use once_cell::sync::Lazy;
use thiserror::Error;
use util::config;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email is not configured")]
    NotConfigured,
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Shared SMTP client, built on first use. `None` when credentials are missing
/// or the relay cannot be set up.
static SMTP_CLIENT: Lazy<Option<AsyncSmtpTransport<Tokio1Executor>>> = Lazy::new(|| {
    let username = config::smtp_username();
    let password = config::smtp_password();
    if username.is_empty() || password.is_empty() {
        tracing::warn!("SMTP credentials not set; outgoing email disabled");
        return None;
    }

    let host = config::smtp_host();
    let tls = match TlsParameters::new(host.clone()) {
        Ok(tls) => tls,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create TLS parameters");
            return None;
        }
    };

    match AsyncSmtpTransport::<Tokio1Executor>::relay(&host) {
        Ok(builder) => Some(
            builder
                .port(config::smtp_port())
                .tls(Tls::Required(tls))
                .credentials(Credentials::new(username, password))
                .build(),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create SMTP transport");
            None
        }
    }
});

/// Contact form submission, forwarded by mail only.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html_table(title: &str, rows: &[(&str, String)]) -> String {
    let body: String = rows
        .iter()
        .map(|(k, v)| {
            format!(
                "<tr><td style=\"padding:4px 12px;font-weight:bold\">{}</td><td style=\"padding:4px 12px\">{}</td></tr>",
                escape_html(k),
                escape_html(v)
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <h2>{}</h2>
  <table>{}</table>
</body>
</html>"#,
        escape_html(title),
        body
    )
}

fn plain_table(title: &str, rows: &[(&str, String)]) -> String {
    let mut out = format!("{title}\n\n");
    for (k, v) in rows {
        out.push_str(&format!("{k}: {v}\n"));
    }
    out
}

pub struct EmailService;

impl EmailService {
    /// Sends a plain-text + HTML message through the shared client.
    pub async fn send(
        to: &str,
        reply_to: Option<&str>,
        subject: &str,
        text: String,
        html: String,
    ) -> Result<(), EmailError> {
        let client = SMTP_CLIENT.as_ref().ok_or(EmailError::NotConfigured)?;
        let from_email = config::sender_email();
        if from_email.is_empty() || to.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let from = Mailbox::new(Some(config::email_from_name()), from_email.parse()?);
        let mut builder = Message::builder().from(from).to(to.parse()?).subject(subject);
        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let email = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_PLAIN)
                        .body(text),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(html),
                ),
        )?;

        client.send(email).await?;
        Ok(())
    }

    /// Tells the sales inbox about a new enquiry.
    pub async fn send_enquiry_notification(enquiry: &enquiry::Model) -> Result<(), EmailError> {
        let rows = [
            ("Product", enquiry.product_name.clone()),
            ("Quantity", enquiry.quantity.to_string()),
            ("Email", enquiry.email.clone()),
            ("Mobile", enquiry.mobile_no.clone()),
            ("Country", enquiry.country.clone()),
        ];
        let title = format!("New enquiry for {}", enquiry.product_name);
        Self::send(
            &config::user_email(),
            Some(&enquiry.email),
            &title,
            plain_table(&title, &rows),
            html_table(&title, &rows),
        )
        .await
    }

    /// Forwards a contact form message to the notification inbox.
    pub async fn send_contact_message(msg: &ContactMessage) -> Result<(), EmailError> {
        let subject = msg
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("Contact: {s}"))
            .unwrap_or_else(|| format!("Contact form message from {}", msg.name));
        let rows = [
            ("Name", msg.name.clone()),
            ("Email", msg.email.clone()),
            ("Phone", msg.phone.clone().unwrap_or_else(|| "-".into())),
            ("Message", msg.message.clone()),
        ];
        Self::send(
            &config::user_email(),
            Some(&msg.email),
            &subject,
            plain_table(&subject, &rows),
            html_table(&subject, &rows),
        )
        .await
    }
}
