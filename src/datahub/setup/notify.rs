//! Credential notification: collects contact addresses from the setup
//! spreadsheet, composes the data hub credentials message, and sends one
//! copy per recipient over a single authenticated SMTP session.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info, instrument, warn};

use crate::datahub::setup::error::Result;
use crate::datahub::setup::model::Document;

/// Column holding contact addresses; sheets without it carry no contacts
/// and are skipped.
pub const EMAIL_COLUMN: &str = "Email";

/// Fixed mail-relay endpoint; credentials are supplied at runtime and the
/// connection is TLS-wrapped from the first byte.
const SMTP_RELAY: &str = "smtp.gmail.com";

/// Collects every contact address across all sheets, deduplicated,
/// preserving first-seen order. Sheets without an [`EMAIL_COLUMN`] column
/// are tolerated and skipped.
pub fn collect_recipients(document: &Document) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    for sheet in document.sheets() {
        let Some(values) = sheet.column(EMAIL_COLUMN) else {
            debug!(sheet = %sheet.name, "sheet has no contact column; skipped");
            continue;
        };
        for value in values {
            if !recipients.iter().any(|existing| existing == value) {
                recipients.push(value.to_string());
            }
        }
    }
    recipients
}

/// The credentials message: one subject with parallel plain-text and HTML
/// bodies. The same message is re-addressed to every recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Composes the credentials message for a data hub. The hub name doubles
/// as the login username; name and password appear in clear text, followed
/// by the fixed disclaimer and archive footer.
pub fn compose(hub: &str, password: &str) -> CredentialsMessage {
    let subject = format!("[ENA Data Hubs] {hub}: Credentials");
    let text = format!(
        "Username: {hub}\n\
         Password: {password}\n\
         \n\
         Please keep these credentials safe and do NOT share with others.\n\
         European Nucleotide Archive (ENA)\n\
         EMBL-EBI\n"
    );
    let html = format!(
        r#"<html>
    <body>
        <p>Username: {hub}<br>
        Password: {password}</p><br>
        <i><p style="font-size:12px; font-color:#6b6b6b">Please keep these credentials safe and do <b>NOT</b> share with others.</p>
        <p style="font-size:12px; font-color:#6b6b6b"><a href="https://www.ebi.ac.uk/ena/browser/home">European Nucleotide Archive (ENA)</a><br>
        EMBL-EBI</p></i>
    </body>
</html>"#
    );
    CredentialsMessage {
        subject,
        text,
        html,
    }
}

/// Per-recipient outcome of one notification run.
#[derive(Debug, Default)]
pub struct SendReport {
    /// Recipients whose copy was accepted by the relay.
    pub sent: Vec<String>,
    /// Recipients whose copy failed, with the transport error text.
    pub failed: Vec<(String, String)>,
}

impl SendReport {
    pub fn all_sent(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends one copy of the message to every recipient over a single
/// authenticated SMTP session.
#[instrument(level = "info", skip_all, fields(recipient_count = recipients.len()))]
pub fn send(
    message: &CredentialsMessage,
    recipients: &[String],
    sender: &str,
    port: u16,
    password: &str,
) -> Result<SendReport> {
    let from: Mailbox = sender.parse()?;
    let mailer = SmtpTransport::relay(SMTP_RELAY)?
        .port(port)
        .credentials(SmtpCredentials::new(
            sender.to_string(),
            password.to_string(),
        ))
        .build();
    send_over(&mailer, message, recipients, &from)
}

/// Runs the per-recipient send loop over an already-configured transport.
///
/// The session is established up front, so a failed handshake or login
/// aborts the whole run before any recipient is attempted; the pooled
/// connection is then reused for every send. A failed send does not abort
/// the remaining recipients; each failure is recorded in the returned
/// [`SendReport`] and the caller decides the exit status.
pub fn send_over(
    mailer: &SmtpTransport,
    message: &CredentialsMessage,
    recipients: &[String],
    from: &Mailbox,
) -> Result<SendReport> {
    mailer.test_connection()?;

    let mut report = SendReport::default();
    for recipient in recipients {
        match deliver(mailer, from, recipient, message) {
            Ok(()) => {
                info!(recipient = %recipient, "credential email sent");
                report.sent.push(recipient.clone());
            }
            Err(error) => {
                warn!(recipient = %recipient, %error, "credential email not delivered");
                report.failed.push((recipient.clone(), error.to_string()));
            }
        }
    }
    Ok(report)
}

fn deliver(
    mailer: &SmtpTransport,
    from: &Mailbox,
    recipient: &str,
    message: &CredentialsMessage,
) -> Result<()> {
    let email = Message::builder()
        .from(from.clone())
        .to(recipient.parse()?)
        .subject(message.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            message.text.clone(),
            message.html.clone(),
        ))?;
    mailer.send(&email)?;
    Ok(())
}
