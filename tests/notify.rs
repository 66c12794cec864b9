use datahub_setup::SetupError;
use datahub_setup::model::{Document, Sheet};
use datahub_setup::notify::{collect_recipients, compose, send_over};
use lettre::SmtpTransport;
use lettre::message::Mailbox;

fn contact_document() -> Document {
    Document::from_sheets(vec![
        Sheet::new(
            "General",
            vec!["Field", "Value"],
            vec![vec!["Description", "Test hub"]],
        ),
        Sheet::new(
            "Data_Providers",
            vec!["Name", "Email", "Webin Account"],
            vec![
                vec!["Alice", "alice@example.org", "WEBIN-1"],
                vec!["Bob", "bob@example.org", "WEBIN-2"],
                vec!["Carol", "alice@example.org", "WEBIN-3"],
            ],
        ),
        Sheet::new(
            "Data_Consumers",
            vec!["Name", "Email"],
            vec![
                vec!["Dora", "dora@example.org"],
                vec!["Bob", "bob@example.org"],
                vec!["", ""],
            ],
        ),
    ])
}

#[test]
fn recipients_are_unique_in_first_seen_order() {
    let recipients = collect_recipients(&contact_document());

    assert_eq!(
        recipients,
        ["alice@example.org", "bob@example.org", "dora@example.org"]
    );
}

#[test]
fn sheets_without_contact_column_are_skipped() {
    let document = Document::from_sheets(vec![Sheet::new(
        "General",
        vec!["Field", "Value"],
        vec![vec!["Description", "Test hub"]],
    )]);

    assert!(collect_recipients(&document).is_empty());
}

#[test]
fn message_carries_credentials_in_both_bodies() {
    let message = compose("dcc_test", "pw123");

    assert_eq!(message.subject, "[ENA Data Hubs] dcc_test: Credentials");
    assert!(message.text.contains("Username: dcc_test"));
    assert!(message.text.contains("Password: pw123"));
    assert!(message.html.contains("dcc_test"));
    assert!(message.html.contains("pw123"));
    assert!(message.html.contains("<html>"));
    assert!(message.text.contains("do NOT share"));
}

#[test]
fn unreachable_relay_aborts_before_any_send() {
    // Port 1 on loopback is never listening; the session setup must fail
    // the whole run instead of recording one failure per recipient.
    let mailer = SmtpTransport::builder_dangerous("127.0.0.1").port(1).build();
    let from: Mailbox = "admin@example.org".parse().expect("sender parsed");
    let message = compose("dcc_test", "pw123");
    let recipients = vec![
        "alice@example.org".to_string(),
        "bob@example.org".to_string(),
    ];

    let error =
        send_over(&mailer, &message, &recipients, &from).expect_err("session should not open");
    assert!(matches!(error, SetupError::Smtp(_)));
}
