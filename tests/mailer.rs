use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use missive::mailer::{Error, Mailer, ADDRESS_VAR, SECRET_VAR};
use missive::transport::stub::StubTransport;

fn mailer() -> Mailer<StubTransport> {
    Mailer::builder()
        .credentials("user@example.com", "secret")
        .build_with_transport(StubTransport::new_ok())
        .unwrap()
}

fn body_of(message: &missive::Message) -> String {
    String::from_utf8(message.formatted()).unwrap()
}

#[test]
fn initialization_requires_both_fields() {
    let empty: HashMap<String, String> = HashMap::new();

    assert!(Mailer::builder()
        .credentials("user@example.com", "secret")
        .build_with_transport(StubTransport::new_ok())
        .is_ok());

    let err = Mailer::builder()
        .credentials("", "secret")
        .config(empty.clone())
        .build_with_transport(StubTransport::new_ok())
        .unwrap_err();
    assert!(matches!(err, Error::Credentials(_)));
    assert!(err.to_string().contains(ADDRESS_VAR));

    let err = Mailer::builder()
        .credentials("user@example.com", "")
        .config(empty)
        .build_with_transport(StubTransport::new_ok())
        .unwrap_err();
    assert!(matches!(err, Error::Credentials(_)));
    assert!(err.to_string().contains(SECRET_VAR));
}

#[test]
fn provider_backed_credentials() {
    let mut provider = HashMap::new();
    provider.insert(ADDRESS_VAR.to_owned(), "env@example.com".to_owned());
    provider.insert(SECRET_VAR.to_owned(), "env-secret".to_owned());

    let mailer = Mailer::builder()
        .config(provider)
        .build_with_transport(StubTransport::new_ok())
        .unwrap();
    assert_eq!(mailer.sender().to_string(), "env@example.com");
}

#[test]
fn to_header_joins_recipients() {
    let mailer = mailer();

    let message = mailer
        .compose(
            &["a@example.com", "b@example.com", "c@example.com"],
            "Test",
            "hello",
            false,
            &[],
        )
        .unwrap();

    let raw = body_of(&message);
    assert!(raw.contains("To: a@example.com, b@example.com, c@example.com\r\n"));
    assert_eq!(message.envelope().to().len(), 3);
}

#[test]
fn empty_recipient_list_composes() {
    let mailer = mailer();

    let message = mailer.compose(&[], "Test", "hello", false, &[]).unwrap();

    assert!(body_of(&message).contains("To: \r\n"));
    assert!(message.envelope().to().is_empty());
}

#[test]
fn plain_body_is_tagged_text_plain() {
    let mailer = mailer();

    let message = mailer
        .compose(&["a@example.com"], "Test", "hello", false, &[])
        .unwrap();

    let raw = body_of(&message);
    assert!(raw.contains("Content-Type: text/plain; charset=utf-8\r\n"));
    assert!(!raw.contains("text/html"));
    assert!(raw.contains("\r\n\r\nhello\r\n"));
}

#[test]
fn html_body_is_tagged_text_html() {
    let mailer = mailer();

    let html = "<h1>Hello!</h1>";
    let message = mailer
        .compose(&["a@example.com"], "Test", html, true, &[])
        .unwrap();

    let raw = body_of(&message);
    assert!(raw.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(raw.contains("\r\n\r\n<h1>Hello!</h1>\r\n"));
}

#[test]
fn missing_attachment_is_skipped() {
    let mailer = mailer();

    let message = mailer
        .compose(
            &["a@example.com"],
            "Test",
            "hello",
            false,
            &[Path::new("definitely/does/not/exist.pdf")],
        )
        .unwrap();

    assert!(!body_of(&message).contains("Content-Disposition: attachment"));
}

#[test]
fn text_attachment_content_and_filename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let content = "int main() { return 0; }";
    fs::File::create(&path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();

    let mailer = mailer();
    let message = mailer
        .compose(&["a@example.com"], "Test", "hello", false, &[path.as_path()])
        .unwrap();

    let raw = body_of(&message);
    assert!(raw.contains("Content-Disposition: attachment; filename=\"notes.txt\"\r\n"));
    assert!(raw.contains("Content-Type: application/octet-stream\r\n"));
    // ASCII content travels untouched
    assert!(raw.contains(content));
}

#[test]
fn binary_attachment_content_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, [0u8, 1, 2]).unwrap();

    let mailer = mailer();
    let message = mailer
        .compose(&["a@example.com"], "Test", "hello", false, &[path.as_path()])
        .unwrap();

    let raw = body_of(&message);
    assert!(raw.contains("Content-Disposition: attachment; filename=\"blob.bin\"\r\n"));
    assert!(raw.contains("Content-Transfer-Encoding: base64\r\n"));
    // [0, 1, 2] in base64
    assert!(raw.contains("\r\n\r\nAAEC\r\n"));
}

#[test]
fn send_through_accepting_transport() {
    let transport = StubTransport::new_ok();
    let mailer = Mailer::builder()
        .credentials("user@example.com", "secret")
        .build_with_transport(transport.clone())
        .unwrap();

    mailer
        .send(&["a@example.com"], "Test", "hello", false, &[])
        .unwrap();

    let messages = transport.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0.from().unwrap().to_string(), "user@example.com");
    assert_eq!(messages[0].0.to()[0].to_string(), "a@example.com");
}

#[test]
fn send_through_failing_transport() {
    let mailer = Mailer::builder()
        .credentials("user@example.com", "secret")
        .build_with_transport(StubTransport::new_error())
        .unwrap();

    let err = mailer
        .send(&["a@example.com"], "Test", "hello", false, &[])
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.to_string().is_empty());
}
