use missive::message::Message;
use missive::transport::stub::StubTransport;
use missive::Transport;

fn email() -> Message {
    Message::builder()
        .from("user@example.com".parse().unwrap())
        .to("root@example.com".parse().unwrap())
        .subject("Hello stub")
        .body(String::from("Hello stub"))
        .unwrap()
}

#[test]
fn stub_transport_ok() {
    let sender = StubTransport::new_ok();

    sender.send(&email()).unwrap();

    let messages = sender.messages();
    assert_eq!(messages.len(), 1);

    let (envelope, raw) = &messages[0];
    assert_eq!(envelope.from().unwrap().to_string(), "user@example.com");
    assert_eq!(envelope.to()[0].to_string(), "root@example.com");

    let raw = String::from_utf8(raw.clone()).unwrap();
    assert!(raw.contains("Subject: Hello stub\r\n"));
    assert!(raw.ends_with("Hello stub"));
}

#[test]
fn stub_transport_error() {
    let sender = StubTransport::new_error();

    let result = sender.send(&email());

    assert!(result.is_err());
    assert_eq!(sender.messages().len(), 1);
}
