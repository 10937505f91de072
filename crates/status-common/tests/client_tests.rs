mod fixtures;

use fixtures::{Frame, MemoryPage, RecordingTransport};
use status_common::client::{close_for_teardown, FeedEvent, Handled, StatusClient};
use status_common::config::FeedConfig;
use status_common::render::MessageOutcome;
use status_common::types::{ConnectionState, Status};
use status_common::FeedError;

fn open_client(domains: &[&str]) -> StatusClient<RecordingTransport, MemoryPage> {
    let mut client = StatusClient::new(
        RecordingTransport::default(),
        MemoryPage::with_sites(domains),
        FeedConfig::default(),
    );
    client.handle(FeedEvent::Opened).unwrap();
    client
}

fn message(raw: &str) -> FeedEvent {
    FeedEvent::Message(raw.to_string())
}

#[test]
fn starts_connecting_then_opens() {
    let mut client = StatusClient::new(
        RecordingTransport::default(),
        MemoryPage::default(),
        FeedConfig::default(),
    );
    assert_eq!(client.state(), ConnectionState::Connecting);
    let handled = client.handle(FeedEvent::Opened).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Open));
    assert!(client.transport().frames().is_empty());
}

#[test]
fn example_record_marks_element_ok() {
    let mut client = open_client(&["example.com", "other.com"]);
    let handled = client
        .handle(message(r#"{"domain":"example.com","ok":true}"#))
        .unwrap();
    assert_eq!(
        handled,
        Handled::Message(MessageOutcome::Updated {
            domain: "example.com".into(),
            status: Status::Ok,
        })
    );
    assert_eq!(client.document().status_of("example.com"), Some(Status::Ok));
    assert_eq!(client.document().status_of("other.com"), None);
}

#[test]
fn missing_domain_is_a_quiet_no_op() {
    let mut client = open_client(&["example.com"]);
    let handled = client
        .handle(message(r#"{"domain":"missing.com","ok":false}"#))
        .unwrap();
    assert_eq!(
        handled,
        Handled::Message(MessageOutcome::Unmatched {
            domain: "missing.com".into()
        })
    );
    assert_eq!(client.document().writes, 0);
}

#[test]
fn messages_are_never_acknowledged() {
    let mut client = open_client(&["example.com"]);
    client
        .handle(message(r#"{"domain":"example.com","ok":false}"#))
        .unwrap();
    assert!(client.transport().frames().is_empty());
}

#[test]
fn decode_failure_does_not_stop_the_client() {
    let mut client = open_client(&["example.com"]);
    let err = client.handle(message("<html>")).unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
    assert_eq!(client.document().writes, 0);

    client
        .handle(message(r#"{"domain":"example.com","ok":false}"#))
        .unwrap();
    assert_eq!(client.document().status_of("example.com"), Some(Status::Ko));
}

#[test]
fn latest_update_per_domain_wins() {
    let mut client = open_client(&["a.com", "b.com"]);
    for raw in [
        r#"{"domain":"a.com","ok":false}"#,
        r#"{"domain":"b.com","ok":false}"#,
        r#"{"domain":"a.com","ok":true}"#,
    ] {
        client.handle(message(raw)).unwrap();
    }
    assert_eq!(client.document().status_of("a.com"), Some(Status::Ok));
    assert_eq!(client.document().status_of("b.com"), Some(Status::Ko));
}

#[test]
fn close_control_uses_transport_defaults() {
    let mut client = open_client(&["example.com"]);
    let handled = client.handle(FeedEvent::CloseRequested).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Closing));
    assert_eq!(client.transport().frames(), vec![Frame::Close(None)]);
}

#[test]
fn no_messages_processed_after_close_control() {
    let mut client = open_client(&["example.com"]);
    client.handle(FeedEvent::CloseRequested).unwrap();

    let handled = client
        .handle(message(r#"{"domain":"example.com","ok":true}"#))
        .unwrap();
    assert_eq!(handled, Handled::Message(MessageOutcome::Ignored));
    assert_eq!(client.document().status_of("example.com"), None);

    client
        .handle(FeedEvent::Closed {
            code: 1005,
            reason: String::new(),
            was_clean: true,
        })
        .unwrap();
    assert_eq!(client.state(), ConnectionState::Closed);
    let handled = client
        .handle(message(r#"{"domain":"example.com","ok":true}"#))
        .unwrap();
    assert_eq!(handled, Handled::Message(MessageOutcome::Ignored));
}

#[test]
fn double_close_is_passed_to_the_transport() {
    let mut client = open_client(&[]);
    client.handle(FeedEvent::CloseRequested).unwrap();
    client.handle(FeedEvent::CloseRequested).unwrap();
    assert_eq!(
        client.transport().frames(),
        vec![Frame::Close(None), Frame::Close(None)]
    );
}

#[test]
fn send_control_sends_one_test_frame() {
    let mut client = open_client(&[]);
    let handled = client.handle(FeedEvent::SendRequested).unwrap();
    assert_eq!(handled, Handled::Sent);
    assert_eq!(
        client.transport().frames(),
        vec![Frame::Text("test".into())]
    );
}

#[test]
fn send_after_close_reports_transport_error() {
    let mut client = open_client(&[]);
    client.handle(FeedEvent::CloseRequested).unwrap();
    let err = client.handle(FeedEvent::SendRequested).unwrap_err();
    assert!(matches!(err, FeedError::Transport(_)));
}

#[test]
fn teardown_uses_configured_code_and_reason() {
    let mut client = StatusClient::new(
        RecordingTransport::default(),
        MemoryPage::default(),
        FeedConfig::default().with_close_reason("page unload"),
    );
    client.handle(FeedEvent::Opened).unwrap();
    client.handle(FeedEvent::Teardown).unwrap();
    assert_eq!(
        client.transport().frames(),
        vec![Frame::Close(Some((1000, "page unload".into())))]
    );
    assert_eq!(client.state(), ConnectionState::Closing);
}

#[test]
fn close_for_teardown_defaults_to_normal_closure() {
    let transport = RecordingTransport::default();
    close_for_teardown(&transport, &FeedConfig::default()).unwrap();
    assert_eq!(
        transport.frames(),
        vec![Frame::Close(Some((1000, "test".into())))]
    );
}

#[test]
fn transport_error_keeps_state() {
    let mut client = open_client(&[]);
    let handled = client.handle(FeedEvent::Errored).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Open));
}

#[test]
fn closed_is_terminal() {
    let mut client = open_client(&[]);
    client
        .handle(FeedEvent::Closed {
            code: 1006,
            reason: String::new(),
            was_clean: false,
        })
        .unwrap();
    let handled = client.handle(FeedEvent::CloseRequested).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Closed));
}

#[test]
fn late_open_does_not_undo_close_control() {
    let mut client = StatusClient::new(
        RecordingTransport::default(),
        MemoryPage::with_sites(&["example.com"]),
        FeedConfig::default(),
    );
    client.handle(FeedEvent::CloseRequested).unwrap();

    let handled = client.handle(FeedEvent::Opened).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Closing));

    let handled = client
        .handle(message(r#"{"domain":"example.com","ok":true}"#))
        .unwrap();
    assert_eq!(handled, Handled::Message(MessageOutcome::Ignored));
    assert_eq!(client.document().status_of("example.com"), None);
}

#[test]
fn late_open_does_not_undo_teardown() {
    let mut client = open_client(&["example.com"]);
    client.handle(FeedEvent::Teardown).unwrap();
    client.handle(FeedEvent::Opened).unwrap();
    assert_eq!(client.state(), ConnectionState::Closing);

    let handled = client
        .handle(message(r#"{"domain":"example.com","ok":false}"#))
        .unwrap();
    assert_eq!(handled, Handled::Message(MessageOutcome::Ignored));
}

#[test]
fn repeated_open_keeps_client_open() {
    let mut client = open_client(&[]);
    let handled = client.handle(FeedEvent::Opened).unwrap();
    assert_eq!(handled, Handled::StateChanged(ConnectionState::Open));
}
