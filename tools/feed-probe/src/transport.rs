use status_common::client::FeedTransport;
use status_common::FeedError;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Queues outbound frames for the writer task owning the socket sink.
#[derive(Clone, Debug)]
pub struct ProbeTransport {
    tx: UnboundedSender<Message>,
}

impl ProbeTransport {
    pub fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    fn push(&self, msg: Message) -> Result<(), FeedError> {
        self.tx
            .send(msg)
            .map_err(|_| FeedError::Transport("socket writer has stopped".into()))
    }
}

impl FeedTransport for ProbeTransport {
    fn send_text(&self, text: &str) -> Result<(), FeedError> {
        self.push(Message::text(text))
    }

    fn close(&self) -> Result<(), FeedError> {
        self.push(Message::Close(None))
    }

    fn close_with(&self, code: u16, reason: &str) -> Result<(), FeedError> {
        self.push(Message::Close(Some(CloseFrame {
            code: CloseCode::from(code),
            reason: reason.to_owned().into(),
        })))
    }
}
