use clap::Parser;
use futures::{SinkExt, StreamExt};
use status_common::client::{FeedEvent, Handled, StatusClient};
use status_common::config::FeedConfig;
use status_common::render::MessageOutcome;
use status_common::FeedError;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing_subscriber::EnvFilter;

mod board;
mod exit;
mod transport;

use board::SiteBoard;
use exit::ExitPlan;
use transport::ProbeTransport;

#[derive(Parser)]
#[command(name = "feed-probe")]
#[command(about = "Watch a chouf status feed from the terminal")]
struct Cli {
    /// Feed endpoint (default: ws://localhost:3003/ws)
    #[arg(long, short, env = "CHOUF_FEED_URL")]
    url: Option<String>,

    /// Only track these domains; without it every domain is shown
    #[arg(long = "site", short = 's')]
    sites: Vec<String>,

    /// Send the "test" message once connected
    #[arg(long)]
    send_test: bool,

    /// Exit after this many applied updates
    #[arg(long, short = 'n')]
    count: Option<usize>,

    /// Close reason sent when the probe leaves
    #[arg(long)]
    close_reason: Option<String>,

    /// Verbose logging
    #[arg(long, short, env = "CHOUF_DEBUG")]
    debug: bool,
}

type Client = StatusClient<ProbeTransport, SiteBoard>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = FeedConfig::default();
    if let Some(url) = cli.url.as_deref() {
        config = config.with_url(url)?;
    }
    if let Some(reason) = cli.close_reason {
        config = config.with_close_reason(reason);
    }

    let url = config.url();
    tracing::info!("Connecting to {}", url);
    let (ws, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
    let (mut write, mut read) = ws.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if let Err(e) = write.send(msg).await {
                tracing::warn!("Failed to write to status feed: {}", e);
                break;
            }
            if closing {
                break;
            }
        }
    });

    let mut client: Client = StatusClient::new(
        ProbeTransport::new(out_tx),
        SiteBoard::new(&cli.sites),
        config,
    );
    report(client.handle(FeedEvent::Opened));

    if cli.send_test {
        report(client.handle(FeedEvent::SendRequested));
    }

    let mut plan = ExitPlan::new(cli.count);
    if plan.record(false) {
        report(client.handle(FeedEvent::Teardown));
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                if !plan.interrupt() {
                    tracing::info!("Interrupted again, not waiting for the server");
                    break;
                }
                tracing::info!("Interrupted, closing status feed");
                report(client.handle(FeedEvent::Teardown));
            }
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let updated = report(client.handle(FeedEvent::Message(text.as_str().to_owned())));
                    if plan.record(updated) {
                        report(client.handle(FeedEvent::Teardown));
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (u16::from(f.code), f.reason.as_str().to_owned()))
                        .unwrap_or((1005, String::new()));
                    report(client.handle(FeedEvent::Closed { code, reason, was_clean: true }));
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("Status feed read failed: {}", e);
                    report(client.handle(FeedEvent::Errored));
                    break;
                }
                None => {
                    report(client.handle(FeedEvent::Closed {
                        code: 1006,
                        reason: String::new(),
                        // Stream ending after our own close is the expected shutdown
                        was_clean: plan.closing(),
                    }));
                    break;
                }
            }
        }
    }

    print_summary(&client);
    drop(client);
    writer.await?;
    Ok(())
}

/// Log the outcome of one event. Returns true when a site marker was written.
fn report(result: Result<Handled, FeedError>) -> bool {
    match result {
        Ok(Handled::Message(MessageOutcome::Updated { domain, status })) => {
            println!("{} {}", domain, status);
            true
        }
        Ok(Handled::Message(MessageOutcome::Unmatched { domain })) => {
            tracing::debug!("Ignoring untracked domain {}", domain);
            false
        }
        Ok(Handled::Sent) => {
            tracing::info!("Test message sent");
            false
        }
        Ok(_) => false,
        Err(FeedError::Decode(e)) => {
            eprintln!("undecodable status message: {}", e);
            false
        }
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

fn print_summary(client: &Client) {
    tracing::info!("Connection {}", client.state().as_str());
    for (domain, status) in client.document().rows() {
        let marker = status.map(|s| s.as_str()).unwrap_or("-");
        tracing::info!("{:<40} {}", domain, marker);
    }
}
