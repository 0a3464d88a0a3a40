//! IRC session - connect, register, join, listen

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use irc::client::data::Config as ClientConfig;
use irc::client::{Client, ClientStream};
use tokio::sync::mpsc;

use super::message::{split_lines, to_event};
use crate::application::errors::IrcError;
use crate::application::messaging::{EventDispatcher, IrcAction};
use crate::domain::entities::{IrcEvent, WebhookPayload};
use crate::domain::traits::{ChatSender, IrcSender};
use crate::infrastructure::config::IrcConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Joined,
    Listening,
}

#[derive(Debug)]
struct OutboundLine {
    channel: String,
    text: String,
}

/// Cloneable write side of the session. Lines are queued until the session
/// has joined its channel, so sends never block and survive reconnects.
#[derive(Clone)]
pub struct IrcHandle {
    tx: mpsc::UnboundedSender<OutboundLine>,
}

impl IrcSender for IrcHandle {
    fn send(&self, channel: &str, text: &str) {
        for text in split_lines(text) {
            let line = OutboundLine {
                channel: channel.to_string(),
                text,
            };
            if self.tx.send(line).is_err() {
                tracing::debug!("IRC session gone, dropping line");
                return;
            }
        }
    }
}

/// A connected client and its incoming message stream
pub struct Connection {
    client: Client,
    stream: ClientStream,
}

pub struct IrcSession {
    config: IrcConfig,
    dispatcher: EventDispatcher,
    chat: Arc<dyn ChatSender>,
    handle: IrcHandle,
    outbound: mpsc::UnboundedReceiver<OutboundLine>,
    state: SessionState,
}

impl IrcSession {
    pub fn new(config: IrcConfig, slack_channel: impl Into<String>, chat: Arc<dyn ChatSender>) -> Self {
        let (tx, outbound) = mpsc::unbounded_channel();
        Self {
            dispatcher: EventDispatcher::new(config.channel.clone(), slack_channel),
            config,
            chat,
            handle: IrcHandle { tx },
            outbound,
            state: SessionState::Disconnected,
        }
    }

    pub fn handle(&self) -> IrcHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Open the connection and queue the registration burst. Nothing is
    /// written until the connection is driven by `listen`.
    pub async fn connect(&mut self) -> Result<Connection, IrcError> {
        self.state = SessionState::Connecting;
        tracing::info!("Connecting to {} (tls: {})", self.config.address(), self.config.secure);

        match self.open().await {
            Ok(conn) => {
                self.state = SessionState::Connected;
                Ok(conn)
            }
            Err(e) => {
                self.state = SessionState::Disconnected;
                Err(e)
            }
        }
    }

    async fn open(&self) -> Result<Connection, IrcError> {
        let address = self.config.address();
        let mut client = tokio::time::timeout(CONNECT_TIMEOUT, Client::from_config(self.client_config()))
            .await
            .map_err(|_| IrcError::Connect(address.clone(), "timed out".to_string()))?
            .map_err(|e| IrcError::Connect(address, e.to_string()))?;

        client.identify()?;
        let stream = client.stream()?;
        Ok(Connection { client, stream })
    }

    fn client_config(&self) -> ClientConfig {
        let nick = &self.config.nick;
        let password = &self.config.password;

        ClientConfig {
            nickname: Some(nick.clone()),
            alt_nicks: (1..=3).map(|n| format!("{}{}", nick, "_".repeat(n))).collect(),
            username: Some(nick.clone()),
            realname: Some(nick.clone()),
            server: Some(self.config.host.clone()),
            port: Some(self.config.port),
            password: (!password.is_empty()).then(|| password.clone()),
            use_tls: Some(self.config.secure),
            dangerously_accept_invalid_certs: Some(self.config.insecure_tls),
            ..ClientConfig::default()
        }
    }

    /// Queued lines are only written once the channel is joined
    fn accepts_writes(&self) -> bool {
        matches!(self.state, SessionState::Joined | SessionState::Listening)
    }

    /// Process events until the connection ends. Each event, including its
    /// webhook post, is handled before the next message is read.
    pub async fn listen(&mut self, mut conn: Connection) -> Result<(), IrcError> {
        loop {
            let writable = self.accepts_writes();
            tokio::select! {
                message = conn.stream.next() => {
                    let message = message.ok_or(IrcError::Closed)??;
                    tracing::trace!("< {:?}", message.command);

                    let event = to_event(&message);
                    self.observe(&event, conn.client.current_nickname());

                    match self.dispatcher.dispatch(&event) {
                        Some(IrcAction::Join(channel)) => self.join(&conn.client, &channel)?,
                        Some(IrcAction::Forward(payload)) => self.forward(&payload).await,
                        None => {}
                    }
                }
                Some(line) = self.outbound.recv(), if writable => {
                    conn.client.send_privmsg(&line.channel, &line.text)?;
                }
            }
        }
    }

    /// Listen on `conn`, then keep reconnecting with exponential backoff
    /// when `irc.reconnect` is set. Returns only when giving up.
    pub async fn run(mut self, mut conn: Connection) -> Result<(), IrcError> {
        loop {
            let err = match self.listen(conn).await {
                Ok(()) => IrcError::Closed,
                Err(e) => e,
            };
            self.state = SessionState::Disconnected;

            if !self.config.reconnect {
                return Err(err);
            }
            tracing::warn!("IRC connection lost: {}", err);
            conn = self.reconnect().await;
        }
    }

    async fn reconnect(&mut self) -> Connection {
        let mut backoff = INITIAL_BACKOFF;
        loop {
            tracing::info!("Reconnecting in {:?}", backoff);
            tokio::time::sleep(backoff).await;

            match self.connect().await {
                Ok(conn) => return conn,
                Err(e) => tracing::warn!("Reconnect failed: {}", e),
            }
            backoff = (backoff * 2).min(self.config.max_backoff());
        }
    }

    fn observe(&mut self, event: &IrcEvent, current_nick: &str) {
        match event {
            IrcEvent::Registered => tracing::info!("Registered as {}", current_nick),
            IrcEvent::Joined { nick, channel } if nick == current_nick && *channel == self.config.channel => {
                self.state = SessionState::Listening;
                tracing::info!("Listening on {}", channel);
            }
            _ => {}
        }
    }

    fn join(&mut self, client: &Client, channel: &str) -> Result<(), IrcError> {
        client.send_join(channel)?;
        self.state = SessionState::Joined;
        tracing::info!("Joined {}", channel);
        Ok(())
    }

    async fn forward(&self, payload: &WebhookPayload) {
        if let Err(e) = self.chat.post(payload).await {
            tracing::warn!("Relay to slack failed: {}", e);
        }
    }
}
