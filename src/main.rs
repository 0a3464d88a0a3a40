use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

use sirbot::application::errors::{ConfigError, RelayError};
use sirbot::application::messaging::{relay_queue, InboundReceiver};
use sirbot::application::services::RelayService;
use sirbot::infrastructure::adapters::irc::IrcSession;
use sirbot::infrastructure::adapters::slack::SlackWebhook;
use sirbot::infrastructure::config::{Config, ConfigOverrides};
use sirbot::infrastructure::http;

#[derive(Parser)]
#[command(name = "sirbot")]
#[command(about = "Relay messages between an IRC channel and a Slack channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,

    /// Slack incoming webhook URL
    #[arg(long, global = true)]
    webhook_url: Option<String>,

    /// Slack outgoing webhook token
    #[arg(long, global = true)]
    webhook_token: Option<String>,

    /// HTTP listen address (for accepting outgoing webhooks)
    #[arg(long, global = true)]
    listen: Option<String>,

    /// IRC nick
    #[arg(long, global = true)]
    nick: Option<String>,

    /// IRC server host
    #[arg(long, global = true)]
    irc_host: Option<String>,

    /// IRC server port
    #[arg(long, global = true)]
    irc_port: Option<u16>,

    /// IRC server password
    #[arg(long, global = true)]
    irc_password: Option<String>,

    /// Connect to IRC over TLS
    #[arg(long, global = true)]
    irc_secure: bool,

    /// IRC channel to join
    #[arg(long, global = true)]
    irc_channel: Option<String>,

    /// Slack channel to post to
    #[arg(long, global = true)]
    slack_channel: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay (default)
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            webhook_url: self.webhook_url.clone(),
            webhook_token: self.webhook_token.clone(),
            listen: self.listen.clone(),
            nick: self.nick.clone(),
            irc_host: self.irc_host.clone(),
            irc_port: self.irc_port,
            irc_password: self.irc_password.clone(),
            irc_secure: self.irc_secure,
            irc_channel: self.irc_channel.clone(),
            slack_channel: self.slack_channel.clone(),
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Version) => {
            println!("sirbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::InitConfig) => init_config(&cli.config),
        Some(Commands::Run) | None => run(load_config(&cli)),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Config {
    let mut config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    config.apply_env();
    config.apply_overrides(cli.overrides());
    config
}

fn init_config(path: &str) -> Result<(), RelayError> {
    if Path::new(path).exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists", path)).into());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)?;
    println!("Wrote default config to {}", path);
    Ok(())
}

fn run(config: Config) -> Result<(), RelayError> {
    config.validate()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_relay(config))
}

async fn run_relay(config: Config) -> Result<(), RelayError> {
    tracing::info!(
        "Starting sirbot: {} on {} <-> slack {}",
        config.irc.channel,
        config.irc.address(),
        config.slack.channel
    );

    let (queue_tx, queue_rx) = relay_queue(config.relay.queue_capacity);
    let receiver = InboundReceiver::new(&config.slack.webhook_token, &config.irc.channel, queue_tx);

    let listener = tokio::net::TcpListener::bind(&config.http.listen).await?;
    tracing::info!("Accepting outgoing webhooks on {}{}", config.http.listen, config.http.path);
    let server = tokio::spawn(http::serve(listener, http::router(receiver, &config.http.path)));

    let slack = Arc::new(SlackWebhook::new(&config.slack.webhook_url, config.slack.timeout())?);
    let mut session = IrcSession::new(config.irc.clone(), &config.slack.channel, slack);

    // No retry for the first connection
    let conn = session.connect().await?;

    let relay = RelayService::new(session.handle(), queue_rx).with_delay(config.relay.send_delay());
    tokio::spawn(relay.run());

    tokio::select! {
        result = session.run(conn) => result?,
        result = server => match result {
            Ok(served) => served?,
            Err(e) => return Err(RelayError::Internal(format!("HTTP server task failed: {}", e))),
        },
    }

    Ok(())
}
