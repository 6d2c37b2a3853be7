//! Discord adapter: gateway session, presence source, notifier and
//! status sink on top of serenity.

mod errors;
mod handler;
mod platform;

use std::sync::Arc;

use serenity::all::{Client, GatewayIntents, ShardManager};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use errors::DiscordError;
pub use platform::DiscordPlatform;

use handler::ReadyHandler;

/// Guild metadata, member names and presences are all read from the cache.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_PRESENCES
}

/// A logged-in gateway connection.
pub struct DiscordSession {
    platform: DiscordPlatform,
    shard_manager: Arc<ShardManager>,
    client_task: JoinHandle<Result<(), serenity::Error>>,
}

/// Log in and wait until the first shard is ready.
///
/// Returns `Ok(None)` if `cancel` fires first. If the gateway connection
/// ends for any reason while running, `cancel` is triggered so the watch
/// service winds down with it.
pub async fn connect(
    token: &str,
    cancel: &CancellationToken,
) -> Result<Option<DiscordSession>, DiscordError> {
    info!(event = "cli.discord.connect_started");

    let (ready_tx, mut ready_rx) = oneshot::channel();
    let mut client = Client::builder(token, intents())
        .event_handler(ReadyHandler::new(ready_tx))
        .await
        .map_err(|source| DiscordError::Login { source })?;

    let cache = Arc::clone(&client.cache);
    let http = Arc::clone(&client.http);
    let shard_manager = Arc::clone(&client.shard_manager);

    let stop = cancel.clone();
    let mut client_task = tokio::spawn(async move {
        let result = client.start().await;
        stop.cancel();
        result
    });

    let shard = tokio::select! {
        biased;
        joined = &mut client_task => {
            return Err(match joined {
                Ok(Ok(())) => DiscordError::ClosedBeforeReady,
                Ok(Err(source)) => DiscordError::Login { source },
                Err(e) => DiscordError::Task { message: e.to_string() },
            });
        }
        ready = &mut ready_rx => match ready {
            Ok(shard) => shard,
            Err(_) => return Err(DiscordError::ClosedBeforeReady),
        },
        _ = cancel.cancelled() => {
            info!(event = "cli.discord.connect_cancelled");
            shard_manager.shutdown_all().await;
            if let Err(e) = client_task.await {
                warn!(event = "cli.discord.client_task_failed", error = %e);
            }
            return Ok(None);
        }
    };

    info!(event = "cli.discord.connect_completed");

    Ok(Some(DiscordSession {
        platform: DiscordPlatform::new(cache, http, shard),
        shard_manager,
        client_task,
    }))
}

impl DiscordSession {
    pub fn platform(&self) -> DiscordPlatform {
        self.platform.clone()
    }

    /// Close every shard and wait for the client to stop.
    pub async fn shutdown(self) {
        info!(event = "cli.discord.shutdown_started");
        self.shard_manager.shutdown_all().await;

        match self.client_task.await {
            Ok(Ok(())) => info!(event = "cli.discord.shutdown_completed"),
            Ok(Err(e)) => warn!(event = "cli.discord.client_failed", error = %e),
            Err(e) => warn!(event = "cli.discord.client_task_failed", error = %e),
        }
    }
}
