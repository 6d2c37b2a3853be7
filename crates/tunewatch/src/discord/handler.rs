use std::sync::{Mutex, PoisonError};

use serenity::all::{Context, EventHandler, Ready, ShardMessenger};
use serenity::async_trait;
use tokio::sync::oneshot;
use tracing::info;

/// Hands the shard messenger to whoever is waiting on the first `ready`.
///
/// Later `ready` events (after a full reconnect) are only logged.
pub struct ReadyHandler {
    ready: Mutex<Option<oneshot::Sender<ShardMessenger>>>,
}

impl ReadyHandler {
    pub fn new(ready: oneshot::Sender<ShardMessenger>) -> Self {
        Self {
            ready: Mutex::new(Some(ready)),
        }
    }
}

#[async_trait]
impl EventHandler for ReadyHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            event = "cli.discord.ready",
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            shard = ctx.shard_id.0,
        );

        let waiting = self
            .ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tx) = waiting {
            // The receiver is gone only if startup was cancelled meanwhile
            let _ = tx.send(ctx.shard.clone());
        }
    }
}
