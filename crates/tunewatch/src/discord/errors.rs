use tunewatch_core::TunewatchError;

#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("Discord login failed: {source}")]
    Login {
        #[source]
        source: serenity::Error,
    },

    #[error("Discord connection closed before the bot was ready")]
    ClosedBeforeReady,

    #[error("Discord client task failed: {message}")]
    Task { message: String },
}

impl TunewatchError for DiscordError {
    fn error_code(&self) -> &'static str {
        match self {
            DiscordError::Login { .. } => "DISCORD_LOGIN_FAILED",
            DiscordError::ClosedBeforeReady => "DISCORD_CLOSED_BEFORE_READY",
            DiscordError::Task { .. } => "DISCORD_TASK_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        // Bad token or missing privileged intents
        matches!(self, DiscordError::Login { .. })
    }
}
