use std::sync::Arc;

use serenity::all::{
    ActivityData, ActivityType, Cache, Colour, CreateEmbed, CreateEmbedFooter, CreateMessage,
    Http, OnlineStatus, ShardMessenger, UserId,
};
use serenity::http::HttpError;
use tracing::debug;

use tunewatch_core::{
    ActivityKind, DeliveryError, Notification, Notifier, PresenceRecord, PresenceSource,
    StatusKind, StatusSink, StatusSummary, SubjectId,
};

/// The bot as seen by the watch service: presences come from the gateway
/// cache, notifications go out as direct messages, and the status line is
/// the bot's own presence.
#[derive(Clone)]
pub struct DiscordPlatform {
    cache: Arc<Cache>,
    http: Arc<Http>,
    shard: ShardMessenger,
}

impl DiscordPlatform {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>, shard: ShardMessenger) -> Self {
        Self { cache, http, shard }
    }
}

impl PresenceSource for DiscordPlatform {
    fn snapshot(&self) -> Vec<PresenceRecord> {
        let mut records = Vec::new();

        for guild_id in self.cache.guilds() {
            let Some(guild) = self.cache.guild(guild_id) else {
                continue;
            };

            for (user_id, presence) in &guild.presences {
                let display_name = guild
                    .members
                    .get(user_id)
                    .map(|member| member.display_name().to_string())
                    .or_else(|| presence.user.name.clone())
                    .unwrap_or_else(|| user_id.to_string());

                for activity in &presence.activities {
                    records.push(PresenceRecord {
                        subject_id: SubjectId(user_id.get()),
                        display_name: display_name.clone(),
                        activity_kind: activity_kind(activity.kind),
                        activity_label: activity.name.clone(),
                        // Spotify puts the artist string in `state`
                        matched_value: activity.state.clone().unwrap_or_default(),
                    });
                }
            }
        }

        debug!(event = "cli.discord.snapshot_completed", records = records.len());
        records
    }
}

impl Notifier for DiscordPlatform {
    async fn send(
        &self,
        subject: SubjectId,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let embed = CreateEmbed::new()
            .title(&notification.title)
            .colour(Colour::RED)
            .field(&notification.headline, &notification.body, false)
            .footer(CreateEmbedFooter::new(&notification.footer));

        UserId::new(subject.0)
            .direct_message(
                (&self.cache, self.http.as_ref()),
                CreateMessage::new().embed(embed),
            )
            .await
            .map(|_| ())
            .map_err(delivery_error)
    }
}

impl StatusSink for DiscordPlatform {
    fn update(&self, summary: &StatusSummary) {
        self.shard.set_presence(
            Some(ActivityData::watching(summary.text.clone())),
            online_status(summary.status),
        );
    }
}

fn activity_kind(kind: ActivityType) -> ActivityKind {
    match kind {
        ActivityType::Playing => ActivityKind::Playing,
        ActivityType::Streaming => ActivityKind::Streaming,
        ActivityType::Listening => ActivityKind::Listening,
        ActivityType::Watching => ActivityKind::Watching,
        ActivityType::Custom => ActivityKind::Custom,
        ActivityType::Competing => ActivityKind::Competing,
        _ => ActivityKind::Other,
    }
}

fn online_status(status: StatusKind) -> OnlineStatus {
    match status {
        StatusKind::DoNotDisturb => OnlineStatus::DoNotDisturb,
    }
}

/// A response from Discord (closed DMs, blocked bot, ...) is a rejection;
/// anything that never got one is unreachable.
fn delivery_error(e: serenity::Error) -> DeliveryError {
    match e {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            DeliveryError::Rejected {
                message: format!(
                    "{} (HTTP {}, code {})",
                    response.error.message,
                    response.status_code.as_u16(),
                    response.error.code
                ),
            }
        }
        other => DeliveryError::Unreachable {
            message: other.to_string(),
        },
    }
}
