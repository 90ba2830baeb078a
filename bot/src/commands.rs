//! Slash command handlers and the pure helpers behind their replies.

use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude as serenity;

use crate::{BotError, Context, Data};

/// Milliseconds between the Unix epoch and the first second of 2015.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Title carried by every `/info` reply.
pub const INFO_TITLE: &str = "Arena Bot";

const PING_PLACEHOLDER: &str = "Pinging...";
const EMBED_COLOUR: u32 = 0x00E5_8E26;

/// Creation time, in Unix milliseconds, encoded in a snowflake id.
///
/// # Examples
/// ```
/// use arena_bot::commands::snowflake_timestamp_ms;
///
/// assert_eq!(snowflake_timestamp_ms(0), 1_420_070_400_000);
/// assert_eq!(snowflake_timestamp_ms(1 << 22), 1_420_070_400_001);
/// ```
#[must_use]
pub fn snowflake_timestamp_ms(id: u64) -> u64 {
    (id >> 22).saturating_add(DISCORD_EPOCH_MS)
}

/// Delay between two snowflakes, clamped at zero when `reply` predates
/// `interaction`.
#[must_use]
pub fn round_trip_ms(interaction: u64, reply: u64) -> u64 {
    snowflake_timestamp_ms(reply).saturating_sub(snowflake_timestamp_ms(interaction))
}

/// Whole milliseconds of a heartbeat; poise reports an unknown heartbeat as
/// zero.
#[must_use]
pub fn heartbeat_ms(heartbeat: Duration) -> u64 {
    u64::try_from(heartbeat.as_millis()).unwrap_or(u64::MAX)
}

#[must_use]
pub fn latency_report(round_trip: u64, heartbeat: u64) -> String {
    format!("Pong! Round trip: {round_trip}ms. Heartbeat: {heartbeat}ms.")
}

/// Static embed describing the bot.
#[must_use]
pub fn info_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(INFO_TITLE)
        .description("Companion bot for the Arena community.")
        .field("/ping", "Round-trip and gateway heartbeat latency", false)
        .field("/info", "This message", false)
        .colour(EMBED_COLOUR)
}

/// Report reply and gateway latency.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), BotError> {
    let handle = ctx.say(PING_PLACEHOLDER).await?;
    let reply = handle.message().await?;
    let round_trip = round_trip_ms(ctx.id(), reply.id.get());
    let heartbeat = heartbeat_ms(ctx.ping().await);

    handle
        .edit(
            ctx,
            CreateReply::default().content(latency_report(round_trip, heartbeat)),
        )
        .await?;
    Ok(())
}

/// Describe the bot and its commands.
#[poise::command(slash_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), BotError> {
    ctx.send(CreateReply::default().embed(info_embed())).await?;
    Ok(())
}

/// Every command registered at startup.
#[must_use]
pub fn all() -> Vec<poise::Command<Data, BotError>> {
    vec![ping(), info()]
}
