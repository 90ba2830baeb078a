//! Arena companion chat bot.
//!
//! Two stateless slash commands, `/ping` and `/info`, served through poise.

pub mod commands;
pub mod config;

use poise::serenity_prelude as serenity;
use tracing::error;

/// Shared command state. The bot keeps none.
#[derive(Debug, Default)]
pub struct Data;

/// Failures surfaced by command handlers.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("discord request failed: {0}")]
    Discord(#[from] serenity::Error),
}

pub type Context<'a> = poise::Context<'a, Data, BotError>;

/// Log command failures, then hand them to poise's default reporter.
pub async fn on_error(failure: poise::FrameworkError<'_, Data, BotError>) {
    if let poise::FrameworkError::Command { error: cause, ctx, .. } = &failure {
        error!(command = %ctx.command().name, error = %cause, "command failed");
    }
    if let Err(report_failure) = poise::builtins::on_error(failure).await {
        error!(error = %report_failure, "failed to report command error");
    }
}
