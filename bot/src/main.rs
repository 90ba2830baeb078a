//! Bot entry point: connects to the gateway and registers slash commands.

use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use poise::serenity_prelude as serenity;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use arena_bot::config::BotSettings;
use arena_bot::{Data, commands, on_error};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        BotSettings::load_from_iter(std::env::args_os()).map_err(|err| eyre!(err.to_string()))?;
    let token = settings.token()?.to_owned();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |failure| Box::pin(on_error(failure)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(user = %ready.user.name, "commands registered");
                Ok(Data)
            })
        })
        .build();

    let mut client =
        serenity::ClientBuilder::new(token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await?;
    client.start().await?;
    Ok(())
}
