use std::{io, path::PathBuf, sync::Arc};

use clap::Parser as _;

use lotus_bot::{
    cli::{Args, run_command},
    commands::InteractionContext,
    config::Config,
    dispatch,
    pipeline::Pipeline,
};

use twilight_gateway::{
    ConfigBuilder, Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt as _,
};
use twilight_http::Client;
use twilight_model::gateway::payload::incoming::GuildCreate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::fmt()
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // load config
    let config_path = args.config.unwrap_or_else(|| PathBuf::from("./lotus.toml"));
    let config = Arc::new(Config::load(config_path)?);

    let pipeline = Pipeline::new(&config).await?;

    // Execute command if it exists
    if let Some(command) = args.command {
        return run_command(&command, &pipeline, &config).await;
    }

    // setup discord connection
    let Some(token) = config.general.discord_token.clone() else {
        return Err(anyhow::Error::msg("`DISCORD_TOKEN` not present"));
    };
    let intents = Intents::GUILDS;

    let shard_config = ConfigBuilder::new(token.clone(), intents).build();

    // setup client
    let client = Arc::new(Client::new(token));
    let application = client.current_user_application().await?.model().await?;

    if let Some(owner) = application.owner {
        tracing::info!("application id: {}, owner: {}", application.id, owner.name);
    } else {
        tracing::info!("application id: {}", application.id);
    }

    let interaction = client.interaction(application.id);

    let mut shard = Shard::with_config(ShardId::ONE, shard_config);

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                tracing::warn!(?source, "error receiving event");
                continue;
            }
        };

        tracing::trace!(?event, "received event");

        match event {
            Event::Ready(ready) => {
                tracing::info!(
                    "serving bot as {}#{} in {} guilds",
                    ready.user.name,
                    ready.user.discriminator(),
                    ready.guilds.len()
                );

                // create commands
                interaction
                    .set_global_commands(&lotus_bot::commands::commands())
                    .await?;
            }
            Event::GuildCreate(guild) => {
                if let GuildCreate::Available(guild) = guild.as_ref() {
                    tracing::info!("guild: {}", guild.name);
                }
            }
            Event::InteractionCreate(interaction) => {
                let interaction = interaction.0;

                // setup command context
                let cx = InteractionContext {
                    interaction,
                    client: client.clone(),
                    pipeline: pipeline.clone(),
                    config: config.clone(),
                    application_id: application.id,
                };

                tokio::spawn(dispatch::interaction(cx));
            }
            _ => (),
        }
    }

    Ok(())
}
