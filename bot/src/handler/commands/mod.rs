mod stats;

use crate::errors::Result;
use crate::handler::Handler;

use log::debug;
use serenity::model::application::command::{Command, CommandOptionType};
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOptionValue,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::GuildId;
use serenity::prelude::*;

/// Register the guild slash commands. Called once per ready event, the set
/// call replaces whatever was registered before so it is safe to repeat.
pub(super) async fn register(ctx: &Context, guild_id: GuildId) -> Result<Vec<Command>> {
    let synced = guild_id
        .set_application_commands(&ctx.http, |commands| {
            commands.create_application_command(|command| {
                command
                    .name("repoststats")
                    .description("Show how many messages have been reposted")
                    .create_option(|option| {
                        option
                            .name("full")
                            .description("List every repost instead of the five most recent")
                            .kind(CommandOptionType::Boolean)
                            .required(false)
                    })
            })
        })
        .await?;
    Ok(synced)
}

pub(super) async fn handle_command(
    handler: &Handler,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    match command.data.name.as_str() {
        "repoststats" => repost_stats(handler, ctx, command).await,
        name => {
            // only commands we registered ever arrive, but don't error on it
            debug!("ignoring unrecognized command {name}");
            Ok(())
        }
    }
}

async fn repost_stats(
    handler: &Handler,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) -> Result<()> {
    let full = command
        .data
        .options
        .iter()
        .find(|option| option.name == "full")
        .and_then(|option| match option.resolved {
            Some(CommandDataOptionValue::Boolean(value)) => Some(value),
            _ => None,
        })
        .unwrap_or(false);

    let report = handler.with_records(|records| stats::report(records, full))?;

    command
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(report).ephemeral(true))
        })
        .await?;

    Ok(())
}
