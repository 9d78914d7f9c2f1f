mod commands;
mod preview;
mod repost;
mod routes;

use crate::errors::{Error, Result};

use ledger::structs::RepostRecord;
use ledger::Ledger;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Reaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;

use std::sync::{Mutex, MutexGuard};

pub struct Handler {
    ledger: Mutex<Ledger>,
    guild_id: GuildId,
}

impl Handler {
    pub fn new(ledger: Ledger, guild_id: u64) -> Handler {
        Handler {
            ledger: Mutex::new(ledger),
            guild_id: GuildId(guild_id),
        }
    }

    fn ledger(&self) -> Result<MutexGuard<'_, Ledger>> {
        self.ledger
            .lock()
            .map_err(|_| Error::ConstStr("Failed to acquire ledger lock"))
    }

    /// Dedup check for the orchestrator. The lock is released on return so
    /// the check does not extend over the awaits that follow it.
    pub(crate) fn has_repost(&self, original_id: &str) -> Result<bool> {
        Ok(self.ledger()?.has_repost(original_id))
    }

    pub(crate) fn record_repost(&self, original: &str, repost: &str, emoji: &str) -> Result<()> {
        Ok(self.ledger()?.append(original, repost, emoji)?)
    }

    pub(crate) fn with_records<T>(&self, f: impl FnOnce(&[RepostRecord]) -> T) -> Result<T> {
        Ok(f(self.ledger()?.records()))
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        match commands::register(&ctx, self.guild_id).await {
            Ok(synced) => info!("Synced {} slash commands", synced.len()),
            Err(why) => error!("Failed to sync slash commands: {why:?}"),
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if let Err(why) = repost::process_reaction(self, &ctx, &reaction).await {
            error!("Reaction handling failed with error: {why:?}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            if let Err(why) = commands::handle_command(self, &ctx, &command).await {
                warn!(
                    "Failed to process command {} with err: {why}",
                    command.data.name
                );
            }
        }
    }
}
