#![warn(
    clippy::cognitive_complexity,
    clippy::missing_const_for_fn,
    clippy::option_if_let_else
)]

mod errors;
mod handler;

use ledger::Ledger;
use log::LevelFilter;
use log::{error, info};
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use simple_logger::SimpleLogger;
use time::UtcOffset;

use std::env;
use std::process;

use handler::Handler;

fn load_ledger() -> Ledger {
    match Ledger::open_default() {
        Ok(ledger) => {
            info!("successfully loaded repost ledger");
            ledger
        }
        Err(why) => {
            error!("Failed to load repost ledger, exiting {why:?}");
            process::exit(-1);
        }
    }
}

#[tokio::main]
async fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("bot", LevelFilter::Debug)
        .with_module_level("ledger", LevelFilter::Debug)
        // EST offset, wrong by an hour whenever DST is in effect
        .with_utc_offset(UtcOffset::from_hms(-4, 0, 0).unwrap())
        .init()
        .unwrap();

    // Configure the client with your Discord bot token in the environment.
    let token = env::var("DISCORD_TOKEN").expect("Expected a token in the environment");
    let guild_id: u64 = env::var("GUILD_ID")
        .expect("Expected a guild id in the environment")
        .parse()
        .expect("GUILD_ID must be a numeric id");

    // a ledger that exists but won't parse is fatal, see load_ledger
    let ledger = load_ledger();

    let intents = GatewayIntents::GUILDS
        .union(GatewayIntents::GUILD_MESSAGES)
        .union(GatewayIntents::GUILD_MESSAGE_REACTIONS)
        .union(GatewayIntents::MESSAGE_CONTENT);

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(ledger, guild_id))
        .await
        .expect("Err creating client");

    // Finally, start a single shard, and start listening to events.
    //
    // Shards will automatically attempt to reconnect, and will perform
    // exponential backoff until it reconnects.
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
