use crate::errors::Result;
use crate::handler::preview::{self, Preview};
use crate::handler::routes;
use crate::handler::Handler;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serenity::builder::CreateEmbed;
use serenity::model::channel::{Channel, ChannelType, Message, Reaction};
use serenity::model::Timestamp;
use serenity::prelude::*;

const EMPTY_CONTENT_MARKER: &str = "*[No content]*";
const EMBED_COLOUR: u32 = 0xFFCC00;

/// Drive one reaction event end to end: gate on the reactor and the route,
/// dedup against the ledger, build the embed, send it, record it.
///
/// The ledger lock is not held across the fetch and send awaits, so two
/// reactions racing on the same message can both pass the dedup check and
/// produce a double repost. Accepted gap at this scale.
pub(super) async fn process_reaction(
    handler: &Handler,
    ctx: &Context,
    reaction: &Reaction,
) -> Result<()> {
    // the bot reacting to its own reposts must never loop
    if reaction.user_id == Some(ctx.cache.current_user_id()) {
        return Ok(());
    }

    let emoji_key = routes::emoji_key(&reaction.emoji);
    let dest_id = match routes::resolve(&emoji_key) {
        Some(id) => id,
        None => return Ok(()),
    };

    let message = reaction
        .channel_id
        .message(&ctx.http, reaction.message_id)
        .await?;

    let original_id = message.id.as_u64().to_string();
    if handler.has_repost(&original_id)? {
        debug!("message {original_id} already reposted, skipping");
        return Ok(());
    }

    let dest_channel = match dest_id.to_channel(ctx).await {
        Ok(Channel::Guild(channel)) if channel.kind == ChannelType::Text => channel,
        _ => {
            debug!("destination {dest_id} is not a postable text channel, ignoring");
            return Ok(());
        }
    };

    let content = if message.content.is_empty() {
        EMPTY_CONTENT_MARKER
    } else {
        message.content.as_str()
    };
    let jump_url = message.id.link(message.channel_id, reaction.guild_id);

    let mut embed = base_embed(
        content,
        &message.author.name,
        &message.author.face(),
        message.timestamp,
        &jump_url,
    );

    if let Some(url) = first_url(&message.content) {
        apply_preview(&mut embed, url, &preview::fetch(url).await);
    }

    // applied after the preview on purpose, attachment images win
    if let Some(attachment_url) = first_image_attachment(&message) {
        embed.image(attachment_url);
    }

    let repost = dest_channel
        .send_message(&ctx.http, |builder| builder.set_embed(embed))
        .await?;

    handler.record_repost(&original_id, &repost.id.as_u64().to_string(), &emoji_key)?;
    info!("reposted message {original_id} to #{} as {}", dest_channel.name, repost.id);
    Ok(())
}

fn base_embed(
    description: &str,
    author_name: &str,
    author_icon: &str,
    timestamp: Timestamp,
    jump_url: &str,
) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed
        .colour(EMBED_COLOUR)
        .description(description)
        .timestamp(timestamp)
        .author(|author| author.name(author_name).icon_url(author_icon))
        .field(
            "🔗 Jump to Original Message",
            format!("[Click here]({jump_url})"),
            false,
        );
    embed
}

/// Attach whatever metadata the fetch turned up. An unavailable preview
/// leaves the embed exactly as it was.
fn apply_preview(embed: &mut CreateEmbed, url: &str, preview: &Preview) {
    let meta = match preview {
        Preview::Available(meta) => meta,
        Preview::Unavailable => return,
    };

    if let Some(title) = &meta.title {
        embed.field("🔗 Link Preview", format!("[{title}]({url})"), false);
    }
    if let Some(description) = &meta.description {
        embed.field("Description", description, false);
    }
    if let Some(image) = &meta.image {
        embed.image(image);
    }
}

/// First URL-shaped substring of the message text, if any. Only the first
/// link in a message gets a preview.
fn first_url(content: &str) -> Option<&str> {
    lazy_static! {
        static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();
    }
    URL_RE.find(content).map(|m| m.as_str())
}

fn first_image_attachment(msg: &Message) -> Option<&str> {
    msg.attachments
        .iter()
        .find(|attachment| {
            attachment
                .content_type
                .as_ref()
                .map_or(false, |t| t.starts_with("image"))
        })
        .map(|attachment| attachment.url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::preview::LinkPreview;

    fn test_embed() -> CreateEmbed {
        base_embed(
            "hello world",
            "someuser",
            "https://cdn.discordapp.com/avatars/1/a.png",
            Timestamp::from_unix_timestamp(1_650_000_000).unwrap(),
            "https://discord.com/channels/1/2/3",
        )
    }

    fn full_preview() -> Preview {
        Preview::Available(LinkPreview {
            title: Some("A title".to_string()),
            description: Some("A description".to_string()),
            image: Some("https://example.org/og.png".to_string()),
        })
    }

    #[test]
    fn test_first_url_finds_first_only() {
        let content = "see https://example.org/a and also https://example.org/b";
        assert_eq!(first_url(content), Some("https://example.org/a"));
    }

    #[test]
    fn test_first_url_plain_http() {
        assert_eq!(
            first_url("link: http://example.org/a"),
            Some("http://example.org/a")
        );
    }

    #[test]
    fn test_first_url_none() {
        assert_eq!(first_url("no links in here"), None);
        assert_eq!(first_url("ftp://example.org is the wrong scheme"), None);
    }

    #[test]
    fn test_base_embed_contents() {
        let embed = test_embed();

        assert_eq!(embed.0["description"], "hello world");
        assert_eq!(embed.0["color"], EMBED_COLOUR);
        assert_eq!(embed.0["author"]["name"], "someuser");
        assert!(embed.0.contains_key("timestamp"));

        let fields = embed.0["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["name"], "🔗 Jump to Original Message");
        assert_eq!(
            fields[0]["value"],
            "[Click here](https://discord.com/channels/1/2/3)"
        );
    }

    #[test]
    fn test_unavailable_preview_changes_nothing() {
        let mut embed = test_embed();
        apply_preview(&mut embed, "https://example.org", &Preview::Unavailable);

        assert_eq!(embed.0["fields"].as_array().unwrap().len(), 1);
        assert!(!embed.0.contains_key("image"));
    }

    #[test]
    fn test_preview_fields_attached() {
        let mut embed = test_embed();
        apply_preview(&mut embed, "https://example.org/post", &full_preview());

        let fields = embed.0["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1]["name"], "🔗 Link Preview");
        assert_eq!(fields[1]["value"], "[A title](https://example.org/post)");
        assert_eq!(fields[2]["name"], "Description");
        assert_eq!(fields[2]["value"], "A description");
        assert_eq!(embed.0["image"]["url"], "https://example.org/og.png");
    }

    #[test]
    fn test_partial_preview_attaches_only_present_fields() {
        let mut embed = test_embed();
        let preview = Preview::Available(LinkPreview {
            title: Some("Only a title".to_string()),
            description: None,
            image: None,
        });
        apply_preview(&mut embed, "https://example.org/post", &preview);

        let fields = embed.0["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["name"], "🔗 Link Preview");
        assert!(!embed.0.contains_key("image"));
    }

    #[test]
    fn test_attachment_image_beats_preview_image() {
        let mut embed = test_embed();
        apply_preview(&mut embed, "https://example.org/post", &full_preview());
        assert_eq!(embed.0["image"]["url"], "https://example.org/og.png");

        // same order as process_reaction: attachment applied last
        embed.image("https://cdn.discordapp.com/attachments/1/2/photo.png");
        assert_eq!(
            embed.0["image"]["url"],
            "https://cdn.discordapp.com/attachments/1/2/photo.png"
        );
    }
}
