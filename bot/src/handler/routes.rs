use phf::phf_map;
use serenity::model::channel::ReactionType;
use serenity::model::id::ChannelId;

/// Emoji to destination channel routes, fixed for the process lifetime.
/// Unicode emoji are keyed by the symbol itself, custom emoji by their
/// numeric id rendered as a string.
static REACTION_ROUTES: phf::Map<&'static str, u64> = phf_map! {
    "📌" => 123_456_789_012_345_678,
    "🧷" => 234_567_890_123_456_789,
    "987654321098765432" => 345_678_901_234_567_890,
};

/// Look up the destination channel for a reaction key. Unknown keys have
/// no route and the event is dropped by the caller.
#[inline]
pub(super) fn resolve(emoji_key: &str) -> Option<ChannelId> {
    REACTION_ROUTES.get(emoji_key).map(|channel| ChannelId(*channel))
}

/// Reduce a reaction to the key used in the route table.
pub(super) fn emoji_key(emoji: &ReactionType) -> String {
    match emoji {
        ReactionType::Custom { id, .. } => id.as_u64().to_string(),
        ReactionType::Unicode(symbol) => symbol.clone(),
        // any other reaction kind never carries a route
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::model::id::EmojiId;

    #[test]
    fn test_resolve_known_keys() {
        assert_eq!(resolve("📌"), Some(ChannelId(123_456_789_012_345_678)));
        assert_eq!(resolve("🧷"), Some(ChannelId(234_567_890_123_456_789)));
        assert_eq!(
            resolve("987654321098765432"),
            Some(ChannelId(345_678_901_234_567_890))
        );
    }

    #[test]
    fn test_resolve_unknown_key() {
        assert_eq!(resolve("🔥"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("11111111"), None);
    }

    #[test]
    fn test_emoji_key_unicode() {
        let emoji = ReactionType::Unicode("📌".to_string());
        assert_eq!(emoji_key(&emoji), "📌");
    }

    #[test]
    fn test_emoji_key_custom_uses_id_not_name() {
        let emoji = ReactionType::Custom {
            animated: false,
            id: EmojiId(987_654_321_098_765_432),
            name: Some("pinboard".to_string()),
        };
        assert_eq!(emoji_key(&emoji), "987654321098765432");
    }

    #[test]
    fn test_custom_key_routes() {
        let emoji = ReactionType::Custom {
            animated: true,
            id: EmojiId(987_654_321_098_765_432),
            name: None,
        };
        assert!(resolve(&emoji_key(&emoji)).is_some());
    }
}
