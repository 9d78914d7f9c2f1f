use serde::{Deserialize, Serialize};

/// A single repost entry. The field names double as the JSON keys in the
/// backing file, renaming one is a format change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepostRecord {
    /// id of the message that was reacted to
    pub original: String,
    /// id of the message the bot sent to the destination channel
    pub repost: String,
    /// route key of the reaction that triggered the repost
    pub emoji: String,
}

impl RepostRecord {
    #[inline(always)]
    pub fn new(original: &str, repost: &str, emoji: &str) -> RepostRecord {
        RepostRecord {
            original: original.to_string(),
            repost: repost.to_string(),
            emoji: emoji.to_string(),
        }
    }
}
