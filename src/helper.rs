//! Miscellaneous convenience methods

use crate::context::Context;
use anyhow::Result;
use serenity::all::UserId;

/// Discord's hard cap on message length, in characters
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[serenity::async_trait]
pub trait MessageHelper {
    async fn is_to_me(&self, ctx: &Context) -> Result<bool>;
    fn content_without_mentions(&self, bot_id: UserId) -> String;
}

#[serenity::async_trait]
impl MessageHelper for serenity::all::Message {
    /// Whether the message mentions me, the bot, directly
    async fn is_to_me(&self, ctx: &Context) -> Result<bool> {
        Ok(self.mentions_me(ctx.cache_http).await?)
    }

    fn content_without_mentions(&self, bot_id: UserId) -> String {
        strip_mention(&self.content, bot_id.get())
    }
}

/// Remove the bot's mention tokens from message content.
///
/// Discord renders a mention as `<@id>`, or `<@!id>` when the member has a
/// guild nickname.  Both forms show up in raw content.
pub fn strip_mention(content: &str, bot_id: u64) -> String {
    content
        .replace(&format!("<@!{}>", bot_id), "")
        .replace(&format!("<@{}>", bot_id), "")
        .trim()
        .to_string()
}

/// Split text into fragments that each fit within Discord's message limit.
///
/// Fragments are full `DISCORD_MESSAGE_LIMIT`-character windows except the
/// last, so sending them in order reproduces the original text.  Splitting
/// counts characters, never breaking inside a UTF-8 sequence.  Empty input
/// yields no fragments.
pub fn split_message(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(DISCORD_MESSAGE_LIMIT)
        .map(|part| part.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_mention_removes_both_forms() {
        assert_eq!(strip_mention("<@42> hello", 42), "hello");
        assert_eq!(strip_mention("<@!42> hello", 42), "hello");
        assert_eq!(strip_mention("hello <@42> there", 42), "hello  there");
    }

    #[test]
    fn strip_mention_leaves_other_mentions() {
        assert_eq!(strip_mention("<@99> hello", 42), "<@99> hello");
    }

    #[test]
    fn short_message_is_one_verbatim_fragment() {
        let text = "a".repeat(DISCORD_MESSAGE_LIMIT);
        assert_eq!(split_message("hi"), vec!["hi".to_string()]);
        assert_eq!(split_message(&text), vec![text.clone()]);
    }

    #[test]
    fn long_message_splits_into_ordered_fragments() {
        let text = "x".repeat(4500);
        let fragments = split_message(&text);

        // ceil(4500 / 2000) fragments
        assert_eq!(fragments.len(), 3);
        assert!(fragments
            .iter()
            .all(|f| f.chars().count() <= DISCORD_MESSAGE_LIMIT));
        assert_eq!(fragments[0].chars().count(), DISCORD_MESSAGE_LIMIT);
        assert_eq!(fragments[1].chars().count(), DISCORD_MESSAGE_LIMIT);
        assert_eq!(fragments[2].chars().count(), 500);
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn splitting_counts_characters_not_bytes() {
        // 2500 three-byte characters
        let text = "语".repeat(2500);
        let fragments = split_message(&text);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].chars().count(), DISCORD_MESSAGE_LIMIT);
        assert_eq!(fragments[1].chars().count(), 500);
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn empty_message_yields_no_fragments() {
        assert!(split_message("").is_empty());
    }
}
