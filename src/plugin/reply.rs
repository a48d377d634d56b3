use crate::helper::{split_message, MessageHelper};
use crate::{event::*, log_error, plugin::*};
use anyhow::Result;
use serenity::all::Message;

const ERROR_REPLY: &str = "I ran into an error processing that request.";

/// The response orchestrator: answers direct mentions with a completion from
/// the hosted LLM, grounded in chunks retrieved from the knowledge base.
pub struct Reply;

#[serenity::async_trait]
impl Plugin for Reply {
    fn name(&self) -> &'static str {
        "reply"
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        // Only respond if the message is to the bot
        if !msg.is_to_me(ctx).await? {
            return Ok(EventHandled::No);
        }

        // Show "typing..." while we search and wait on the model
        let typing = msg.channel_id.start_typing(ctx.http);
        let result = respond(ctx, msg).await;
        typing.stop();

        // Search, inference, and send failures all land here: one apology
        // message, and the bot keeps running.
        if let Err(err) = result {
            log_error!("Reply in channel {} failed: {:#}", msg.channel_id, err);
            msg.channel_id.say(ctx.cache_http, ERROR_REPLY).await?;
        }

        Ok(EventHandled::Yes)
    }
}

async fn respond(ctx: &Context<'_>, msg: &Message) -> Result<()> {
    let bot = ctx.cache.current_user().clone(); // clone to avoid async/send safety
    let question = msg.content_without_mentions(bot.id);

    let context_chunks = ctx.knowledge.search(&question).await?;
    let system = build_system_prompt(&ctx.cfg.llm.system, &bot.name, &context_chunks);

    let response = ctx.llm.chat(&system, &question).await?;

    for part in split_message(&response) {
        msg.channel_id.say(ctx.cache_http, part).await?;
    }

    Ok(())
}

/// Assemble the system prompt: the configured persona, with the retrieved
/// chunks appended when there are any.
fn build_system_prompt(persona: &str, bot_name: &str, context: &[String]) -> String {
    let mut prompt = persona.replace("{{bot}}", bot_name);

    if !context.is_empty() {
        prompt.push_str("\n\nRelevant context from the knowledge base:\n");
        for chunk in context {
            prompt.push_str("\n---\n");
            prompt.push_str(chunk);
        }
    }

    prompt
}
