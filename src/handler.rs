use crate::{config::Config, context::Context, event::Event, knowledge::KnowledgeBase, llm::LlmClient};
use serenity::all::{Message, Ready};

/// Discord event handler
///
/// Owns the services every event handler needs: the configuration, the
/// knowledge base built at startup, and the inference client.
pub struct Handler {
    cfg: Config,
    knowledge: KnowledgeBase,
    llm: LlmClient,
}

impl<'a> Handler {
    pub fn new(cfg: Config, knowledge: KnowledgeBase, llm: LlmClient) -> Self {
        Self {
            cfg,
            knowledge,
            llm,
        }
    }

    fn ctx(&'a self, discord_ctx: &'a serenity::all::Context) -> Context<'a> {
        Context {
            cfg: &self.cfg,
            knowledge: &self.knowledge,
            llm: &self.llm,
            cache: &discord_ctx.cache,
            http: &discord_ctx.http,
            cache_http: discord_ctx,
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        Event::Ready(ready).handle(self.ctx(&discord_ctx)).await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        Event::Message(msg).handle(self.ctx(&discord_ctx)).await;
    }
}
