mod config;
mod context;
mod event;
mod handler;
mod helper;
mod knowledge;
mod llm;
mod logging;
mod plugin;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crate::config::Config::load().await?;
    let knowledge = crate::knowledge::KnowledgeBase::build(&cfg.knowledge).await;
    let llm = crate::llm::LlmClient::new(&cfg.llm, cfg.secrets.api_key.clone());
    let token = cfg.secrets.discord_token.clone();
    let handler = handler::Handler::new(cfg, knowledge, llm);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
