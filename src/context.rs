use crate::{config::Config, knowledge::KnowledgeBase, llm::LlmClient};
use std::sync::Arc;

/// Collection of data that is shared across events
///
/// All of it is constructed once in `main` and read-only afterwards, so no
/// locking is involved.
pub struct Context<'a> {
    // Lorebot's own service types
    pub cfg: &'a Config,
    pub knowledge: &'a KnowledgeBase,
    pub llm: &'a LlmClient,
    // Discord/Serenity context types
    pub cache: &'a Arc<serenity::all::Cache>,
    pub http: &'a Arc<serenity::all::Http>,
    pub cache_http: &'a CacheHttp,
}

/// Many Serenity functions take a `impl CacheHttp` in order to first check the cache if the item
/// is available and fall back to an http request otherwise.  The most readily available type that
/// impl's this is named very differently in a way that could be confusing, and so we alias it.
pub type CacheHttp = serenity::all::Context;
