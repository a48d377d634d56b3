use crate::context::Context;
use crate::event::{Event, EventHandled};
use anyhow::Result;

mod debug;
mod ignore_bots;
mod ready;
mod reply;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug
    fn name(&self) -> &'static str;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        // Observability; never consumes events
        Box::new(debug::Debug),
        Box::new(ready::Ready),
        // Never talk to other bots, ourselves included
        Box::new(ignore_bots::IgnoreBots),
        // LLM fallback, used if no other plugin handles the event.
        // Keep last.
        Box::new(reply::Reply),
    ]
}
