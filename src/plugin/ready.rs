use crate::{event::*, plugin::*};
use anyhow::Result;

/// Consumes the connection-ready event once the debug plugin has logged it.
pub struct Ready;

#[serenity::async_trait]
impl Plugin for Ready {
    fn name(&self) -> &'static str {
        "ready"
    }

    async fn handle(&self, _ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::Ready(_) = event else {
            return Ok(EventHandled::No);
        };

        // Connected to server
        Ok(EventHandled::Yes)
    }
}
