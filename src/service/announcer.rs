use super::LogFollowerService;
use crate::event::{AcceptedBid, Event};
use anyhow::Result;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{debug, info};

pub const ANNOUNCER_SERVICE_ID: &str = "announcer";

/// Announces every accepted bid found on the event log
#[derive(Clone, Default)]
pub struct Announcer {
    announced: Arc<AtomicU64>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of announcements made so far
    pub fn announced(&self) -> Arc<AtomicU64> {
        self.announced.clone()
    }
}

impl LogFollowerService for Announcer {
    fn get_log_progress_id(&self) -> String {
        ANNOUNCER_SERVICE_ID.to_owned()
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::BidAccepted(AcceptedBid {
                item,
                bidder,
                amount,
            }) => {
                info!(%item, %bidder, amount, "new winning bid");
                self.announced.fetch_add(1, Ordering::SeqCst);
            }
            #[allow(unreachable_patterns)]
            other => debug!(event = ?other, "ignoring event"),
        }
        Ok(())
    }
}
