//! Telling the world about accepted bids
use crate::auction::{Bid, Item};
use crate::event::{AcceptedBid, Event};
use crate::event_log;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Called once for every bid the ledger accepts
///
/// Runs while the ledger is locked, so implementations must be quick and
/// must not call back into the ledger. A returned error does not undo the
/// acceptance.
pub trait NotificationSink {
    fn notify(&self, bid: &Bid, item: &Item) -> Result<()>;
}

pub type SharedNotificationSink = Arc<dyn NotificationSink + Send + Sync + 'static>;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl NoopSink {
    pub fn new_shared() -> SharedNotificationSink {
        Arc::new(Self)
    }
}

impl NotificationSink for NoopSink {
    fn notify(&self, _bid: &Bid, _item: &Item) -> Result<()> {
        Ok(())
    }
}

/// Acknowledges every executed bid on behalf of its bidder
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingSink;

impl LoggingSink {
    pub fn new_shared() -> SharedNotificationSink {
        Arc::new(Self)
    }
}

impl NotificationSink for LoggingSink {
    fn notify(&self, bid: &Bid, item: &Item) -> Result<()> {
        info!(
            bidder = %bid.bidder(),
            bid_id = bid.id(),
            "{} executed a {} on {}",
            bid.bidder(),
            bid,
            item
        );
        Ok(())
    }
}

/// Records every accepted bid as an [`Event::BidAccepted`]
pub struct EventLogSink {
    event_writer: event_log::SharedWriter,
}

impl EventLogSink {
    pub fn new(event_writer: event_log::SharedWriter) -> Self {
        Self { event_writer }
    }

    pub fn new_shared(event_writer: event_log::SharedWriter) -> SharedNotificationSink {
        Arc::new(Self::new(event_writer))
    }
}

impl NotificationSink for EventLogSink {
    fn notify(&self, bid: &Bid, item: &Item) -> Result<()> {
        self.event_writer
            .write(&[Event::BidAccepted(AcceptedBid::new(bid, item))])?;
        Ok(())
    }
}

/// Forwards to every sink in turn
///
/// All sinks get notified even if an earlier one fails; the first error
/// is the one reported.
pub struct FanOutSink {
    sinks: Vec<SharedNotificationSink>,
}

impl FanOutSink {
    pub fn new(sinks: Vec<SharedNotificationSink>) -> Self {
        Self { sinks }
    }

    pub fn new_shared(sinks: Vec<SharedNotificationSink>) -> SharedNotificationSink {
        Arc::new(Self::new(sinks))
    }
}

impl NotificationSink for FanOutSink {
    fn notify(&self, bid: &Bid, item: &Item) -> Result<()> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.notify(bid, item) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
