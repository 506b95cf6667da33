//! Bid Ledger
//!
//! Decides which bids are accepted and keeps two indices of the accepted
//! ones: the bids placed on each item, and the items each bidder has bid
//! on.
//!
//! Accepting a bid is a "read the current winner, compare, then write"
//! sequence. Two such sequences racing on the same item would lose
//! updates, so the whole of `register_bid` runs under one write lock
//! covering both indices. Readers take the read lock and get copies, so
//! they never see a bid in one index but not the other.
use crate::auction::{Amount, Bid, Bidder, Item};
use crate::notify::SharedNotificationSink;
use crate::validation;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a well-formed bid was not accepted
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("bid of {amount} does not exceed the baseline price of {baseline}")]
    BelowBaseline { amount: Amount, baseline: Amount },
    #[error("bid of {amount} does not exceed the winning bid of {winning}")]
    NotHighEnough { amount: Amount, winning: Amount },
}

#[derive(Debug)]
pub struct Accepted {
    pub bid: Bid,
    /// Outcome of notifying the sink; the bid stays accepted either way
    pub notification: anyhow::Result<()>,
}

/// Final outcome of registering a bid
#[derive(Debug)]
pub enum Registration {
    Accepted(Accepted),
    Rejected(Rejection),
}

impl Registration {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Registration::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&Accepted> {
        match self {
            Registration::Accepted(accepted) => Some(accepted),
            Registration::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Registration::Accepted(_) => None,
            Registration::Rejected(rejection) => Some(*rejection),
        }
    }
}

/// Tracks bids for all items in an auction
pub trait BidTracker {
    /// Accept `bid` if it beats the baseline and the current winner of `item`
    ///
    /// Atomic with respect to every other registration.
    fn register_bid(&self, bid: Bid, item: &Item) -> Registration;

    fn current_winning_bid(&self, item: &Item) -> Option<Bid>;

    /// All accepted bids on `item`, highest first
    fn all_bids(&self, item: &Item) -> Vec<Bid>;

    /// One entry per accepted bid of `bidder`, oldest first
    fn all_items(&self, bidder: &Bidder) -> Vec<Item>;
}

pub type SharedBidTracker = Arc<dyn BidTracker + Send + Sync + 'static>;

#[derive(Default)]
struct Indices {
    /// Ascending by amount, so the winner is the last element
    item_history: HashMap<Item, Vec<Bid>>,
    bidder_history: HashMap<Bidder, Vec<Item>>,
}

pub struct BidLedger {
    indices: RwLock<Indices>,
    sink: SharedNotificationSink,
}

impl BidLedger {
    pub fn new(sink: SharedNotificationSink) -> Self {
        Self {
            indices: RwLock::new(Indices::default()),
            sink,
        }
    }

    pub fn new_shared(sink: SharedNotificationSink) -> SharedBidTracker {
        Arc::new(Self::new(sink))
    }
}

impl BidTracker for BidLedger {
    fn register_bid(&self, bid: Bid, item: &Item) -> Registration {
        let mut indices = self.indices.write();
        let Indices {
            item_history,
            bidder_history,
        } = &mut *indices;

        let bids = item_history.entry(item.clone()).or_default();
        let items = bidder_history.entry(bid.bidder().clone()).or_default();

        if !validation::meets_baseline(&bid, item) {
            debug!(
                item = %item.name(),
                bidder = %bid.bidder(),
                amount = bid.amount(),
                "below baseline"
            );
            return Registration::Rejected(Rejection::BelowBaseline {
                amount: bid.amount(),
                baseline: item.baseline(),
            });
        }

        if let Some(winning) = bids.last() {
            if bid.amount() <= winning.amount() {
                debug!(
                    item = %item.name(),
                    bidder = %bid.bidder(),
                    amount = bid.amount(),
                    winning = winning.amount(),
                    "not high enough"
                );
                return Registration::Rejected(Rejection::NotHighEnough {
                    amount: bid.amount(),
                    winning: winning.amount(),
                });
            }
        }

        bids.push(bid.clone());
        items.push(item.clone());
        info!(
            item = %item.name(),
            bidder = %bid.bidder(),
            amount = bid.amount(),
            "bid accepted"
        );

        let notification = self.sink.notify(&bid, item);
        if let Err(e) = &notification {
            warn!(
                item = %item.name(),
                bidder = %bid.bidder(),
                error = %e,
                "failed to notify about accepted bid"
            );
        }

        Registration::Accepted(Accepted { bid, notification })
    }

    fn current_winning_bid(&self, item: &Item) -> Option<Bid> {
        self.indices
            .read()
            .item_history
            .get(item)
            .and_then(|bids| bids.last())
            .cloned()
    }

    fn all_bids(&self, item: &Item) -> Vec<Bid> {
        self.indices
            .read()
            .item_history
            .get(item)
            .map(|bids| bids.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    fn all_items(&self, bidder: &Bidder) -> Vec<Item> {
        self.indices
            .read()
            .bidder_history
            .get(bidder)
            .cloned()
            .unwrap_or_default()
    }
}
