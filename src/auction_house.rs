//! The entry point for placing bids
use crate::auction::{Bid, Item, ItemId, ItemIdRef};
use crate::catalog::SharedCatalog;
use crate::ledger::{Registration, SharedBidTracker};
use crate::validation::{self, InvalidArgument};
use thiserror::Error;

/// The request itself was unusable; nothing was registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error("unknown item: {0}")]
    ItemNotFound(ItemId),
}

pub struct AuctionHouse {
    catalog: SharedCatalog,
    tracker: SharedBidTracker,
}

impl AuctionHouse {
    pub fn new(catalog: SharedCatalog, tracker: SharedBidTracker) -> Self {
        Self { catalog, tracker }
    }

    /// Place `bid` on the item called `item_name`
    ///
    /// Malformed bids and unknown items are errors. A bid that is simply
    /// too low is a `Registration::Rejected`.
    pub fn bid(&self, bid: Bid, item_name: ItemIdRef<'_>) -> Result<Registration, BidError> {
        validation::validate_item_name(item_name)?;

        let item = self
            .catalog
            .find(item_name)
            .ok_or_else(|| BidError::ItemNotFound(item_name.to_owned()))?;
        validation::validate(&bid, &item)?;

        Ok(self.tracker.register_bid(bid, &item))
    }

    pub fn find(&self, item_name: ItemIdRef<'_>) -> Option<Item> {
        self.catalog.find(item_name)
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &SharedBidTracker {
        &self.tracker
    }
}
