//! Structural checks on bids and items
//!
//! Nothing here looks at other bids. Whether a bid is high enough depends on
//! the ledger's state and is decided there.
use crate::auction::{Amount, Bid, Item, ItemId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("bidder name is empty")]
    EmptyBidder,
    #[error("item name is empty")]
    EmptyItemName,
    #[error("bid amount is negative: {0}")]
    NegativeAmount(Amount),
    #[error("negative price for item {item}: {price}")]
    NegativePrice { item: ItemId, price: Amount },
}

pub fn validate(bid: &Bid, item: &Item) -> Result<(), InvalidArgument> {
    validate_bid(bid)?;
    validate_item(item)
}

pub fn validate_bid(bid: &Bid) -> Result<(), InvalidArgument> {
    if bid.bidder().name().trim().is_empty() {
        return Err(InvalidArgument::EmptyBidder);
    }
    if bid.amount() < 0 {
        return Err(InvalidArgument::NegativeAmount(bid.amount()));
    }
    Ok(())
}

pub fn validate_item(item: &Item) -> Result<(), InvalidArgument> {
    validate_item_name(item.name())?;
    for price in [item.baseline(), item.reserve()] {
        if price < 0 {
            return Err(InvalidArgument::NegativePrice {
                item: item.name().to_owned(),
                price,
            });
        }
    }
    Ok(())
}

pub fn validate_item_name(name: &str) -> Result<(), InvalidArgument> {
    if name.trim().is_empty() {
        return Err(InvalidArgument::EmptyItemName);
    }
    Ok(())
}

/// A bid has to be strictly above the item's baseline price
pub fn meets_baseline(bid: &Bid, item: &Item) -> bool {
    bid.amount() > item.baseline()
}
