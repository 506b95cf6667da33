use super::RecordingSink;
use crate::{
    auction::{Bid, Bidder, Item},
    auction_house::{AuctionHouse, BidError},
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    ledger::{BidLedger, BidTracker, Registration, Rejection},
    validation::InvalidArgument,
};
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;

fn catalog() -> Result<InMemoryCatalog> {
    Ok(InMemoryCatalog::with_items([
        Item::new("Item 1", 100, 200),
        Item::new("Item 2", 50, 75),
        Item::new("Item 3", 10, 15),
        Item::new("Item 4", 1000, 1500),
        Item::new("Item 5", 300, 400),
    ])?)
}

/// Counts registrations and accepts everything
#[derive(Default)]
struct CountingTracker {
    registered: Mutex<Vec<Bid>>,
}

impl BidTracker for CountingTracker {
    fn register_bid(&self, bid: Bid, _item: &Item) -> Registration {
        self.registered.lock().push(bid.clone());
        Registration::Accepted(crate::ledger::Accepted {
            bid,
            notification: Ok(()),
        })
    }

    fn current_winning_bid(&self, _item: &Item) -> Option<Bid> {
        None
    }

    fn all_bids(&self, _item: &Item) -> Vec<Bid> {
        vec![]
    }

    fn all_items(&self, _bidder: &Bidder) -> Vec<Item> {
        vec![]
    }
}

#[test]
fn find_returns_item_with_its_prices() -> Result<()> {
    let house = AuctionHouse::new(
        Arc::new(catalog()?),
        Arc::new(CountingTracker::default()),
    );

    let item = house.find("Item 1").expect("listed");
    assert_eq!(item.name(), "Item 1");
    assert_eq!(item.baseline(), 100);
    assert_eq!(item.reserve(), 200);
    assert!(house.find("Item 42").is_none());
    Ok(())
}

#[test]
fn valid_bid_is_handed_to_the_tracker() -> Result<()> {
    let tracker = Arc::new(CountingTracker::default());
    let house = AuctionHouse::new(Arc::new(catalog()?), tracker.clone());

    let bid = Bid::new(150, Bidder::new("User 1"));
    assert!(house.bid(bid.clone(), "Item 1")?.is_accepted());
    assert_eq!(*tracker.registered.lock(), vec![bid]);
    Ok(())
}

#[test]
fn malformed_requests_never_reach_the_tracker() -> Result<()> {
    let tracker = Arc::new(CountingTracker::default());
    let house = AuctionHouse::new(Arc::new(catalog()?), tracker.clone());

    assert_eq!(
        house.bid(Bid::new(-100, Bidder::new("User 1")), "Item 1").unwrap_err(),
        BidError::InvalidArgument(InvalidArgument::NegativeAmount(-100))
    );
    assert_eq!(
        house.bid(Bid::new(150, Bidder::new("")), "Item 1").unwrap_err(),
        BidError::InvalidArgument(InvalidArgument::EmptyBidder)
    );
    assert_eq!(
        house.bid(Bid::new(150, Bidder::new("User 1")), "").unwrap_err(),
        BidError::InvalidArgument(InvalidArgument::EmptyItemName)
    );
    assert_eq!(
        house.bid(Bid::new(150, Bidder::new("User 1")), "Item 42").unwrap_err(),
        BidError::ItemNotFound("Item 42".to_owned())
    );

    assert!(tracker.registered.lock().is_empty());
    Ok(())
}

#[test]
fn bidding_through_the_house_updates_the_ledger() -> Result<()> {
    let sink = Arc::new(RecordingSink::default());
    let house = AuctionHouse::new(
        Arc::new(catalog()?),
        BidLedger::new_shared(sink.clone()),
    );
    let user = Bidder::new("User 1");

    let low = house.bid(Bid::new(100, user.clone()), "Item 1")?;
    assert_eq!(
        low.rejection(),
        Some(Rejection::BelowBaseline {
            amount: 100,
            baseline: 100
        })
    );

    let bid1 = Bid::new(101, user.clone());
    let bid2 = Bid::new(102, user.clone());
    let bid3 = Bid::new(103, user.clone());
    house.bid(bid1, "Item 1")?;
    house.bid(bid2, "Item 2")?;
    house.bid(bid3.clone(), "Item 1")?;
    assert!(!house.bid(Bid::new(101, user.clone()), "Item 1")?.is_accepted());

    let item1 = house.find("Item 1").expect("listed");
    assert_eq!(house.tracker().all_bids(&item1).len(), 2);
    assert_eq!(house.tracker().current_winning_bid(&item1), Some(bid3));
    assert_eq!(house.tracker().all_items(&user).len(), 3);
    assert_eq!(sink.count(), 3);
    Ok(())
}

#[test]
fn catalog_is_reachable_from_the_house() -> Result<()> {
    let house = AuctionHouse::new(
        Arc::new(catalog()?),
        Arc::new(CountingTracker::default()),
    );
    assert_eq!(house.catalog().items().len(), 5);
    Ok(())
}

/// Hands out whatever it was built with, unchecked
struct UncheckedCatalog(Vec<Item>);

impl Catalog for UncheckedCatalog {
    fn add(&self, item: Item) -> Result<(), CatalogError> {
        Err(CatalogError::DuplicateItem(item.name().to_owned()))
    }

    fn find(&self, name: &str) -> Option<Item> {
        self.0.iter().find(|i| i.name() == name).cloned()
    }

    fn items(&self) -> Vec<Item> {
        self.0.clone()
    }
}

#[test]
fn malformed_listed_item_never_reaches_the_tracker() {
    let tracker = Arc::new(CountingTracker::default());
    let house = AuctionHouse::new(
        Arc::new(UncheckedCatalog(vec![Item::new("Item 1", -5, 10)])),
        tracker.clone(),
    );

    assert_eq!(
        house
            .bid(Bid::new(150, Bidder::new("User 1")), "Item 1")
            .unwrap_err(),
        BidError::InvalidArgument(InvalidArgument::NegativePrice {
            item: "Item 1".to_owned(),
            price: -5
        })
    );
    assert!(tracker.registered.lock().is_empty());
}
