//! Tracks competing bids on auctioned items
//!
//! [`ledger::BidLedger`] decides which bids win and remembers them, safely
//! under concurrent bidding. [`auction_house::AuctionHouse`] is the front
//! door: it checks the request, resolves the item by name in the
//! [`catalog`] and hands the bid over to the ledger.
pub mod auction;
pub mod auction_house;
pub mod catalog;
pub mod config;
pub mod event;
pub mod event_log;
pub mod ledger;
pub mod notify;
pub mod service;
pub mod validation;
