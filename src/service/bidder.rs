//! Simulated bidder
//!
//! Keeps outbidding whoever holds each item, cycling through the items.
use super::LoopService;
use crate::auction::{Amount, Bid, Bidder, ItemId};
use crate::auction_house::AuctionHouse;
use crate::ledger::Registration;
use anyhow::{ensure, format_err, Result};
use std::{sync::Arc, thread, time::Duration};
use tracing::{debug, info};

pub struct BidderBot {
    house: Arc<AuctionHouse>,
    bidder: Bidder,
    items: Vec<ItemId>,
    step: Amount,
    delay: Duration,
    next: usize,
}

impl BidderBot {
    pub fn new(
        house: Arc<AuctionHouse>,
        bidder: Bidder,
        items: Vec<ItemId>,
        step: Amount,
        delay: Duration,
    ) -> Result<Self> {
        ensure!(!items.is_empty(), "bidder {bidder} has nothing to bid on");
        ensure!(step > 0, "bid step must be positive, got {step}");
        Ok(Self {
            house,
            bidder,
            items,
            step,
            delay,
            next: 0,
        })
    }

    /// The amount this bot will offer for `item_name` right now
    ///
    /// `None` if the item is not listed.
    pub fn next_amount(&self, item_name: &str) -> Result<Option<Amount>> {
        let Some(item) = self.house.find(item_name) else {
            return Ok(None);
        };
        let current = self
            .house
            .tracker()
            .current_winning_bid(&item)
            .map(|bid| bid.amount())
            .unwrap_or(item.baseline());
        let amount = current.checked_add(self.step).ok_or_else(|| {
            format_err!("bidding {} over {current} on {item_name} overflows", self.step)
        })?;
        Ok(Some(amount))
    }
}

impl LoopService for BidderBot {
    fn run_iteration(&mut self) -> Result<()> {
        let item_name = &self.items[self.next % self.items.len()];
        self.next = self.next.wrapping_add(1);

        // An item missing from the catalog surfaces from `bid` below
        let amount = self.next_amount(item_name)?.unwrap_or(self.step);

        match self
            .house
            .bid(Bid::new(amount, self.bidder.clone()), item_name)?
        {
            Registration::Accepted(_) => {
                info!(bidder = %self.bidder, item = %item_name, amount, "took the lead");
            }
            Registration::Rejected(rejection) => {
                debug!(
                    bidder = %self.bidder,
                    item = %item_name,
                    %rejection,
                    "outbid before the bid landed"
                );
            }
        }

        // don't hog the cpu
        thread::sleep(self.delay);
        Ok(())
    }
}
