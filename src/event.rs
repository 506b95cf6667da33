use crate::auction::{Amount, Bid, Bidder, Item, ItemId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    BidAccepted(AcceptedBid),
    #[cfg(test)]
    Test,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedBid {
    pub item: ItemId,
    pub bidder: Bidder,
    pub amount: Amount,
}

impl AcceptedBid {
    pub fn new(bid: &Bid, item: &Item) -> Self {
        Self {
            item: item.name().to_owned(),
            bidder: bid.bidder().clone(),
            amount: bid.amount(),
        }
    }
}
