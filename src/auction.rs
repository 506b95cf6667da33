use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

pub type ItemId = String;
pub type ItemIdRef<'s> = &'s str;
pub type Amount = i64;

/// Submission order of a bid, unique within the process
pub type BidId = u64;

static NEXT_BID_ID: AtomicU64 = AtomicU64::new(0);

/// An item put up for auction
///
/// Identity is the name alone: two `Item`s with the same name are the
/// same item regardless of prices.
#[derive(Clone, Debug)]
pub struct Item {
    name: ItemId,
    baseline: Amount,
    reserve: Amount,
}

impl Item {
    pub fn new(name: impl Into<ItemId>, baseline: Amount, reserve: Amount) -> Self {
        Self {
            name: name.into(),
            baseline,
            reserve,
        }
    }

    pub fn name(&self) -> ItemIdRef<'_> {
        &self.name
    }

    /// The amount a bid has to exceed to be considered at all
    pub fn baseline(&self) -> Amount {
        self.baseline
    }

    /// Carried along for settlement, never consulted when bidding
    pub fn reserve(&self) -> Amount {
        self.reserve
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (initial: {}, reserve: {})",
            self.name, self.baseline, self.reserve
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bidder(String);

impl Bidder {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bidder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An offer of `amount` by `bidder`
///
/// Every call to [`Bid::new`] yields a distinct bid, even for an identical
/// bidder and amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bid {
    id: BidId,
    bidder: Bidder,
    amount: Amount,
}

impl Bid {
    pub fn new(amount: Amount, bidder: Bidder) -> Self {
        Self {
            id: NEXT_BID_ID.fetch_add(1, Ordering::Relaxed),
            bidder,
            amount,
        }
    }

    pub fn id(&self) -> BidId {
        self.id
    }

    pub fn bidder(&self) -> &Bidder {
        &self.bidder
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bid ({})", self.amount)
    }
}
