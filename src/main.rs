use anyhow::Result;
use bid_tracker::{
    auction::{Bidder, ItemId},
    auction_house::AuctionHouse,
    catalog::{Catalog, InMemoryCatalog},
    config::Config,
    event_log,
    ledger::{BidLedger, BidTracker},
    notify::{EventLogSink, FanOutSink, LoggingSink},
    service,
};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    config.logging.init();

    let catalog = Arc::new(InMemoryCatalog::with_items(config.items())?);
    let (event_writer, event_reader) = event_log::new_in_memory_shared();
    let ledger = BidLedger::new_shared(FanOutSink::new_shared(vec![
        LoggingSink::new_shared(),
        EventLogSink::new_shared(event_writer),
    ]));
    let house = Arc::new(AuctionHouse::new(catalog.clone(), ledger.clone()));

    let svc_ctr = service::ServiceControl::new();

    ctrlc::set_handler({
        let svc_ctr = svc_ctr.clone();
        move || {
            eprintln!("Stopping all services...");
            svc_ctr.stop_all();
        }
    })?;

    let item_names: Vec<ItemId> = catalog
        .items()
        .iter()
        .map(|item| item.name().to_owned())
        .collect();

    let mut handles = vec![svc_ctr.spawn_log_follower(service::Announcer::new(), event_reader)];
    for (i, name) in config.bidders.iter().enumerate() {
        // start everyone on a different item so they don't all collide at once
        let mut items = item_names.clone();
        let len = items.len().max(1);
        items.rotate_left(i % len);
        handles.push(svc_ctr.spawn_loop(service::BidderBot::new(
            house.clone(),
            Bidder::new(name.as_str()),
            items,
            config.bid_step,
            config.round_delay(),
        )?));
    }

    for handle in handles {
        handle.join()?
    }

    for item in catalog.items() {
        match ledger.current_winning_bid(&item) {
            Some(bid) => info!(
                item = %item.name(),
                winner = %bid.bidder(),
                amount = bid.amount(),
                bids = ledger.all_bids(&item).len(),
                "final standing"
            ),
            None => info!(item = %item.name(), "no bids"),
        }
    }

    Ok(())
}
