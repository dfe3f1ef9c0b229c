//! End-to-end walk through the hold lifecycle: pick a block from the
//! catalog, watch the countdown, let the sweeper return it.
//!
//! Run with `cargo run --example order_flow` (shortened lock window so the
//! expiry is visible).

use std::sync::Arc;
use std::time::Duration;

use netlease_catalog::{available_blocks, IpBlock, IpBlockKind, PurityLevel, StaticCatalog};
use netlease_core::BlockId;
use netlease_reservation::{
    spawn_sweeper, InMemoryStore, ReservationConfig, ReservationManager, SystemClock,
};

fn demo_block(id: &str, location: &str, subnet: &str, price: u64, purity: u8) -> IpBlock {
    IpBlock {
        id: BlockId::new(id),
        location: location.to_string(),
        kind: IpBlockKind::Native,
        subnet: subnet.to_string(),
        price,
        isp: "DemoNet".to_string(),
        purity_level: PurityLevel::new(purity).unwrap(),
    }
}

fn main() {
    netlease_observability::init();

    let catalog = StaticCatalog::new(vec![
        demo_block("us-24-a", "US", "192.0.2.0/24", 1999, 1),
        demo_block("us-23-b", "US", "198.51.100.0/23", 3600, 2),
        demo_block("de-24-c", "DE", "203.0.113.0/24", 1400, 3),
    ]);

    let config = ReservationConfig::default()
        .with_lock_duration(Duration::from_secs(3))
        .with_sweep_interval(Duration::from_millis(200));

    let manager = Arc::new(ReservationManager::new(
        config,
        SystemClock,
        Arc::new(InMemoryStore::new()),
    ));

    let sweeper = spawn_sweeper(manager.clone(), |expired| {
        for block in expired {
            tracing::info!(id = %block.id, "hold expired, block back in circulation");
        }
    });

    let first = catalog.list_all().into_iter().next().expect("demo catalog is non-empty");
    tracing::info!(id = %first.id, subnet = %first.subnet, "holding block");
    manager.hold(first).expect("fresh order accepts a first hold");

    tracing::info!(
        available = available_blocks(&catalog, &manager.held_ids()).len(),
        remaining_ms = manager.remaining_time().as_millis() as u64,
        "hold placed"
    );

    // Second hold is refused by the one-block-per-order policy.
    if let Err(err) = manager.hold(demo_block("us-24-x", "US", "192.0.2.0/24", 999, 1)) {
        tracing::info!(%err, "second hold refused");
    }

    while manager.held_count() > 0 {
        tracing::info!(
            remaining_ms = manager.remaining_time().as_millis() as u64,
            "waiting for expiry"
        );
        std::thread::sleep(Duration::from_millis(500));
    }

    tracing::info!(
        available = available_blocks(&catalog, &manager.held_ids()).len(),
        "all blocks back in circulation"
    );
    sweeper.shutdown();
}
