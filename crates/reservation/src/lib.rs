//! Reservation lock manager for leasable IP blocks.
//!
//! A hold takes a catalog block out of circulation for a bounded window.
//! Every hold within one order shares a single deadline, fixed when the
//! first block is held; a periodic sweep returns expired holds to the
//! available pool. State survives process restarts through a durable local
//! key-value store.

pub mod clock;
pub mod hold;
pub mod manager;
pub mod store;
pub mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use hold::HeldBlock;
pub use manager::{ReservationConfig, ReservationError, ReservationManager};
pub use store::{InMemoryStore, ReservationStore, StoreError, RESERVATIONS_KEY};
pub use sweeper::{spawn_sweeper, SweeperHandle};
