//! The reservation lock manager.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use netlease_catalog::IpBlock;
use netlease_core::BlockId;

use crate::clock::{Clock, SystemClock};
use crate::hold::HeldBlock;
use crate::store::{ReservationStore, StoreError, RESERVATIONS_KEY};

/// Reservation policy knobs. Defaults mirror the production policy.
#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// How long a hold lasts from the first block of the order.
    pub lock_duration: Duration,
    /// Maximum blocks held within one order.
    pub max_blocks_per_order: usize,
    /// How often the sweeper checks for expired holds.
    pub sweep_interval: Duration,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            lock_duration: Duration::from_secs(15 * 60),
            max_blocks_per_order: 1,
            sweep_interval: Duration::from_secs(1),
        }
    }
}

impl ReservationConfig {
    pub fn with_lock_duration(mut self, duration: Duration) -> Self {
        self.lock_duration = duration;
        self
    }

    pub fn with_max_blocks_per_order(mut self, max: usize) -> Self {
        self.max_blocks_per_order = max;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Why a hold or a persistence write was refused.
///
/// The business-rule variants carry the context the order form renders;
/// matching on them is exhaustive, so a new rule cannot be silently ignored.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("an order can hold at most {max} block(s)")]
    MaxBlocksReached { max: usize },

    #[error("an order can only hold blocks from one country ({current_country} held, {new_country} attempted)")]
    CountryMismatch {
        current_country: String,
        new_country: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode reservation state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Held blocks plus the order deadline.
///
/// `deadline` is `None` exactly when `held` is empty; when set it equals
/// every member's `expires_at`.
#[derive(Debug, Default)]
struct State {
    held: Vec<HeldBlock>,
    deadline: Option<DateTime<Utc>>,
}

/// Owns the set of held blocks, their shared deadline, and the write-through
/// persistence of both.
///
/// All mutations funnel through one internal mutex, so the state change and
/// its persistence write happen atomically with respect to the sweep thread.
/// Every value returned to callers is an owned copy; handing one back does
/// not alias live state.
pub struct ReservationManager<C: Clock = SystemClock> {
    config: ReservationConfig,
    clock: C,
    store: Arc<dyn ReservationStore>,
    state: Mutex<State>,
}

impl<C: Clock> ReservationManager<C> {
    /// Build a manager, restoring any persisted holds that have not expired.
    ///
    /// A store read or parse failure is downgraded to "no prior state":
    /// losing a stale hold across a restart beats refusing to start.
    pub fn new(config: ReservationConfig, clock: C, store: Arc<dyn ReservationStore>) -> Self {
        let manager = Self {
            config,
            clock,
            store,
            state: Mutex::new(State::default()),
        };
        manager.restore();
        manager
    }

    fn restore(&self) {
        let raw = match self.store.read(RESERVATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "failed to read persisted reservations, starting empty");
                return;
            }
        };

        let persisted: Vec<HeldBlock> = match serde_json::from_str(&raw) {
            Ok(held) => held,
            Err(err) => {
                warn!(error = %err, "failed to parse persisted reservations, starting empty");
                return;
            }
        };

        let now = self.clock.now();
        let before = persisted.len();
        let held: Vec<HeldBlock> = persisted
            .into_iter()
            .filter(|h| !h.is_expired(now))
            .collect();
        let dropped = before - held.len();

        let mut state = self.state.lock().unwrap();
        // Tolerate drifted on-disk deadlines by taking the earliest expiry.
        state.deadline = held.iter().map(|h| h.expires_at).min();
        state.held = held;

        if dropped > 0 {
            debug!(dropped, "dropped expired holds found in the store");
            if let Err(err) = self.persist(&state) {
                warn!(error = %err, "failed to rewrite reservations after expiry filter");
            }
        }
    }

    /// Take a block out of circulation for this order.
    ///
    /// The first hold fixes the order deadline at `now + lock_duration`;
    /// later holds inherit it unchanged. On a persistence failure the hold
    /// stays applied in memory and the error is surfaced so the caller can
    /// warn that it may not survive a reload.
    pub fn hold(&self, block: IpBlock) -> Result<(), ReservationError> {
        let mut state = self.state.lock().unwrap();

        if state.held.len() >= self.config.max_blocks_per_order {
            return Err(ReservationError::MaxBlocksReached {
                max: self.config.max_blocks_per_order,
            });
        }

        if let Some(first) = state.held.first() {
            if first.block.location != block.location {
                return Err(ReservationError::CountryMismatch {
                    current_country: first.block.location.clone(),
                    new_country: block.location.clone(),
                });
            }
        }

        let now = self.clock.now();
        let expires_at = state.deadline.unwrap_or_else(|| {
            now + chrono::Duration::from_std(self.config.lock_duration).unwrap_or_default()
        });

        debug!(id = %block.id, %expires_at, "holding block");
        state.held.push(HeldBlock {
            block,
            selected_at: now,
            expires_at,
        });
        state.deadline = Some(expires_at);

        self.persist(&state)
    }

    /// Give a held block back before its deadline.
    ///
    /// Unknown ids are a no-op returning `Ok(None)`, so a double release is
    /// harmless. The returned block is stripped of its temporal claim.
    pub fn release(&self, id: &BlockId) -> Result<Option<IpBlock>, ReservationError> {
        let mut state = self.state.lock().unwrap();

        let Some(pos) = state.held.iter().position(|h| h.block.id == *id) else {
            return Ok(None);
        };

        let held = state.held.remove(pos);
        // Survivors keep the deadline fixed by the order's first hold.
        state.deadline = state.held.first().map(|h| h.expires_at);

        debug!(id = %held.block.id, "released block");
        self.persist(&state)?;
        Ok(Some(held.into_block()))
    }

    /// Evict every hold whose expiry has passed and return the freed blocks.
    ///
    /// Each block's own `expires_at` is checked rather than just the shared
    /// deadline. Ticks that evict nothing skip the persistence write.
    pub fn sweep_expired(&self) -> Result<Vec<IpBlock>, ReservationError> {
        let mut state = self.state.lock().unwrap();
        let now = self.clock.now();

        let mut expired = Vec::new();
        state.held.retain(|held| {
            if held.is_expired(now) {
                expired.push(held.clone());
                false
            } else {
                true
            }
        });

        if expired.is_empty() {
            return Ok(Vec::new());
        }

        state.deadline = state.held.first().map(|h| h.expires_at);

        debug!(count = expired.len(), "evicting expired holds");
        self.persist(&state)?;
        Ok(expired.into_iter().map(HeldBlock::into_block).collect())
    }

    /// Time left on the order deadline, zero when nothing is held or the
    /// deadline has passed. Pure in-memory query, safe on every render tick.
    pub fn remaining_time(&self) -> Duration {
        let state = self.state.lock().unwrap();
        match state.deadline {
            Some(deadline) => (deadline - self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }

    /// Snapshot of the currently held blocks, in hold order.
    pub fn held(&self) -> Vec<HeldBlock> {
        self.state.lock().unwrap().held.clone()
    }

    /// Identifiers of the currently held blocks, for available-view filtering.
    pub fn held_ids(&self) -> Vec<BlockId> {
        self.state
            .lock()
            .unwrap()
            .held
            .iter()
            .map(|h| h.block.id.clone())
            .collect()
    }

    pub fn held_count(&self) -> usize {
        self.state.lock().unwrap().held.len()
    }

    /// The shared order deadline, `None` when nothing is held.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.state.lock().unwrap().deadline
    }

    pub fn config(&self) -> &ReservationConfig {
        &self.config
    }

    fn persist(&self, state: &State) -> Result<(), ReservationError> {
        let raw = serde_json::to_string(&state.held)?;
        self.store.write(RESERVATIONS_KEY, &raw)?;
        Ok(())
    }
}
