//! Background expiry sweep.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use netlease_catalog::IpBlock;

use crate::clock::Clock;
use crate::manager::ReservationManager;

/// Handle controlling a running sweeper thread.
///
/// The thread stops on an explicit [`shutdown`](SweeperHandle::shutdown) or
/// when the handle is dropped, so tearing down the owning context cannot
/// leak a timer that keeps firing.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl SweeperHandle {
    /// Stop the sweep loop and wait for the thread to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a thread that runs [`ReservationManager::sweep_expired`] every
/// `sweep_interval`, handing any evicted blocks to `on_expired` so the
/// available view can be replenished.
///
/// Sweep persistence failures are logged and the loop keeps running; the
/// in-memory eviction already happened and the blocks are still reported.
pub fn spawn_sweeper<C, F>(manager: Arc<ReservationManager<C>>, mut on_expired: F) -> SweeperHandle
where
    C: Clock,
    F: FnMut(Vec<IpBlock>) + Send + 'static,
{
    let interval = manager.config().sweep_interval;
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let join = thread::Builder::new()
        .name("reservation-sweeper".to_string())
        .spawn(move || {
            debug!("reservation sweeper started");
            loop {
                match shutdown_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }

                match manager.sweep_expired() {
                    Ok(expired) => {
                        if !expired.is_empty() {
                            on_expired(expired);
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "expiry sweep failed to persist");
                    }
                }
            }
            debug!("reservation sweeper stopped");
        })
        .expect("failed to spawn reservation sweeper thread");

    SweeperHandle {
        shutdown: shutdown_tx,
        join: Some(join),
    }
}
