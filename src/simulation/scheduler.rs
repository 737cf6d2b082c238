//! Fixed-interval tick driver
//!
//! Decouples the tick cadence from any UI lifecycle: one task owns the
//! interval, so ticks are strictly sequential and never overlap, and
//! observers watch a channel of cloned snapshots that can never mutate
//! live state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::actions::PlantController;
use crate::core::config::{SimConfig, SimParams};
use crate::plant::state::PlantState;

/// Drive a controller for a fixed number of ticks at its configured
/// interval, invoking `on_tick` with each fresh snapshot.
///
/// Used by the console's realtime mode and by tests that want wall-clock
/// pacing without the background task.
pub async fn drive(
    controller: &mut PlantController,
    ticks: u64,
    mut on_tick: impl FnMut(&PlantState),
) {
    let mut interval =
        tokio::time::interval(Duration::from_millis(controller.params().tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for _ in 0..ticks {
        interval.tick().await;
        controller.step();
        let snapshot = controller.snapshot();
        on_tick(&snapshot);
    }
}

/// A plant simulation running on a background task
///
/// Actions go through the shared controller; renders subscribe to the
/// watch channel. Dropping or stopping the handle stops the ticker at a
/// tick boundary, never mid-state.
pub struct SimulationHandle {
    controller: Arc<Mutex<PlantController>>,
    snapshots: watch::Receiver<PlantState>,
    ticker: JoinHandle<()>,
}

impl SimulationHandle {
    /// Spawn the tick loop on the current tokio runtime
    pub fn spawn(config: SimConfig, params: SimParams) -> Self {
        let controller = PlantController::new(config, params);
        let (tx, snapshots) = watch::channel(controller.snapshot());
        let controller = Arc::new(Mutex::new(controller));

        let tick_controller = Arc::clone(&controller);
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(params.tick_interval_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let snapshot = {
                    let mut c = tick_controller.lock().expect("controller lock poisoned");
                    c.step();
                    c.snapshot()
                };
                // Observers may all be gone; keep ticking for the
                // controller until the handle stops us
                let _ = tx.send(snapshot);
            }
        });

        Self {
            controller,
            snapshots,
            ticker,
        }
    }

    /// Shared controller for dispatching operator actions
    ///
    /// The lock is only ever held for one action or one tick, so actions
    /// are atomic between ticks.
    pub fn controller(&self) -> Arc<Mutex<PlantController>> {
        Arc::clone(&self.controller)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlantState {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<PlantState> {
        self.snapshots.clone()
    }

    /// Stop the ticker. Safe at any time: the task is cancelled between
    /// ticks, so no partial state is ever observable.
    pub fn stop(self) {
        self.ticker.abort();
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
