#![cfg(feature = "std")]
//! Deferred application of pending transitions on a tokio runtime.
//!
//! The engine never sleeps. A front end hands each requested transition to
//! the scheduler, which waits out the suggested delay and then applies it.
//! Cancelling (e.g. on reset) aborts the waits; a wait that finishes after
//! the match moved on finds its transition stale and does nothing.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::events::{MatchEvent, PendingTransition};
use crate::game::MatchEngine;

/// Shared handle to an engine driven from several tasks.
pub type SharedEngine = Arc<Mutex<MatchEngine>>;

/// Lock the engine, recovering the guard if a previous holder panicked.
pub fn lock_engine(engine: &SharedEngine) -> MutexGuard<'_, MatchEngine> {
    match engine.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub struct TransitionScheduler {
    engine: SharedEngine,
    tasks: Vec<JoinHandle<()>>,
}

impl TransitionScheduler {
    pub fn new(engine: SharedEngine) -> Self {
        Self {
            engine,
            tasks: Vec::new(),
        }
    }

    pub fn engine(&self) -> SharedEngine {
        self.engine.clone()
    }

    /// Number of scheduled applications that have not finished yet.
    pub fn outstanding(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Apply `pending` after its delay. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, pending: PendingTransition) {
        let engine = self.engine.clone();
        debug!("scheduling {:?} in {:?}", pending.kind, pending.delay);
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(tokio::spawn(async move {
            sleep(pending.delay).await;
            let mut guard = lock_engine(&engine);
            match guard.apply_transition(pending.id) {
                Ok(kind) => info!("applied transition {:?}", kind),
                Err(e) => debug!("transition {} not applied: {}", pending.id, e),
            }
        }));
    }

    /// Schedule every `TransitionRequested` found in `events`.
    pub fn schedule_requested(&mut self, events: &[MatchEvent]) -> usize {
        let mut scheduled = 0;
        for event in events {
            if let MatchEvent::TransitionRequested(pending) = event {
                self.schedule(*pending);
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Abort every outstanding wait.
    pub fn cancel(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Cancel outstanding waits and discard the match.
    pub fn reset_match(&mut self) {
        self.cancel();
        lock_engine(&self.engine).reset();
    }

    /// Wait until every scheduled application has run or been cancelled.
    pub async fn settle(&mut self) -> anyhow::Result<()> {
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    return Err(anyhow::anyhow!("transition task failed: {}", e));
                }
            }
        }
        Ok(())
    }
}

impl Drop for TransitionScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
