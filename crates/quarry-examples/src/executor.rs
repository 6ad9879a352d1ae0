//! Fixed-size worker pool for snippet resolution.
//!
//! Resolving a row touches the workspace and may parse a file, which is
//! far too slow for the UI thread. The pool bounds both concurrency and
//! backlog: when the queue is full, [`RenderPool::submit`] fails fast
//! instead of queueing unbounded work for rows the user has likely
//! scrolled past already.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, warn};

/// Queue slots available before `submit` starts rejecting.
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

type Job = Box<dyn FnOnce() + Send>;

/// Why a job was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("render queue is full")]
    Saturated,
    #[error("render pool is shut down")]
    ShutDown,
}

enum PoolState {
    Threaded {
        sender: Sender<Job>,
        workers: Vec<JoinHandle<()>>,
    },
    /// No workers could be had; jobs run on the submitting thread.
    Inline,
    ShutDown,
}

/// A shut-down-able pool of named worker threads with a bounded queue.
pub struct RenderPool {
    state: Mutex<PoolState>,
}

impl RenderPool {
    pub fn new() -> Self {
        RenderPool::with_workers(default_workers(), DEFAULT_QUEUE_CAPACITY)
    }

    /// `workers == 0` selects inline execution, which tests use to make
    /// submission synchronous.
    pub fn with_workers(workers: usize, queue_capacity: usize) -> Self {
        if workers == 0 {
            return RenderPool {
                state: Mutex::new(PoolState::Inline),
            };
        }
        let (sender, receiver) = crossbeam_channel::bounded::<Job>(queue_capacity);
        let mut handles = Vec::with_capacity(workers);
        for n in 0..workers {
            let rx = receiver.clone();
            let builder = thread::Builder::new().name(format!("quarry-render-{n}"));
            match builder.spawn(move || worker_loop(rx)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!(target: "quarry.render", error = %err, "failed to spawn render worker");
                }
            }
        }
        if handles.is_empty() {
            warn!(target: "quarry.render", "no render workers available, running jobs inline");
            return RenderPool {
                state: Mutex::new(PoolState::Inline),
            };
        }
        RenderPool {
            state: Mutex::new(PoolState::Threaded {
                sender,
                workers: handles,
            }),
        }
    }

    /// Hands `job` to the pool without blocking.
    ///
    /// Accepted jobs run exactly once, in submission order per worker.
    /// A full queue returns [`SubmitError::Saturated`] immediately.
    pub fn submit<F>(&self, job: F) -> Result<(), SubmitError>
    where
        F: FnOnce() + Send + 'static,
    {
        let state = self.state.lock();
        match &*state {
            PoolState::ShutDown => return Err(SubmitError::ShutDown),
            PoolState::Threaded { sender, .. } => {
                return sender.try_send(Box::new(job)).map_err(|err| match err {
                    TrySendError::Full(_) => SubmitError::Saturated,
                    TrySendError::Disconnected(_) => SubmitError::ShutDown,
                });
            }
            PoolState::Inline => {}
        }
        // Inline jobs run without holding the lock so they may submit
        // further work.
        drop(state);
        run_job(Box::new(job));
        Ok(())
    }

    /// Stops accepting work, drains the queue, and joins every worker.
    ///
    /// Idempotent; later calls return immediately.
    pub fn shutdown(&self) {
        let prior = std::mem::replace(&mut *self.state.lock(), PoolState::ShutDown);
        if let PoolState::Threaded { sender, workers } = prior {
            // Disconnects the channel; workers exit once the backlog is
            // drained.
            drop(sender);
            for handle in workers {
                // A panicking job was already caught and logged, so a
                // worker can only fail to join if the runtime is tearing
                // down.
                let _ = handle.join();
            }
        }
    }
}

impl Default for RenderPool {
    fn default() -> Self {
        RenderPool::new()
    }
}

impl Drop for RenderPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(2)
        .clamp(1, 8)
}

fn worker_loop(rx: Receiver<Job>) {
    while let Ok(job) = rx.recv() {
        run_job(job);
    }
}

fn run_job(job: Job) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(job)) {
        error!(
            target: "quarry.render",
            panic = panic_message(payload.as_ref()),
            "render job panicked"
        );
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
