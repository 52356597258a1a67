//! Shared run context.
//!
//! The engine has no ambient globals: the stop signal, the cross-instance
//! auth locks, and the scheduler handle are all injected at construction
//! through `RunContext`.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::info;

use crate::scheduler::JobScheduler;

/// Coarse global stop flag.
///
/// Set once, never cleared. Jobs and the main loop consult it at wait
/// boundaries; in-flight network calls are not interrupted.
#[derive(Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// Request shutdown. Safe to call more than once.
    pub fn set(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_set(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the stop flag is set
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of per-credential mutexes serializing platform session
/// establishment across bot instances that share a login.
#[derive(Clone, Default)]
pub struct AuthLockRegistry {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl AuthLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex for a credential identity, created on first use
    pub async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }
}

/// Everything the engine needs from its process environment
#[derive(Clone)]
pub struct RunContext {
    pub stop: StopSignal,
    pub auth_locks: AuthLockRegistry,
    pub scheduler: Arc<JobScheduler>,
}

impl RunContext {
    pub fn new() -> Self {
        let stop = StopSignal::new();
        Self {
            scheduler: Arc::new(JobScheduler::new(stop.clone())),
            auth_locks: AuthLockRegistry::new(),
            stop,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Install OS signal handlers that set the stop flag
pub fn install_signal_handlers(stop: StopSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let stop_sigterm = stop.clone();
        tokio::spawn(async move {
            if let Ok(mut stream) = signal(SignalKind::terminate()) {
                stream.recv().await;
                info!("Received SIGTERM");
                stop_sigterm.set();
            }
        });

        let stop_sigint = stop;
        tokio::spawn(async move {
            if let Ok(mut stream) = signal(SignalKind::interrupt()) {
                stream.recv().await;
                info!("Received SIGINT");
                stop_sigint.set();
            }
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C");
                stop.set();
            }
        });
    }
}
