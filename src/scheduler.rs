//! Named recurring jobs on tokio timers.
//!
//! Each job is a single task that runs its body to completion before the
//! next fire, so a job never overlaps itself; distinct jobs interleave
//! freely. Registering a job under an id that already exists replaces the
//! previous job, which is how duplicate timers are avoided across
//! restarts.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::context::StopSignal;

struct Job {
    name: String,
    handle: JoinHandle<()>,
    next_run: Arc<RwLock<DateTime<Utc>>>,
}

pub struct JobScheduler {
    stop: StopSignal,
    jobs: Mutex<HashMap<String, Job>>,
}

impl JobScheduler {
    pub fn new(stop: StopSignal) -> Self {
        Self {
            stop,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a recurring job. The first fire happens one interval from
    /// now; callers wanting an immediate run invoke the task themselves.
    /// An existing job with the same id is replaced.
    pub async fn add_job<F, Fut>(&self, id: &str, every: Duration, task: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let interval =
            chrono::Duration::from_std(every).unwrap_or_else(|_| chrono::Duration::zero());
        let next_run = Arc::new(RwLock::new(Utc::now() + interval));

        let stop = self.stop.clone();
        let job_next_run = next_run.clone();
        let handle = tokio::spawn(async move {
            loop {
                *job_next_run.write().await = Utc::now() + interval;
                tokio::select! {
                    _ = stop.wait() => break,
                    _ = tokio::time::sleep(every) => {}
                }
                if stop.is_set() {
                    break;
                }
                task().await;
            }
        });

        let job = Job {
            name: id.to_string(),
            handle,
            next_run,
        };

        let mut jobs = self.jobs.lock().await;
        if let Some(previous) = jobs.insert(id.to_string(), job) {
            debug!("Replacing existing scheduled job [{}]", previous.name);
            previous.handle.abort();
        }
    }

    /// Names and next fire times of all registered jobs
    pub async fn job_states(&self) -> Vec<(String, DateTime<Utc>)> {
        let jobs = self.jobs.lock().await;
        let mut states = Vec::with_capacity(jobs.len());
        for job in jobs.values() {
            states.push((job.name.clone(), *job.next_run.read().await));
        }
        states
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }

    /// Remove every job and stop its timer. Running bodies are not
    /// interrupted mid-await by design intent; abort only lands at the
    /// next await point.
    pub async fn remove_all(&self) {
        let mut jobs = self.jobs.lock().await;
        for (_, job) in jobs.drain() {
            debug!("Removing scheduled job [{}]", job.name);
            job.handle.abort();
        }
    }
}
