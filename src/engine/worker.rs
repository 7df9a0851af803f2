use {
    super::core::UpdateEngine,
    super::messages::{UpdateJob, UpdateOutcome},
    anyhow::{Result, anyhow},
    std::sync::mpsc::{Receiver, Sender, channel},
    std::sync::{Arc, Mutex},
    std::thread::{self, JoinHandle},
};

/// Bounded pool of update workers sharing one job queue, so a burst of
/// evidence updates cannot stall request handling. Each worker owns its
/// own engine; jobs for independent inputs run concurrently.
///
/// Callers applying read-modify-write cycles against a keyed store of
/// "current zones per simulation id" must serialize updates per key
/// themselves (one in flight at a time per key) — the pool offers no
/// per-key ordering.
pub struct UpdateWorkerPool {
    job_tx: Sender<UpdateJob>,
    outcome_rx: Receiver<UpdateOutcome>,
    handles: Vec<JoinHandle<()>>,
}

impl UpdateWorkerPool {
    pub fn new(workers: usize, grid_resolution: usize) -> Self {
        let (job_tx, job_rx) = channel::<UpdateJob>();
        let (outcome_tx, outcome_rx) = channel::<UpdateOutcome>();

        let shared_rx = Arc::new(Mutex::new(job_rx));
        let count = workers.max(1);
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            handles.push(spawn_worker_thread(
                Arc::clone(&shared_rx),
                outcome_tx.clone(),
                grid_resolution,
            ));
        }
        log::info!("Spawned {count} update workers at resolution {grid_resolution}");

        Self {
            job_tx,
            outcome_rx,
            handles,
        }
    }

    pub fn submit(&self, job: UpdateJob) -> Result<()> {
        self.job_tx
            .send(job)
            .map_err(|_| anyhow!("All update workers have exited"))
    }

    /// Block until the next finished job.
    pub fn recv(&self) -> Result<UpdateOutcome> {
        self.outcome_rx
            .recv()
            .map_err(|_| anyhow!("All update workers have exited"))
    }

    /// Drain the queue and join the workers.
    pub fn shutdown(self) {
        let Self {
            job_tx, handles, ..
        } = self;
        // Closing the queue lets each worker finish its loop.
        drop(job_tx);
        for handle in handles {
            let _ = handle.join();
        }
    }
}

/// Spawns one background worker processing jobs from the shared queue.
fn spawn_worker_thread(
    rx: Arc<Mutex<Receiver<UpdateJob>>>,
    tx: Sender<UpdateOutcome>,
    grid_resolution: usize,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let engine = UpdateEngine::new(grid_resolution);
        loop {
            let job = match rx.lock() {
                Ok(guard) => guard.recv(),
                Err(_) => break,
            };
            let Ok(job) = job else {
                break; // Queue closed.
            };

            let zones = engine.update(&job.prior_zones, &job.evidence);
            let outcome = UpdateOutcome {
                job_id: job.job_id,
                zones,
            };
            if tx.send(outcome).is_err() {
                break; // Nobody is listening anymore.
            }
        }
    })
}
