//! Background world generation.
//!
//! Builds run on a dedicated worker thread (each build still fans out over
//! row bands internally) and are delivered through a bounded channel.
//! Cancelling a job discards its result; a build that has already started is
//! not interrupted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use dashmap::DashMap;
use stoneworld_config::{ConfigurationError, GenerationParameters};
use stoneworld_mesh::{MeshBuffers, TerrainMeshBuilder};

/// Identifies one submitted generation job.
pub type JobId = u64;

/// A finished job.
#[derive(Debug)]
pub struct GeneratedWorld {
    /// The id returned by [`AsyncWorldGenerator::submit`].
    pub id: JobId,
    /// The parameters after clamping.
    pub params: GenerationParameters,
    /// The mesh, or why the parameters could not be meshed.
    pub result: Result<MeshBuffers, ConfigurationError>,
    /// Wall time spent configuring and building.
    pub elapsed: Duration,
}

struct Job {
    id: JobId,
    params: GenerationParameters,
    cancelled: Arc<AtomicBool>,
}

type ActiveJobs = Arc<DashMap<JobId, Arc<AtomicBool>>>;

/// Runs world generation off the calling thread.
pub struct AsyncWorldGenerator {
    job_sender: Option<Sender<Job>>,
    result_receiver: Receiver<GeneratedWorld>,
    active_jobs: ActiveJobs,
    next_id: AtomicU64,
    worker: Option<JoinHandle<()>>,
}

impl AsyncWorldGenerator {
    /// Spawn the worker thread.
    ///
    /// At most `queue_capacity` jobs wait to start; further submissions are
    /// rejected until the queue drains.
    pub fn new(builder: TerrainMeshBuilder, queue_capacity: usize) -> std::io::Result<Self> {
        let capacity = queue_capacity.max(1);
        let (job_sender, job_receiver) = bounded::<Job>(capacity);
        let (result_sender, result_receiver) = bounded::<GeneratedWorld>(capacity + 1);
        let active_jobs: ActiveJobs = Arc::new(DashMap::new());

        let jobs = Arc::clone(&active_jobs);
        let worker = std::thread::Builder::new()
            .name("world-gen-worker".into())
            .spawn(move || run_worker(&builder, &job_receiver, &result_sender, &jobs))?;

        Ok(Self {
            job_sender: Some(job_sender),
            result_receiver,
            active_jobs,
            next_id: AtomicU64::new(0),
            worker: Some(worker),
        })
    }

    /// Queue a generation job.
    ///
    /// Returns the job id, or the parameters back if the queue is full.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, params: GenerationParameters) -> Result<JobId, GenerationParameters> {
        let Some(sender) = &self.job_sender else {
            return Err(params);
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.active_jobs.insert(id, Arc::clone(&cancelled));

        sender
            .try_send(Job {
                id,
                params,
                cancelled,
            })
            .map(|()| {
                tracing::debug!(id, "Queued world generation");
                id
            })
            .map_err(|e| {
                self.active_jobs.remove(&id);
                e.into_inner().params
            })
    }

    /// Cancel a queued or running job. No-op once its result was delivered.
    pub fn cancel(&self, id: JobId) {
        if let Some((_, cancelled)) = self.active_jobs.remove(&id) {
            cancelled.store(true, Ordering::Relaxed);
            tracing::debug!(id, "Cancelled world generation");
        }
    }

    /// Collect every finished job without blocking.
    pub fn drain_results(&self) -> Vec<GeneratedWorld> {
        let mut results = Vec::new();
        while let Ok(world) = self.result_receiver.try_recv() {
            self.deliver(world, &mut results);
        }
        results
    }

    /// Wait up to `timeout` for the next finished job.
    ///
    /// A timeout too large to represent as a deadline waits indefinitely.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<GeneratedWorld> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.result_receiver.recv_timeout(remaining)
                }
                None => self
                    .result_receiver
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(world) => {
                    let mut out = Vec::with_capacity(1);
                    self.deliver(world, &mut out);
                    if let Some(world) = out.pop() {
                        return Some(world);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Returns `true` while a job is queued or running and not cancelled.
    pub fn is_pending(&self, id: JobId) -> bool {
        self.active_jobs.contains_key(&id)
    }

    /// Number of jobs queued or running.
    pub fn pending_count(&self) -> usize {
        self.active_jobs.len()
    }

    /// Drops results whose job was cancelled after the worker checked.
    fn deliver(&self, world: GeneratedWorld, out: &mut Vec<GeneratedWorld>) {
        if self.active_jobs.remove(&world.id).is_some() {
            out.push(world);
        }
    }
}

impl Drop for AsyncWorldGenerator {
    fn drop(&mut self) {
        for entry in self.active_jobs.iter() {
            entry.value().store(true, Ordering::Relaxed);
        }
        // Closing the job channel ends the worker loop; draining unblocks a
        // worker waiting on a full result channel.
        self.job_sender.take();
        while self.result_receiver.try_recv().is_ok() {}
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("World generation worker panicked");
        }
    }
}

fn run_worker(
    builder: &TerrainMeshBuilder,
    jobs: &Receiver<Job>,
    results: &Sender<GeneratedWorld>,
    active: &ActiveJobs,
) {
    while let Ok(job) = jobs.recv() {
        if job.cancelled.load(Ordering::Relaxed) {
            continue;
        }

        let start = Instant::now();
        let mut params = job.params;
        let result = params.configure().and_then(|()| builder.build(&params));
        let elapsed = start.elapsed();

        if job.cancelled.load(Ordering::Relaxed) {
            tracing::debug!(id = job.id, "Discarded cancelled world");
            continue;
        }
        if let Err(e) = &result {
            tracing::warn!(id = job.id, "World generation failed: {e}");
        }

        let world = GeneratedWorld {
            id: job.id,
            params,
            result,
            elapsed,
        };
        if results.send(world).is_err() {
            active.remove(&job.id);
            break;
        }
    }
}
