//! Persistent wall-pass workers
//!
//! One long-lived thread per column strip. Each tick the dispatcher hands
//! every worker its strip plus a clone of the pass, then waits for all
//! strips to come back before copying them into the frame. A worker that
//! has died is never waited on again; its strip is rendered on the calling
//! thread instead so the frame stays complete.

use std::ops::Range;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, error, info};

use super::dispatch::{partition_columns, ColumnDispatch};
use super::frame::{DepthBuffer, PixelBuffer};
use super::raycast::WallPass;
use super::strip::ColumnStrip;
use crate::error::{DescentError, Result};

struct Job {
    pass: WallPass,
    strip: ColumnStrip,
    width: usize,
}

struct Worker {
    index: usize,
    columns: Range<usize>,
    jobs: Option<Sender<Job>>,
    done: Receiver<ColumnStrip>,
    handle: Option<JoinHandle<()>>,
    /// Checked in between ticks, out while the worker owns it
    strip: Option<ColumnStrip>,
    pending: bool,
    alive: bool,
}

impl Worker {
    fn spawn(index: usize, columns: Range<usize>, height: usize) -> Result<Self> {
        let (job_tx, job_rx) = bounded::<Job>(1);
        let (done_tx, done_rx) = bounded::<ColumnStrip>(1);

        let handle = thread::Builder::new()
            .name(format!("descent-cols-{index}"))
            .spawn(move || worker_loop(index, job_rx, done_tx))
            .map_err(|source| DescentError::WorkerSpawn { index, source })?;

        Ok(Self {
            index,
            strip: Some(ColumnStrip::new(columns.clone(), height)),
            columns,
            jobs: Some(job_tx),
            done: done_rx,
            handle: Some(handle),
            pending: false,
            alive: true,
        })
    }

    fn mark_dead(&mut self) {
        if self.alive {
            error!(
                worker = self.index,
                columns = ?self.columns,
                "render worker stopped responding, drawing its columns inline"
            );
        }
        self.alive = false;
        self.jobs = None;
    }

    /// Hand the strip to the worker thread, or give it back if the
    /// worker is gone
    fn send(
        &mut self,
        pass: &WallPass,
        strip: ColumnStrip,
        width: usize,
    ) -> std::result::Result<(), ColumnStrip> {
        let Some(jobs) = self.jobs.as_ref().filter(|_| self.alive) else {
            return Err(strip);
        };
        let job = Job {
            pass: pass.clone(),
            strip,
            width,
        };
        match jobs.send(job) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.mark_dead();
                Err(err.into_inner().strip)
            },
        }
    }
}

fn worker_loop(index: usize, jobs: Receiver<Job>, done: Sender<ColumnStrip>) {
    debug!(worker = index, "render worker started");
    for job in jobs.iter() {
        let Job { pass, mut strip, width } = job;
        strip.render(&pass, width);
        // Release the shared world before reporting so the caller can
        // mutate it between ticks
        drop(pass);
        if done.send(strip).is_err() {
            break;
        }
    }
    debug!(worker = index, "render worker exiting");
}

/// Fixed set of column workers, sized once from the config
pub struct WorkerPool {
    workers: Vec<Worker>,
    width: usize,
    height: usize,
}

impl WorkerPool {
    /// Spawn `workers` threads for a `width` x `height` frame.
    /// Fails if `workers` is zero or any thread cannot be started; threads
    /// already started are shut down again.
    pub fn new(workers: usize, width: usize, height: usize) -> Result<Self> {
        if workers == 0 {
            return Err(DescentError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }

        let mut pool = Self {
            workers: Vec::with_capacity(workers),
            width,
            height,
        };
        for (index, columns) in partition_columns(width, workers).into_iter().enumerate() {
            pool.workers.push(Worker::spawn(index, columns, height)?);
        }

        info!(workers, width, height, "render worker pool started");
        Ok(pool)
    }

    /// Workers still answering
    pub fn live_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.alive).count()
    }

    /// Column range owned by each worker, in worker order
    pub fn partition(&self) -> Vec<Range<usize>> {
        self.workers.iter().map(|w| w.columns.clone()).collect()
    }
}

impl ColumnDispatch for WorkerPool {
    fn worker_count(&self) -> usize {
        self.workers.len()
    }

    fn frame_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn run(&mut self, pass: &WallPass, pixels: &mut PixelBuffer, depth: &mut DepthBuffer) {
        let (width, height) = (self.width, self.height);

        for worker in &mut self.workers {
            let strip = worker
                .strip
                .take()
                .unwrap_or_else(|| ColumnStrip::new(worker.columns.clone(), height));
            match worker.send(pass, strip, width) {
                Ok(()) => worker.pending = true,
                Err(mut strip) => {
                    strip.render(pass, width);
                    worker.strip = Some(strip);
                },
            }
        }

        // Barrier: every strip is back before anything touches the frame
        for worker in &mut self.workers {
            if !std::mem::take(&mut worker.pending) {
                continue;
            }
            match worker.done.recv() {
                Ok(strip) => worker.strip = Some(strip),
                Err(_) => {
                    worker.mark_dead();
                    let mut strip = ColumnStrip::new(worker.columns.clone(), height);
                    strip.render(pass, width);
                    worker.strip = Some(strip);
                },
            }
        }

        for strip in self.workers.iter().filter_map(|w| w.strip.as_ref()) {
            strip.blit(pixels, depth);
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for worker in &mut self.workers {
            worker.jobs = None;
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    error!(worker = worker.index, "render worker panicked");
                }
            }
        }
        info!(workers = self.workers.len(), "render worker pool stopped");
    }
}
