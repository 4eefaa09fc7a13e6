// src/pool.rs
//
// A fixed-size fork/join worker pool. FFT decomposition is strictly
// bulk-synchronous (barrier between passes), so a simple "submit a closure,
// block on its handle" interface is sufficient -- no work stealing, no
// fairness guarantees beyond first-come-first-served among ready jobs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle as ThreadJoinHandle;

use crate::config;
use crate::error::FftError;

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Run(Job, Sender<JobOutcome>),
    Shutdown,
}

type JobOutcome = Result<(), FftError>;

/// A fixed cardinality of worker threads that accept closures and report
/// completion through a [`JoinHandle`].
///
/// `W`, the number of worker slots, is fixed at construction time. The
/// caller typically sizes it from [`crate::config::Config::number_of_workers`],
/// which is always a power of two -- the 2-D and 1-D decomposition drivers
/// rely on that to split work into evenly sized chunks.
pub struct WorkerPool {
    sender: Sender<Message>,
    threads: Mutex<Vec<ThreadJoinHandle<()>>>,
    size: usize,
}

/// A handle to a job submitted to a [`WorkerPool`]. Blocks on [`wait`] until
/// the job finishes.
///
/// [`wait`]: JoinHandle::wait
pub struct JoinHandle {
    outcome: Receiver<JobOutcome>,
}

impl JoinHandle {
    /// Blocks until the submitted job completes, returning
    /// [`FftError::WorkerFailure`] if it panicked instead of returning
    /// normally.
    pub fn wait(self) -> Result<(), FftError> {
        self.outcome.recv().unwrap_or(Err(FftError::WorkerFailure))
    }
}

impl WorkerPool {
    /// Spawns `size` worker threads (rounded up to at least 1). Each thread
    /// loops pulling jobs off a shared channel until the pool is dropped.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (sender, receiver) = mpsc::channel::<Message>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut threads = Vec::with_capacity(size);
        for _ in 0..size {
            let receiver = Arc::clone(&receiver);
            threads.push(std::thread::spawn(move || worker_loop(receiver)));
        }

        WorkerPool {
            sender,
            threads: Mutex::new(threads),
            size,
        }
    }

    /// Number of worker threads in this pool.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Submits a closure for execution on a worker thread, returning
    /// immediately with a handle the caller can [`JoinHandle::wait`] on.
    pub fn submit<F>(&self, f: F) -> JoinHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        // A closed channel means the pool has already been dropped; report
        // that as a worker failure rather than panicking the caller.
        let _ = self.sender.send(Message::Run(Box::new(f), tx));
        JoinHandle { outcome: rx }
    }

    /// Submits every thunk in `jobs` and waits for all of them, returning
    /// the first [`FftError`] encountered (if any). This is the shape every
    /// pass-barrier in the 1-D and 2-D drivers uses: fan out, then join.
    pub fn scoped_for_each<F>(&self, jobs: Vec<F>) -> Result<(), FftError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handles: Vec<JoinHandle> = jobs.into_iter().map(|f| self.submit(f)).collect();
        let mut first_err = None;
        for handle in handles {
            if let Err(e) = handle.wait() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

static GLOBAL: OnceLock<Arc<WorkerPool>> = OnceLock::new();

/// The process-wide worker pool: constructed once, sized from
/// [`crate::config::Config::number_of_workers`] at that moment, and shared
/// by every [`crate::plan1d::Plan1D`] and [`crate::plan2d::Plan2D`] built
/// for the rest of the process's life rather than each owning its own set
/// of OS threads.
pub fn global() -> Arc<WorkerPool> {
    GLOBAL
        .get_or_init(|| Arc::new(WorkerPool::new(config::global().number_of_workers())))
        .clone()
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for _ in 0..self.size {
            let _ = self.sender.send(Message::Shutdown);
        }
        if let Ok(mut threads) = self.threads.lock() {
            for t in threads.drain(..) {
                let _ = t.join();
            }
        }
    }
}

fn worker_loop(receiver: Arc<Mutex<Receiver<Message>>>) {
    loop {
        let message = {
            let guard = match receiver.lock() {
                Ok(g) => g,
                Err(_) => return,
            };
            guard.recv()
        };
        match message {
            Ok(Message::Run(job, outcome)) => {
                let result = panic::catch_unwind(AssertUnwindSafe(job));
                let reported = match result {
                    Ok(()) => Ok(()),
                    Err(payload) => {
                        log_panic(&payload);
                        Err(FftError::WorkerFailure)
                    }
                };
                let _ = outcome.send(reported);
            }
            Ok(Message::Shutdown) | Err(_) => return,
        }
    }
}

fn log_panic(payload: &(dyn std::any::Any + Send)) {
    if let Some(s) = payload.downcast_ref::<&str>() {
        log::error!("worker pool job panicked: {s}");
    } else if let Some(s) = payload.downcast_ref::<String>() {
        log::error!("worker pool job panicked: {s}");
    } else {
        log::error!("worker pool job panicked with a non-string payload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn submit_runs_the_job_and_waits_for_completion() {
        let pool = WorkerPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            handles.push(pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.wait().unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn a_panicking_job_reports_worker_failure_without_poisoning_the_pool() {
        let pool = WorkerPool::new(2);
        let bad = pool.submit(|| panic!("boom"));
        assert_eq!(bad.wait(), Err(FftError::WorkerFailure));

        let counter = Arc::new(AtomicUsize::new(0));
        let counter2 = Arc::clone(&counter);
        let good = pool.submit(move || {
            counter2.fetch_add(1, Ordering::SeqCst);
        });
        good.wait().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scoped_for_each_joins_every_job() {
        let pool = WorkerPool::new(4);
        let sum = Arc::new(AtomicUsize::new(0));
        let jobs: Vec<_> = (0..10)
            .map(|i| {
                let sum = Arc::clone(&sum);
                move || {
                    sum.fetch_add(i, Ordering::SeqCst);
                }
            })
            .collect();
        pool.scoped_for_each(jobs).unwrap();
        assert_eq!(sum.load(Ordering::SeqCst), 45);
    }

    #[test]
    fn pool_size_matches_construction_argument() {
        assert_eq!(WorkerPool::new(4).size(), 4);
        assert_eq!(WorkerPool::new(0).size(), 1);
    }
}
