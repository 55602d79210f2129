use crossbeam::channel::{Receiver, Sender, bounded, unbounded};
use log::warn;
use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;
use std::thread;

use crate::config::ParallelConfig;
use crate::error::{GridError, Result};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// A worker pool fed through a crossbeam channel.
/// Tasks can be submitted from any thread and will be executed by worker threads.
pub struct Executor {
    sender: Sender<Message>,
    workers: Vec<Worker>,
}

enum Message {
    Task(Task),
    Shutdown,
}

struct Worker {
    handle: Option<thread::JoinHandle<()>>,
}

impl Executor {
    /// Creates a new executor with the specified number of worker threads.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Thread pool size must be greater than 0");

        let (sender, receiver) = unbounded();
        let workers = (0..size)
            .map(|id| Worker::new(id, receiver.clone()))
            .collect();

        Executor { sender, workers }
    }

    /// Executor sized by `config.threads`.
    pub fn from_config(config: &ParallelConfig) -> Self {
        Self::new(config.threads.max(1))
    }

    /// One worker per available core.
    pub fn with_available_parallelism() -> Self {
        Self::new(thread::available_parallelism().map_or(1, |n| n.get()))
    }

    /// Executes a task on the pool. Completion order is non-deterministic.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Box::new(f));
    }

    /// Spawns a task and returns a future that resolves to the task's result.
    pub fn spawn<F, T>(&self, f: F) -> TaskFuture<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = bounded(1);
        self.submit(Box::new(move || {
            let _ = tx.send(f());
        }));
        TaskFuture { receiver: rx }
    }

    /// Returns a handle that can be used to submit tasks from other threads.
    pub fn handle(&self) -> ExecutorHandle {
        ExecutorHandle {
            sender: self.sender.clone(),
        }
    }

    /// Returns the number of worker threads in the pool.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Creates a scope for tasks that borrow non-'static data.
    ///
    /// Every task spawned in the scope has finished (or panicked) before this
    /// returns.
    ///
    /// ```
    /// use blocky::tasks::Executor;
    ///
    /// let executor = Executor::new(2);
    /// let mut data = vec![1, 2, 3, 4];
    /// executor.scope(|s| {
    ///     for item in &mut data {
    ///         s.spawn(move || *item *= 2);
    ///     }
    /// });
    /// assert_eq!(data, vec![2, 4, 6, 8]);
    /// ```
    pub fn scope<'env, F, R>(&'env self, f: F) -> R
    where
        F: FnOnce(&Scope<'env>) -> R,
    {
        let scope = Scope {
            executor: self,
            pending: Mutex::new(Vec::new()),
            _phantom: PhantomData,
        };
        f(&scope)
        // `scope` drops here and waits for its tasks.
    }

    fn submit(&self, task: Task) {
        // Workers only leave on `Shutdown`, which is sent from `drop`, so the
        // channel is open for as long as `self` is.
        let _ = self.sender.send(Message::Task(task));
    }
}

/// Tasks spawned here may borrow from the environment; they are all joined
/// when the scope is dropped.
pub struct Scope<'env> {
    executor: &'env Executor,
    pending: Mutex<Vec<Receiver<()>>>,
    _phantom: PhantomData<std::cell::Cell<&'env ()>>,
}

impl<'env> Scope<'env> {
    pub fn spawn<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'env,
    {
        let (tx, rx) = bounded(1);
        let task: Box<dyn FnOnce() + Send + 'env> = Box::new(move || {
            f();
            let _ = tx.send(());
        });
        // Safety: the task only outlives 'env in type. `Drop for Scope` blocks
        // until the task has signalled completion or dropped its sender
        // (panic), and the scope cannot be leaked because callers only ever
        // see `&Scope`.
        let task: Task = unsafe { std::mem::transmute(task) };

        if let Ok(mut pending) = self.pending.lock() {
            pending.push(rx);
        }
        self.executor.submit(task);
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => std::mem::take(pending),
            Err(poisoned) => std::mem::take(poisoned.into_inner()),
        };
        for done in pending {
            // Err means the task panicked and dropped its sender; either way it
            // no longer touches borrowed data.
            let _ = done.recv();
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        for _ in &self.workers {
            let _ = self.sender.send(Message::Shutdown);
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Worker {
    fn new(id: usize, receiver: Receiver<Message>) -> Self {
        let handle = thread::spawn(move || {
            loop {
                match receiver.recv() {
                    Ok(Message::Task(task)) => {
                        if catch_unwind(AssertUnwindSafe(task)).is_err() {
                            warn!("task panicked on worker {id}");
                        }
                    }
                    Ok(Message::Shutdown) | Err(_) => break,
                }
            }
        });

        Worker {
            handle: Some(handle),
        }
    }
}

/// A handle to submit tasks to an executor from other threads.
#[derive(Clone)]
pub struct ExecutorHandle {
    sender: Sender<Message>,
}

impl ExecutorHandle {
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = self.sender.send(Message::Task(Box::new(f)));
    }

    pub fn spawn<F, T>(&self, f: F) -> TaskFuture<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let _ = self.sender.send(Message::Task(Box::new(move || {
            let _ = tx.send(f());
        })));
        TaskFuture { receiver: rx }
    }
}

/// The pending result of a spawned task.
pub struct TaskFuture<T> {
    receiver: Receiver<T>,
}

impl<T> TaskFuture<T> {
    /// Blocks until the task completes.
    pub fn wait(self) -> Result<T> {
        self.receiver.recv().map_err(|_| GridError::TaskFailed)
    }

    /// `Ok(None)` while the task is still running.
    pub fn try_wait(&self) -> Result<Option<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(crossbeam::channel::TryRecvError::Empty) => Ok(None),
            Err(crossbeam::channel::TryRecvError::Disconnected) => Err(GridError::TaskFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_executor_executes_tasks() {
        let executor = Executor::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            executor.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        // Dropping joins the workers after the queue drains.
        drop(executor);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_spawn_multiple_tasks() {
        let executor = Executor::new(4);
        let futures: Vec<_> = (0..10).map(|i| executor.spawn(move || i * 2)).collect();
        let results: Vec<_> = futures.into_iter().map(|f| f.wait().unwrap()).collect();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_spawn_from_handle() {
        let executor = Executor::new(2);
        let handle = executor.handle();

        let future = thread::spawn(move || handle.spawn(|| "hello from another thread"))
            .join()
            .unwrap();

        assert_eq!(future.wait().unwrap(), "hello from another thread");
    }

    #[test]
    fn test_try_wait() {
        let executor = Executor::new(1);
        let (release, gate) = bounded::<()>(0);

        let future = executor.spawn(move || {
            let _ = gate.recv();
            42
        });
        assert_eq!(future.try_wait(), Ok(None));

        release.send(()).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(future.wait(), Ok(42));
    }

    #[test]
    fn test_panicking_task_reports_failure_and_keeps_worker() {
        let executor = Executor::new(1);
        let failed = executor.spawn(|| -> u32 { panic!("boom") });
        assert_eq!(failed.wait(), Err(GridError::TaskFailed));

        // The single worker survived the panic.
        assert_eq!(executor.spawn(|| 7).wait(), Ok(7));
    }

    #[test]
    fn test_scope_waits_for_borrowed_tasks() {
        let executor = Executor::new(3);
        let mut data = vec![0u64; 64];

        executor.scope(|s| {
            for (i, slot) in data.iter_mut().enumerate() {
                s.spawn(move || {
                    thread::sleep(Duration::from_micros(100));
                    *slot = i as u64;
                });
            }
        });

        assert!(data.iter().enumerate().all(|(i, v)| *v == i as u64));
    }
}
