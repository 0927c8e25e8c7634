use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, SendError, Sender};

use crate::msg_fmt::Formatter;
use crate::targets::Sink;
use crate::LogRecord;

/// A sink paired with the formatter that renders records for it.
#[derive(Clone)]
pub struct Target {
    sink: Arc<dyn Sink>,
    formatter: Arc<dyn Formatter>,
}

impl Target {
    pub fn new(sink: Arc<dyn Sink>, formatter: Arc<dyn Formatter>) -> Self {
        Target { sink, formatter }
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn formatter(&self) -> &Arc<dyn Formatter> {
        &self.formatter
    }

    /// Whether this target writes to exactly `sink`.
    pub fn is_sink(&self, sink: &Arc<dyn Sink>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.sink), Arc::as_ptr(sink))
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("sink", &Arc::as_ptr(&self.sink))
            .finish_non_exhaustive()
    }
}

/// A record refused by a stopped dispatcher.
#[must_use]
#[derive(Debug)]
pub struct Rejected {
    record: LogRecord,
    target: Target,
}

impl Rejected {
    pub fn record(&self) -> &LogRecord {
        &self.record
    }
}

enum Command {
    Deliver(LogRecord, Target),
    Drain(Sender<()>),
}

#[derive(Debug, Default)]
struct Counters {
    enqueued: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    pub enqueued: u64,
    pub delivered: u64,
    pub failed: u64,
}

impl DeliveryStats {
    pub fn pending(&self) -> u64 {
        self.enqueued.saturating_sub(self.delivered + self.failed)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-queue, single-worker delivery engine.
///
/// Records are delivered strictly in the order they entered the queue. Once
/// the worker is gone (after [`shutdown`](Self::shutdown), or when it could
/// not be spawned) records are delivered on the caller's thread instead.
pub struct Dispatcher {
    sender: Mutex<Option<Sender<Command>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: Option<ThreadId>,
    counters: Arc<Counters>,
}

impl Dispatcher {
    pub fn new(worker_name: &str) -> Self {
        let (sender, receiver) = unbounded();
        let counters = Arc::new(Counters::default());
        let worker_counters = Arc::clone(&counters);

        let worker = thread::Builder::new()
            .name(worker_name.to_string())
            .spawn(move || run(receiver, worker_counters))
            .map_err(|err| report(format_args!("cannot spawn {worker_name} ({err}), delivering synchronously")))
            .ok();
        let worker_id = worker.as_ref().map(|handle| handle.thread().id());

        Dispatcher {
            sender: Mutex::new(worker.as_ref().map(|_| sender)),
            worker: Mutex::new(worker),
            worker_id,
            counters,
        }
    }

    /// Queues `record` for delivery to `target`, or hands it back when the
    /// worker is gone. Never performs I/O.
    pub fn try_enqueue(&self, record: LogRecord, target: Target) -> Result<(), Rejected> {
        self.counters.enqueued.fetch_add(1, Ordering::Relaxed);

        match lock(&self.sender).as_ref() {
            Some(sender) => match sender.send(Command::Deliver(record, target)) {
                Ok(()) => Ok(()),
                Err(SendError(Command::Deliver(record, target))) => Err(Rejected { record, target }),
                Err(SendError(Command::Drain(_))) => Ok(()),
            },
            None => Err(Rejected { record, target }),
        }
    }

    /// Writes a record the worker did not take, on the caller's thread.
    pub fn deliver_inline(&self, rejected: Rejected) {
        deliver(&rejected.record, &rejected.target, &self.counters);
    }

    /// Queues `record`, falling back to [`deliver_inline`](Self::deliver_inline)
    /// once the worker is gone.
    pub fn enqueue(&self, record: LogRecord, target: Target) {
        if let Err(rejected) = self.try_enqueue(record, target) {
            self.deliver_inline(rejected);
        }
    }

    fn barrier(&self) -> Option<Receiver<()>> {
        if self.worker_id == Some(thread::current().id()) {
            return None;
        }
        let (ack_tx, ack_rx) = bounded(1);
        let sent = lock(&self.sender)
            .as_ref()
            .is_some_and(|sender| sender.send(Command::Drain(ack_tx)).is_ok());
        sent.then_some(ack_rx)
    }

    /// Blocks until every record queued before this call was delivered.
    pub fn drain(&self) {
        if let Some(ack) = self.barrier() {
            let _ = ack.recv();
        }
    }

    /// Like [`drain`](Self::drain) but gives up after `timeout`; returns
    /// whether the queue was drained.
    pub fn drain_timeout(&self, timeout: Duration) -> bool {
        match self.barrier() {
            Some(ack) => ack.recv_timeout(timeout).is_ok(),
            None => true,
        }
    }

    /// Delivers everything still queued, then stops the worker. Idempotent.
    pub fn shutdown(&self) {
        drop(lock(&self.sender).take());
        if let Some(handle) = lock(&self.worker).take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.sender).is_some()
    }

    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            enqueued: self.counters.enqueued.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(receiver: Receiver<Command>, counters: Arc<Counters>) {
    // Ends once the dispatcher drops its sender and the queue is empty.
    for command in receiver.iter() {
        match command {
            Command::Deliver(record, target) => deliver(&record, &target, &counters),
            Command::Drain(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

fn deliver(record: &LogRecord, target: &Target, counters: &Counters) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut bytes = Vec::with_capacity(record.text().len() + 64);
        target.formatter.format(record, &mut bytes);
        target.sink.write(&bytes)?;
        target.sink.flush()
    }));

    let failure = match outcome {
        Ok(Ok(())) => {
            counters.delivered.fetch_add(1, Ordering::Relaxed);
            return;
        }
        Ok(Err(err)) => err.to_string(),
        Err(_) => "sink panicked".to_string(),
    };
    counters.failed.fetch_add(1, Ordering::Relaxed);
    report(format_args!("failed to deliver record #{}: {}", record.sequence(), failure));
}

/// Side channel for the logger's own failures.
fn report(args: std::fmt::Arguments<'_>) {
    let _ = writeln!(io::stderr(), "logger: {}", args);
}
