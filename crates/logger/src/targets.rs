use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Destination for formatted log bytes.
///
/// The dispatcher calls a sink from its single worker thread, but sinks are
/// shared (`Arc`) and may be inspected from other threads at the same time, so
/// implementations synchronize internally.
pub trait Sink: Send + Sync {
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Makes every prior write visible to readers of the underlying stream.
    fn flush(&self) -> io::Result<()>;

    /// Used by `ColorMode::Auto`.
    fn is_terminal(&self) -> bool {
        false
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().lock().flush()
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn write(&self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Appends to a file, creating it when missing.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        Ok(FileSink { file: Mutex::new(file) })
    }
}

impl Sink for FileSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        lock(&self.file).write_all(bytes)
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.file).flush()
    }
}

/// Collects writes in memory and counts them.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    buffer: Vec<u8>,
    writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        lock(&self.state).buffer.clone()
    }

    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&lock(&self.state).buffer).into_owned()
    }

    pub fn writes(&self) -> usize {
        lock(&self.state).writes
    }

    /// Empties the buffer and resets the write counter.
    pub fn clear(&self) {
        let mut state = lock(&self.state);
        state.buffer.clear();
        state.writes = 0;
    }
}

impl Sink for MemorySink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut state = lock(&self.state);
        state.buffer.extend_from_slice(bytes);
        state.writes += 1;
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn memory_sink_counts_writes() {
        let sink = MemorySink::new();
        sink.write(b"ab").unwrap();
        sink.write(b"cd").unwrap();
        assert_eq!(sink.writes(), 2);
        assert_eq!(sink.contents(), b"abcd");
        sink.clear();
        assert_eq!(sink.writes(), 0);
        assert!(sink.contents_string().is_empty());
    }

    #[test]
    fn file_sink_appends() {
        let path = std::env::temp_dir().join(format!("logger-file-sink-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let sink = FileSink::open(&path).unwrap();
        sink.write(b"first\n").unwrap();
        sink.flush().unwrap();
        drop(sink);

        let sink = FileSink::open(&path).unwrap();
        sink.write(b"second\n").unwrap();
        sink.flush().unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "first\nsecond\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_sink_reports_open_errors() {
        let dir = std::env::temp_dir();
        assert!(FileSink::open(&dir).is_err());
    }

    #[test]
    fn noop_sink_accepts_everything() {
        assert!(NoopSink.write(b"anything").is_ok());
        assert!(NoopSink.flush().is_ok());
        assert!(!NoopSink.is_terminal());
    }
}
