//! Logs a burst of lines and exits through an uncaught signal.
//!
//! `logger_demo [COUNT]` writes COUNT info lines (default 10) to stdout, then
//! returns an error from `main`; the guard drains the queue before exit.

use logger::Signal;

fn main() -> Result<(), Signal> {
    let _guard = logger::init();

    let count: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10);
    for i in 0..count {
        logger::info!("line {}", i);
    }
    logger::error!("exiting after {} lines", count);
}
