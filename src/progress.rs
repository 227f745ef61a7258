// src/progress.rs
/// Lightweight progress reporting for long-running operations (row scans, exports).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (one sheet row).
    fn item_done(&mut self) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress sink that only counts; handy in tests and benches.
#[derive(Debug, Default)]
pub struct CountingProgress {
    pub total: usize,
    pub done: usize,
    pub messages: Vec<String>,
    pub finished: bool,
}

impl Progress for CountingProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { self.messages.push(s!(msg)); }
    fn item_done(&mut self) { self.done += 1; }
    fn finish(&mut self) { self.finished = true; }
}
