// src/progress.rs
/// Lightweight progress reporting for a roster run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of month pages the run will visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One month page was read (`shifts` is 0 for an already-collected month).
    fn month_done(&mut self, _label: &str, _shifts: usize) {}

    /// The page at `position` (0-based, visitation order) became a gap.
    fn month_failed(&mut self, _position: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}

    /// Polled before every navigation step; `true` aborts the run.
    fn cancelled(&self) -> bool { false }
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
