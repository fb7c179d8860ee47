// src/gui/progress.rs
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    cancel: Arc<AtomicBool>,
    done: usize,
    total: usize,
    gaps: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, cancel: Arc<AtomicBool>) -> Self {
        Self { status, cancel, done: 0, total: 0, gaps: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.gaps = 0;
    }

    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }

    fn month_done(&mut self, label: &str, shifts: usize) {
        self.done += 1;
        self.set_status(format!("Read {label}: {shifts} shifts ({}/{})", self.done, self.total));
    }

    fn month_failed(&mut self, position: usize) {
        self.done += 1;
        self.gaps += 1;
        self.set_status(format!("Page {position} unreadable, skipped ({}/{})", self.done, self.total));
    }

    fn finish(&mut self) {
        if self.gaps == 0 {
            self.set_status(format!("Fetch complete ({}/{})", self.done, self.total));
        } else {
            self.set_status(format!("Fetch complete ({}/{}, {} skipped)", self.done, self.total, self.gaps));
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tracks_counts_and_cancel_flag() {
        let status = Arc::new(Mutex::new(s!()));
        let cancel = Arc::new(AtomicBool::new(false));
        let mut p = GuiProgress::new(status.clone(), cancel.clone());

        p.begin(3);
        p.month_done("May 2024", 20);
        assert_eq!(*status.lock().unwrap(), "Read May 2024: 20 shifts (1/3)");
        p.month_failed(1);
        p.finish();
        assert_eq!(*status.lock().unwrap(), "Fetch complete (2/3, 1 skipped)");

        assert!(!p.cancelled());
        cancel.store(true, Ordering::Relaxed);
        assert!(p.cancelled());
    }
}
