use crate::prelude::*;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

/// The longest the timer thread sleeps before checking whether it was stopped.
const MAX_SLEEP: Duration = Duration::from_millis(50);

/// Calls a closure at a fixed interval on a background thread.
pub struct TimerThread {
    cb: Arc<Mutex<dyn FnMut() + Send + 'static>>,
    thread: Option<JoinHandle<()>>,

    interval_secs: Arc<AtomicF64>,

    sentinel: Arc<AtomicBool>,
}

impl TimerThread {
    pub fn new<F: FnMut() + Send + 'static>(cb: F) -> Self {
        Self {
            cb: Arc::new(Mutex::new(cb)),
            thread: None,

            interval_secs: Arc::new(AtomicF64::new(0.0)),

            sentinel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts calling the closure every `interval_secs` seconds. Does nothing
    /// if the timer is already running.
    pub fn start(&mut self, interval_secs: f64) {
        if self.thread.is_some() {
            return;
        }

        self.interval_secs.store(interval_secs, Ordering::Release);
        self.sentinel.store(true, Ordering::Release);

        let interval = Arc::clone(&self.interval_secs);
        let sentinel = Arc::clone(&self.sentinel);
        let cb = Arc::clone(&self.cb);

        let thread = std::thread::spawn(move || {
            let mut next = Instant::now();

            while sentinel.load(Ordering::Acquire) {
                let now = Instant::now();

                if now >= next {
                    if let Ok(mut guard) = cb.lock() {
                        (&mut *guard)();
                    }

                    let secs = interval.load(Ordering::Acquire).max(0.001);
                    next += Duration::from_secs_f64(secs);

                    // don't try to catch up after a stall
                    if next < now {
                        next = now + Duration::from_secs_f64(secs);
                    }

                    continue;
                }

                std::thread::sleep((next - now).min(MAX_SLEEP));
            }
        });

        self.thread = Some(thread);
    }

    pub fn start_hz(&mut self, interval_rate_hz: f64) {
        self.start(interval_rate_hz.recip());
    }

    /// Stops the timer and waits for its thread to finish.
    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.sentinel.store(false, Ordering::Release);
            _ = thread.join();
        }
    }

    pub const fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn interval(&self) -> f64 {
        self.interval_secs.load(Ordering::Acquire)
    }
}

impl Drop for TimerThread {
    fn drop(&mut self) {
        self.stop();
    }
}
