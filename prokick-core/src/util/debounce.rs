//! Cancellable trailing-edge debouncer.
//!
//! Each call supersedes the previous one: only the callback of the latest
//! call within the window fires, so out-of-order results cannot land.

use std::{sync::Arc, thread, time::Duration};

use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<Mutex<u64>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Schedules `f` to run after the delay unless superseded or cancelled.
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let scheduled = {
            let mut generation = self.generation.lock();
            *generation += 1;
            *generation
        };
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            // The guard is released before invoking so the callback may
            // schedule or cancel on this same debouncer.
            let current = *generation.lock();
            if current == scheduled {
                f();
            }
        });
    }

    /// Discards whatever is scheduled without replacing it.
    pub fn cancel(&self) {
        *self.generation.lock() += 1;
    }
}
