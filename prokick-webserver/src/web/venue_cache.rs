//! Time-boxed in-memory cache of the venue list.
//!
//! Venues change rarely, so a successful non-empty fetch is served for five
//! minutes before the backend is asked again. There is no in-flight
//! deduplication: concurrent misses each perform their own round trip.
//! Errors stick until the next accepted fetch or an explicit reset.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use prokick_core::gateways::backend::{AuthForwarding, BackendGateway};
use prokick_entities::venue::Venue;

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Default)]
struct Inner {
    venues: Vec<Venue>,
    fetched_at: Option<Instant>,
    error: Option<String>,
    loading: bool,
}

pub struct VenueCache {
    inner: Mutex<Inner>,
}

impl VenueCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// A cached list is served only while fresh AND non-empty; an empty
    /// success is always refetched.
    pub fn is_valid(&self) -> bool {
        let inner = self.inner.lock();
        !inner.venues.is_empty()
            && inner
                .fetched_at
                .map(|at| at.elapsed() < CACHE_TTL)
                .unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    /// Clears the sticky error without touching the cached data.
    pub fn clear_error(&self) {
        self.inner.lock().error = None;
    }

    /// Returns the venue list, fetching through `backend` unless the cache
    /// is still fresh. On failure the error message sticks and is returned.
    pub fn fetch(
        &self,
        backend: &dyn BackendGateway,
        auth: &AuthForwarding,
    ) -> Result<Vec<Venue>, String> {
        {
            let mut inner = self.inner.lock();
            let fresh = inner
                .fetched_at
                .map(|at| at.elapsed() < CACHE_TTL)
                .unwrap_or(false);
            if fresh && !inner.venues.is_empty() {
                return Ok(inner.venues.clone());
            }
            inner.loading = true;
        }
        // The lock is not held across the network call.
        let result = backend.all_venues(auth);
        let mut inner = self.inner.lock();
        inner.loading = false;
        match result {
            Ok(venues) => {
                inner.venues = venues.clone();
                inner.fetched_at = Some(Instant::now());
                inner.error = None;
                Ok(venues)
            }
            Err(err) => {
                let message = err.to_string();
                inner.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

impl Default for VenueCache {
    fn default() -> Self {
        Self::new()
    }
}
