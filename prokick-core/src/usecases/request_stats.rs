//! Aggregate view of a user's organizer requests.

use crate::gateways::backend::{AuthForwarding, BackendGateway, RequestListQuery};

/// Upper bound on the records fetched for counting.
pub const STATS_SCAN_LIMIT: u32 = 1000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestStats {
    pub total: u64,
    pub pending: u64,
}

/// Counts a user's requests and how many of them still await action.
///
/// This is an approximation: at most [`STATS_SCAN_LIMIT`] records are
/// fetched and counted client-side, so users beyond that many requests get
/// a truncated pending count. Lookup failures degrade to zeroes.
pub fn request_stats<G: BackendGateway + ?Sized>(gateway: &G, auth: &AuthForwarding) -> RequestStats {
    let query = RequestListQuery {
        status: None,
        page: Some(1),
        limit: Some(STATS_SCAN_LIMIT),
    };
    match gateway.my_requests(auth, &query) {
        Ok(page) => RequestStats {
            total: page.total,
            pending: page
                .items
                .iter()
                .filter(|r| r.status.is_pending())
                .count() as u64,
        },
        Err(err) => {
            log::warn!("request stats lookup failed: {err}");
            RequestStats::default()
        }
    }
}
