mod check_handle;
mod error;
mod filter_venues;
mod paginate;
mod request_stats;
mod search_map;
mod session;
mod submit_request;
mod update_profile;

pub use self::{
    check_handle::*, error::Error, filter_venues::*, paginate::*, request_stats::*,
    search_map::*, session::*, submit_request::*, update_profile::*,
};

type Result<T> = std::result::Result<T, Error>;
