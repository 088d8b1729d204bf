pub mod backend;
pub mod geolookup;
