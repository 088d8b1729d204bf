#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # prokick-entities
//!
//! Reusable, agnostic domain entities for ProKick.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod geo;
pub mod id;
pub mod location;
pub mod phone;
pub mod profile;
pub mod reputation;
pub mod request;
pub mod subscription;
pub mod time;
pub mod user;
pub mod venue;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
