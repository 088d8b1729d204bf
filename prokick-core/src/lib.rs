//! # prokick-core
//!
//! Business logic of the ProKick platform: gateway contracts towards the
//! external backend and the geographic reference API, the organizer-request
//! workflow, map marker encoding, and session bookkeeping.

pub mod gateways;
pub mod marker;
pub mod usecases;
pub mod util;
