//! # prokick-webserver
//!
//! The Rocket application serving the same-origin `/api` surface of the
//! ProKick web client: auth/profile proxying, the cached venue listing with
//! derived marker encodings, the organizer-request workflow, and the
//! geographic lookup endpoints.

pub mod web;
