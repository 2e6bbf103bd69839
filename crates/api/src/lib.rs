//! Download proxy server library.
//!
//! Holds the catalog's private secret so browsers and other front ends
//! never see it. Exposes config, state, error handling, routes and the
//! router builder so integration tests and the binary share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
