//! Domain model for the asset search front end.
//!
//! Holds everything that is pure data or pure computation: the display
//! model, the upstream wire model, the asset transformer, filter selections,
//! request construction and pagination math. No I/O lives here so both the
//! browser-side coordinator and the download proxy can depend on it.

pub mod asset;
pub mod download;
pub mod error;
pub mod filters;
pub mod intent;
pub mod results;
pub mod transform;
pub mod types;
pub mod wire;
