//! Client-side search state.
//!
//! [`coordinator::SearchCoordinator`] owns the canonical search state and is
//! the only thing that mutates it. Renderers read it through
//! [`state::SearchView`]. The address bar and favorites live alongside as
//! separate collaborators.

pub mod config;
pub mod coordinator;
pub mod favorites;
pub mod location;
pub mod opener;
pub mod state;

pub use coordinator::{CoordinatorBuilder, LocationSync, SearchCoordinator, SearchOutcome};
pub use state::{FailureKind, SearchFailure, SearchPhase, SearchState, SearchView};
