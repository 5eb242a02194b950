//! Run orchestration.
//!
//! `state` holds the session state container and its transition rules;
//! `runner` is the async task that performs backend I/O and feeds events
//! back to presentation layers.

mod runner;
mod state;

pub(crate) use runner::{run_controller, UiCommand};
pub(crate) use state::Session;
