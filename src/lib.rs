//! wfadmin — approval console for pending API Manager workflow requests.
//!
//! This library exposes the approval list, its REST client and the
//! terminal front-ends for integration testing and programmatic use.
//! The binary entrypoint is in `main.rs`.

pub mod cli;
pub mod config;
pub mod console;
pub mod notify;
pub mod tui;
pub mod workflow;
