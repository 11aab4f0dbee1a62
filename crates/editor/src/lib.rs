// Library crate: exposes the authoring core for the binary, integration tests
// and the scripted command interface.

pub mod catalog;
pub mod command;
pub mod compose;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;
pub mod viewport;
