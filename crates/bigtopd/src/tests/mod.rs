//! Test suites for the daemon dispatcher.

mod behaviour;
pub(crate) mod support;
