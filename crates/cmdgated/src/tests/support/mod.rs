//! Test harness utilities for the gateway behavioural suites.

pub(crate) mod http;
mod reporter;
mod world;

pub(crate) use reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use world::{GatewayWorld, world};
