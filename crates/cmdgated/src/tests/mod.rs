//! Test suites for the gateway bootstrap and HTTP behaviour.

pub(crate) mod support;
