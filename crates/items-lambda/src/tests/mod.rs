//! Test suites for the items function.

mod support;
