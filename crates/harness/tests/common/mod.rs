//! Common test utilities for the harness end-to-end tests.
//!
//! - [`harness`] - Starts the service double and builds clients against it
//! - [`assertions`] - Status and schema assertions

#![allow(dead_code)]

pub mod assertions;
pub mod harness;
