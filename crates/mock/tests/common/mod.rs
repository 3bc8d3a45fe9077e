//! Common test utilities for the reference service double.
//!
//! - [`harness`] - Test server construction and authenticated requests
//! - [`fixtures`] - Record bodies for seeding

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
